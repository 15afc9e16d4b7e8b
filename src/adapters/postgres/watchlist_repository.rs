//! PostgreSQL implementation of WatchlistRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::watchlist::{AlertConfig, Watchlist, WatchlistEntry};
use crate::ports::WatchlistRepository;

/// PostgreSQL implementation of the WatchlistRepository port.
///
/// The aggregate is persisted as one row per entry; saves replace the
/// user's entry set atomically inside a transaction.
pub struct PostgresWatchlistRepository {
    pool: PgPool,
}

impl PostgresWatchlistRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    user_id: Uuid,
    name: String,
    ticker: String,
    added_at: DateTime<Utc>,
    notes: Option<String>,
    alert_price_above: Option<f64>,
    alert_price_below: Option<f64>,
    alert_active: Option<bool>,
}

impl EntryRow {
    fn into_entry(self) -> WatchlistEntry {
        let alert = self.alert_active.map(|active| AlertConfig {
            price_above: self.alert_price_above,
            price_below: self.alert_price_below,
            active,
        });
        WatchlistEntry {
            ticker: self.ticker,
            added_at: Timestamp::from_datetime(self.added_at),
            notes: self.notes,
            alert,
        }
    }
}

#[async_trait]
impl WatchlistRepository for PostgresWatchlistRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Watchlist>, DomainError> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT user_id, name, ticker, added_at, notes,
                   alert_price_above, alert_price_below, alert_active
            FROM watchlist_entries
            WHERE user_id = $1
            ORDER BY added_at ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        // Presence is tracked separately so an empty watchlist survives a
        // reload.
        let marker: Option<(String,)> =
            sqlx::query_as("SELECT name FROM watchlists WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        let Some((name,)) = marker else {
            return Ok(None);
        };

        Ok(Some(Watchlist {
            user_id: *user_id,
            name: rows.first().map(|r| r.name.clone()).unwrap_or(name),
            entries: rows.into_iter().map(EntryRow::into_entry).collect(),
        }))
    }

    async fn save(&self, watchlist: &Watchlist) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query(
            r#"
            INSERT INTO watchlists (user_id, name) VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(watchlist.user_id.as_uuid())
        .bind(&watchlist.name)
        .execute(&mut *tx)
        .await
        .map_err(db_error)?;

        sqlx::query("DELETE FROM watchlist_entries WHERE user_id = $1")
            .bind(watchlist.user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for entry in &watchlist.entries {
            sqlx::query(
                r#"
                INSERT INTO watchlist_entries (
                    user_id, name, ticker, added_at, notes,
                    alert_price_above, alert_price_below, alert_active
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(watchlist.user_id.as_uuid())
            .bind(&watchlist.name)
            .bind(&entry.ticker)
            .bind(entry.added_at.as_datetime())
            .bind(&entry.notes)
            .bind(entry.alert.as_ref().and_then(|a| a.price_above))
            .bind(entry.alert.as_ref().and_then(|a| a.price_below))
            .bind(entry.alert.as_ref().map(|a| a.active))
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)
    }

    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        sqlx::query("DELETE FROM watchlist_entries WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        sqlx::query("DELETE FROM watchlists WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;
        tx.commit().await.map_err(db_error)
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Watchlist query failed: {}", e),
    )
}
