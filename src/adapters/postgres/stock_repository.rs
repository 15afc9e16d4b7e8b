//! PostgreSQL implementation of StockRepository.
//!
//! The full document lives in a JSONB column; the handful of fields the
//! listing filters and sorts on are mirrored into proper columns at
//! upsert time.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Row};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::stock::Stock;
use crate::ports::{
    ConflictCounts, QualityCounts, ScreenerQuery, StockPage, StockQuery, StockRepository,
    StockSort, StockStats, TimingCounts,
};

/// PostgreSQL implementation of the StockRepository port.
pub struct PostgresStockRepository {
    pool: PgPool,
}

impl PostgresStockRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn document_to_stock(value: serde_json::Value) -> Result<Stock, DomainError> {
    serde_json::from_value(value).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Corrupt stock document: {}", e))
    })
}

fn rows_to_stocks(rows: Vec<sqlx::postgres::PgRow>) -> Result<Vec<Stock>, DomainError> {
    rows.into_iter()
        .map(|row| document_to_stock(row.get("document")))
        .collect()
}

/// Appends the shared listing filters to a query builder.
fn push_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, query: &StockQuery) {
    if let Some(keyword) = &query.keyword {
        let pattern = format!("%{}%", keyword);
        builder
            .push(" AND (ticker ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR company_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(quality) = &query.quality {
        builder.push(" AND business_quality = ").push_bind(quality.clone());
    }
    if let Some(timing) = &query.timing {
        builder
            .push(" AND timing_label ILIKE ")
            .push_bind(format!("%{}%", timing));
    }
    if let Some(conflict) = query.conflict {
        builder.push(" AND has_conflict = ").push_bind(conflict);
    }
}

fn order_clause(sort: StockSort) -> &'static str {
    match sort {
        StockSort::ScoreDesc => " ORDER BY flexbit_score DESC NULLS LAST",
        StockSort::Ticker => " ORDER BY ticker ASC",
        StockSort::PriceAsc => " ORDER BY last_price ASC NULLS LAST",
        StockSort::PriceDesc => " ORDER BY last_price DESC NULLS LAST",
    }
}

#[async_trait]
impl StockRepository for PostgresStockRepository {
    async fn upsert(&self, stock: &Stock) -> Result<(), DomainError> {
        let document = serde_json::to_value(stock).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Stock serialization failed: {}", e))
        })?;

        sqlx::query(
            r#"
            INSERT INTO stocks (
                ticker, company_name, business_quality, timing_label,
                flexbit_score, last_price, has_conflict, document, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            ON CONFLICT (ticker) DO UPDATE SET
                company_name = EXCLUDED.company_name,
                business_quality = EXCLUDED.business_quality,
                timing_label = EXCLUDED.timing_label,
                flexbit_score = EXCLUDED.flexbit_score,
                last_price = EXCLUDED.last_price,
                has_conflict = EXCLUDED.has_conflict,
                document = EXCLUDED.document,
                updated_at = now()
            "#,
        )
        .bind(&stock.ticker)
        .bind(&stock.company_name)
        .bind(&stock.analysis.business_quality)
        .bind(&stock.analysis.timing_label)
        .bind(stock.analysis.flexbit_score)
        .bind(stock.technical.last_price)
        .bind(stock.analysis.conflict.has_conflict)
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<Stock>, DomainError> {
        let row = sqlx::query("SELECT document FROM stocks WHERE ticker = $1")
            .bind(ticker)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.map(|r| document_to_stock(r.get("document"))).transpose()
    }

    async fn find_by_tickers(&self, tickers: &[String]) -> Result<Vec<Stock>, DomainError> {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query("SELECT document FROM stocks WHERE ticker = ANY($1) ORDER BY ticker")
            .bind(tickers)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        rows_to_stocks(rows)
    }

    async fn search(&self, query: &StockQuery) -> Result<StockPage, DomainError> {
        let mut count_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM stocks WHERE TRUE");
        push_filters(&mut count_builder, query);
        let total: i64 = count_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?
            .get("total");

        let limit = query.limit.max(1) as i64;
        let page = query.page.max(1) as i64;

        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT document FROM stocks WHERE TRUE");
        push_filters(&mut builder, query);
        builder.push(order_clause(query.sort));
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(limit * (page - 1));

        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;
        let stocks = rows_to_stocks(rows)?;

        Ok(StockPage {
            stocks,
            page: page as u32,
            pages: ((total as f64) / (limit as f64)).ceil() as u32,
            total: total as u64,
        })
    }

    async fn screen(&self, query: &ScreenerQuery) -> Result<Vec<Stock>, DomainError> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT document FROM stocks WHERE TRUE");

        if let Some(quality) = &query.quality {
            builder.push(" AND business_quality = ").push_bind(quality.clone());
        }
        if let Some(timing) = &query.timing {
            builder.push(" AND timing_label = ").push_bind(timing.clone());
        }
        if let Some(min) = query.min_score {
            builder.push(" AND flexbit_score >= ").push_bind(min);
        }
        if let Some(max) = query.max_score {
            builder.push(" AND flexbit_score <= ").push_bind(max);
        }
        builder.push(" ORDER BY flexbit_score DESC NULLS LAST");

        let rows = builder.build().fetch_all(&self.pool).await.map_err(db_error)?;
        rows_to_stocks(rows)
    }

    async fn stats(&self) -> Result<StockStats, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE business_quality = 'Sangat Solid') AS solid,
                COUNT(*) FILTER (WHERE business_quality = 'Cukup Sehat') AS fair,
                COUNT(*) FILTER (WHERE business_quality = 'Perlu Perhatian') AS attention,
                COUNT(*) FILTER (WHERE business_quality = 'Bermasalah') AS troubled,
                COUNT(*) FILTER (WHERE timing_label ILIKE '%Momentum%') AS momentum,
                COUNT(*) FILTER (WHERE timing_label ILIKE '%Akumulasi%') AS accumulation,
                COUNT(*) FILTER (WHERE timing_label ILIKE '%Stabilisasi%') AS stabilization,
                COUNT(*) FILTER (WHERE timing_label ILIKE '%Hindari%') AS avoid,
                COUNT(*) FILTER (WHERE has_conflict) AS conflicting,
                COUNT(*) FILTER (WHERE NOT has_conflict) AS aligned
            FROM stocks
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        let count = |name: &str| row.get::<i64, _>(name) as u64;
        Ok(StockStats {
            total: count("total"),
            quality: QualityCounts {
                solid: count("solid"),
                fair: count("fair"),
                attention: count("attention"),
                troubled: count("troubled"),
            },
            timing: TimingCounts {
                momentum: count("momentum"),
                accumulation: count("accumulation"),
                stabilization: count("stabilization"),
                avoid: count("avoid"),
            },
            conflict: ConflictCounts {
                conflicting: count("conflicting"),
                aligned: count("aligned"),
            },
        })
    }

    async fn list_all(&self) -> Result<Vec<Stock>, DomainError> {
        let rows = sqlx::query("SELECT document FROM stocks ORDER BY ticker")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        rows_to_stocks(rows)
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Stock query failed: {}", e))
}
