//! PostgreSQL implementation of OrderRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::payment::{Order, OrderId, OrderStatus};
use crate::domain::subscription::UserTier;
use crate::ports::OrderRepository;

/// PostgreSQL implementation of the OrderRepository port.
///
/// `order_id` is the primary key; the same-user-same-millisecond collision
/// documented on [`OrderId`] surfaces here as `DuplicateEntry`.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    user_id: Uuid,
    tier: String,
    amount: i64,
    status: String,
    snap_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_id = OrderId::parse(&row.order_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Corrupt order id: {}", e))
        })?;
        let status = OrderStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid order status value: {}", row.status),
            )
        })?;
        let tier = UserTier::parse(&row.tier).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid tier value: {}", row.tier),
            )
        })?;

        Ok(Order {
            order_id,
            user_id: UserId::from_uuid(row.user_id),
            tier,
            amount: row.amount,
            status,
            snap_token: row.snap_token,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "order_id, user_id, tier, amount, status, snap_token, created_at, updated_at";

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO orders (
                order_id, user_id, tier, amount, status, snap_token, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.order_id.as_str())
        .bind(order.user_id.as_uuid())
        .bind(order.tier.as_str())
        .bind(order.amount)
        .bind(order.status.as_str())
        .bind(&order.snap_token)
        .bind(order.created_at.as_datetime())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("orders_pkey") {
                    return DomainError::new(ErrorCode::DuplicateEntry, "Order id already exists");
                }
            }
            db_error(e)
        })?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE orders SET status = $2, updated_at = $3 WHERE order_id = $1",
        )
        .bind(order.order_id.as_str())
        .bind(order.status.as_str())
        .bind(order.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::OrderNotFound, "Order not found"));
        }
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, DomainError> {
        let row: Option<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE order_id = $1",
            SELECT_COLUMNS
        ))
        .bind(order_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Order::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn fail_pending_for_user(&self, user_id: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE orders SET status = 'failed', updated_at = now() \
             WHERE user_id = $1 AND status = 'pending'",
        )
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn list_challenged(&self) -> Result<Vec<Order>, DomainError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE status = 'challenge' ORDER BY created_at ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Order::try_from).collect()
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Order query failed: {}", e))
}
