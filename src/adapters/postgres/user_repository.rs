//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus, UserTier};
use crate::domain::user::{Preferences, Role, Theme, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    phone_number: String,
    password_hash: String,
    full_name: String,
    role: String,
    sub_tier: String,
    sub_status: String,
    sub_start: DateTime<Utc>,
    sub_expiry: Option<DateTime<Utc>>,
    sub_payment_id: Option<String>,
    pref_theme: String,
    pref_notifications: bool,
    reset_token_hash: Option<String>,
    reset_token_expires: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // Unknown stored tiers and statuses fail safe: Free grants nothing,
        // Expired denies access.
        let tier = UserTier::parse(&row.sub_tier).unwrap_or(UserTier::Free);
        let status = SubscriptionStatus::parse(&row.sub_status).unwrap_or(SubscriptionStatus::Expired);

        User {
            id: UserId::from_uuid(row.id),
            email: row.email,
            phone_number: row.phone_number,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: Role::parse(&row.role).unwrap_or(Role::User),
            subscription: Subscription {
                tier,
                status,
                start_date: Timestamp::from_datetime(row.sub_start),
                expiry_date: row.sub_expiry.map(Timestamp::from_datetime),
                payment_id: row.sub_payment_id,
            },
            preferences: Preferences {
                theme: match row.pref_theme.as_str() {
                    "light" => Theme::Light,
                    _ => Theme::Dark,
                },
                notifications: row.pref_notifications,
            },
            reset_token_hash: row.reset_token_hash,
            reset_token_expires: row.reset_token_expires.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn theme_to_string(theme: &Theme) -> &'static str {
    match theme {
        Theme::Dark => "dark",
        Theme::Light => "light",
    }
}

const SELECT_COLUMNS: &str = r#"
    id, email, phone_number, password_hash, full_name, role,
    sub_tier, sub_status, sub_start, sub_expiry, sub_payment_id,
    pref_theme, pref_notifications, reset_token_hash, reset_token_expires,
    created_at, updated_at
"#;

fn map_unique_violation(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("users_email_key") => {
                return DomainError::new(ErrorCode::DuplicateEntry, "Email already registered")
            }
            Some("users_phone_number_key") => {
                return DomainError::new(
                    ErrorCode::DuplicateEntry,
                    "Phone number already registered",
                )
            }
            _ => {}
        }
    }
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to save user: {}", e))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, phone_number, password_hash, full_name, role,
                sub_tier, sub_status, sub_start, sub_expiry, sub_payment_id,
                pref_theme, pref_notifications, reset_token_hash, reset_token_expires,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.subscription.tier.as_str())
        .bind(user.subscription.status.as_str())
        .bind(user.subscription.start_date.as_datetime())
        .bind(user.subscription.expiry_date.map(|t| *t.as_datetime()))
        .bind(&user.subscription.payment_id)
        .bind(theme_to_string(&user.preferences.theme))
        .bind(user.preferences.notifications)
        .bind(&user.reset_token_hash)
        .bind(user.reset_token_expires.map(|t| *t.as_datetime()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                phone_number = $3,
                password_hash = $4,
                full_name = $5,
                role = $6,
                sub_tier = $7,
                sub_status = $8,
                sub_start = $9,
                sub_expiry = $10,
                sub_payment_id = $11,
                pref_theme = $12,
                pref_notifications = $13,
                reset_token_hash = $14,
                reset_token_expires = $15,
                updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.subscription.tier.as_str())
        .bind(user.subscription.status.as_str())
        .bind(user.subscription.start_date.as_datetime())
        .bind(user.subscription.expiry_date.map(|t| *t.as_datetime()))
        .bind(&user.subscription.payment_id)
        .bind(theme_to_string(&user.preferences.theme))
        .bind(user.preferences.notifications)
        .bind(&user.reset_token_hash)
        .bind(user.reset_token_expires.map(|t| *t.as_datetime()))
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", SELECT_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_email_or_phone(
        &self,
        email: &str,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE email = $1 OR phone_number = $2",
            SELECT_COLUMNS
        ))
        .bind(email)
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE reset_token_hash = $1",
            SELECT_COLUMNS
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::UserNotFound, "User not found"));
        }
        Ok(())
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("User query failed: {}", e))
}
