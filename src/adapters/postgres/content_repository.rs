//! PostgreSQL implementations of the content repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::content::{Faq, NewsArticle, WikiEntry};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{FaqRepository, NewsPage, NewsRepository, WikiRepository};

/// PostgreSQL implementation of the FaqRepository port.
pub struct PostgresFaqRepository {
    pool: PgPool,
}

impl PostgresFaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FaqRow {
    id: i64,
    question: String,
    answer: String,
    category: String,
    note: Option<String>,
    is_active: bool,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Faq {
            id: row.id,
            question: row.question,
            answer: row.answer,
            category: row.category,
            note: row.note,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl FaqRepository for PostgresFaqRepository {
    async fn list_active(&self, category: Option<&str>) -> Result<Vec<Faq>, DomainError> {
        let rows: Vec<FaqRow> = match category {
            Some(category) => {
                sqlx::query_as(
                    "SELECT id, question, answer, category, note, is_active FROM faqs \
                     WHERE is_active AND category = $1 ORDER BY category, question",
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, question, answer, category, note, is_active FROM faqs \
                     WHERE is_active ORDER BY category, question",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Faq::from).collect())
    }
}

/// PostgreSQL implementation of the NewsRepository port.
pub struct PostgresNewsRepository {
    pool: PgPool,
}

impl PostgresNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct NewsRow {
    id: i64,
    headline: String,
    content: String,
    date: DateTime<Utc>,
    image: Option<String>,
}

impl From<NewsRow> for NewsArticle {
    fn from(row: NewsRow) -> Self {
        NewsArticle {
            id: row.id,
            headline: row.headline,
            content: row.content,
            date: Timestamp::from_datetime(row.date),
            image: row.image,
        }
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<NewsPage, DomainError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let total: i64 = match &pattern {
            Some(pattern) => {
                sqlx::query(
                    "SELECT COUNT(*) AS total FROM news \
                     WHERE headline ILIKE $1 OR content ILIKE $1",
                )
                .bind(pattern)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS total FROM news")
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(db_error)?
        .get("total");

        let limit = limit.max(1) as i64;
        let offset = (page.max(1) as i64 - 1) * limit;

        let rows: Vec<NewsRow> = match &pattern {
            Some(pattern) => {
                sqlx::query_as(
                    "SELECT id, headline, content, date, image FROM news \
                     WHERE headline ILIKE $1 OR content ILIKE $1 \
                     ORDER BY date DESC LIMIT $2 OFFSET $3",
                )
                .bind(pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    "SELECT id, headline, content, date, image FROM news \
                     ORDER BY date DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_error)?;

        Ok(NewsPage {
            data: rows.into_iter().map(NewsArticle::from).collect(),
            current_page: page.max(1),
            total_pages: ((total as f64) / (limit as f64)).ceil() as u32,
            total_items: total as u64,
        })
    }
}

/// PostgreSQL implementation of the WikiRepository port.
pub struct PostgresWikiRepository {
    pool: PgPool,
}

impl PostgresWikiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WikiRow {
    id: i64,
    field_name: String,
    field_category: String,
    what_is_it: String,
    score_min: Option<f64>,
    score_max: Option<f64>,
    range_label: String,
    range_emoji: String,
    range_description: String,
    actionable_insight: String,
    display_order: i32,
}

impl From<WikiRow> for WikiEntry {
    fn from(row: WikiRow) -> Self {
        WikiEntry {
            id: row.id,
            field_name: row.field_name,
            field_category: row.field_category,
            what_is_it: row.what_is_it,
            score_min: row.score_min,
            score_max: row.score_max,
            range_label: row.range_label,
            range_emoji: row.range_emoji,
            range_description: row.range_description,
            actionable_insight: row.actionable_insight,
            display_order: row.display_order,
        }
    }
}

const WIKI_COLUMNS: &str = "id, field_name, field_category, what_is_it, score_min, score_max, \
range_label, range_emoji, range_description, actionable_insight, display_order";

#[async_trait]
impl WikiRepository for PostgresWikiRepository {
    async fn list(&self, category: Option<&str>) -> Result<Vec<WikiEntry>, DomainError> {
        let rows: Vec<WikiRow> = match category {
            Some(category) => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM wikis WHERE field_category = $1 ORDER BY display_order",
                    WIKI_COLUMNS
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {} FROM wikis ORDER BY field_category, display_order",
                    WIKI_COLUMNS
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(db_error)?;

        Ok(rows.into_iter().map(WikiEntry::from).collect())
    }
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Content query failed: {}", e),
    )
}
