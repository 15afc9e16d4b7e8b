//! Stock import source port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::stock::Stock;

/// Port for the relational analytics source the daily import reads from.
///
/// Implementations own the row-to-document mapping; the job only sees
/// ready-to-upsert [`Stock`] values.
#[async_trait]
pub trait StockImportSource: Send + Sync {
    /// Fetch every stock row from the source, mapped to documents.
    async fn fetch_all(&self) -> Result<Vec<Stock>, DomainError>;
}
