//! Watchlist repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::watchlist::Watchlist;

/// Repository port for Watchlist aggregate persistence.
///
/// The aggregate is saved whole: implementations replace the user's entry
/// set with the aggregate's current entries.
#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// A user's watchlist, or `None` if they never created one.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Watchlist>, DomainError>;

    /// Persist the aggregate (create or replace).
    async fn save(&self, watchlist: &Watchlist) -> Result<(), DomainError>;

    /// Remove a user's watchlist entirely (account deletion cascade).
    async fn delete_for_user(&self, user_id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn watchlist_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn WatchlistRepository) {}
    }
}
