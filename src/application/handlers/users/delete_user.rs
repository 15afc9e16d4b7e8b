//! DeleteUserHandler - Admin command for removing an account.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{UserRepository, WatchlistRepository};

/// Command to delete a user.
#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub user_id: UserId,
}

/// Handler for account deletion.
///
/// Watchlist rows are removed through the repository; order rows go with
/// the user via the database's foreign-key cascade. This is the one path
/// that deletes orders at all.
pub struct DeleteUserHandler {
    users: Arc<dyn UserRepository>,
    watchlists: Arc<dyn WatchlistRepository>,
}

impl DeleteUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, watchlists: Arc<dyn WatchlistRepository>) -> Self {
        Self { users, watchlists }
    }

    pub async fn handle(&self, cmd: DeleteUserCommand) -> Result<(), DomainError> {
        self.watchlists.delete_for_user(&cmd.user_id).await?;
        self.users.delete(&cmd.user_id).await?;
        tracing::info!(user_id = %cmd.user_id, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::payment::test_support::InMemoryUserRepository;
    use crate::application::handlers::test_support::InMemoryWatchlistRepository;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::{limits_for, UserTier};
    use crate::domain::user::User;
    use crate::domain::watchlist::Watchlist;

    #[tokio::test]
    async fn deletes_user_and_watchlist() {
        let users = Arc::new(InMemoryUserRepository::new());
        let watchlists = Arc::new(InMemoryWatchlistRepository::new());

        let user = User::register("l@x.id", "+62811111111", "h", "L", Timestamp::now());
        users.save(&user).await.unwrap();

        let mut watchlist = Watchlist::empty(user.id);
        watchlist
            .add("BBCA", &limits_for(UserTier::Free), Timestamp::now())
            .unwrap();
        watchlists.save(&watchlist).await.unwrap();

        let handler = DeleteUserHandler::new(users.clone(), watchlists.clone());
        handler.handle(DeleteUserCommand { user_id: user.id }).await.unwrap();

        assert!(users.find_by_id(&user.id).await.unwrap().is_none());
        assert!(watchlists.find_by_user(&user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_user_errors() {
        let handler = DeleteUserHandler::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryWatchlistRepository::new()),
        );
        assert!(handler
            .handle(DeleteUserCommand { user_id: UserId::new() })
            .await
            .is_err());
    }
}
