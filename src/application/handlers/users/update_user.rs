//! UpdateUserHandler - Admin command for editing an account.
//!
//! The admin edit is the only path besides payment reconciliation that may
//! change a subscription.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionStatus, UserTier};
use crate::domain::user::{Role, User};
use crate::ports::UserRepository;

/// Subscription fields an admin may set directly.
#[derive(Debug, Clone)]
pub struct AdminSubscriptionEdit {
    pub tier: UserTier,
    pub status: SubscriptionStatus,
    /// `None` = non-expiring.
    pub expiry_date: Option<Timestamp>,
}

/// Command to edit a user as an admin.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub subscription: Option<AdminSubscriptionEdit>,
}

/// Handler for admin user edits.
pub struct UpdateUserHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateUserCommand) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;

        let now = Timestamp::now();

        if let Some(role) = cmd.role {
            user.role = role;
        }

        if let Some(edit) = cmd.subscription {
            // Start date and payment id survive the edit; only what the
            // admin names changes.
            let current = user.subscription.clone();
            user.replace_subscription(
                Subscription {
                    tier: edit.tier,
                    status: edit.status,
                    start_date: current.start_date,
                    expiry_date: edit.expiry_date,
                    payment_id: current.payment_id,
                },
                now,
            );
            tracing::info!(user_id = %user.id, tier = %edit.tier, "Admin subscription edit");
        }

        self.users.update(&user).await?;
        Ok(user)
    }
}
