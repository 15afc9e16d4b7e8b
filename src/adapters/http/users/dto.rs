//! HTTP DTOs for admin user endpoints.

use serde::Deserialize;

use crate::application::handlers::users::AdminSubscriptionEdit;
use crate::domain::foundation::Timestamp;
use crate::domain::subscription::{SubscriptionStatus, UserTier};
use crate::domain::user::Role;

/// Admin edit of a user's subscription.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionEditRequest {
    pub tier: UserTier,
    pub status: SubscriptionStatus,
    /// ISO 8601, omitted or null for non-expiring.
    #[serde(default)]
    pub expiry_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<SubscriptionEditRequest> for AdminSubscriptionEdit {
    fn from(req: SubscriptionEditRequest) -> Self {
        AdminSubscriptionEdit {
            tier: req.tier,
            status: req.status,
            expiry_date: req.expiry_date.map(Timestamp::from_datetime),
        }
    }
}

/// Admin edit of a user.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub subscription: Option<SubscriptionEditRequest>,
}
