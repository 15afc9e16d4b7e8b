//! HTTP DTOs for auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::subscription::Subscription;
use crate::domain::user::{Role, User};

/// Registration request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Login request.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Forgot-password request.
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Reset-password request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// Public profile shape. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub subscription: Subscription,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role,
            subscription: user.subscription.clone(),
        }
    }
}

/// Profile plus a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
}

/// Generic acknowledgement body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
