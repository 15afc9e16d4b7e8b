//! Authentication middleware and extractors.
//!
//! The middleware validates `Authorization: Bearer <jwt>` tokens, loads
//! the account, and injects it into request extensions. Handlers receive
//! the principal through the [`RequireAuth`] / [`RequireAdmin`]
//! extractors as an explicit parameter; no handler reads ambient request
//! state directly.
//!
//! ```text
//! Request → auth_middleware → injects User into extensions
//!                                      ↓
//!                              Handler → RequireAuth(user)
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::user::User;
use crate::ports::AuthError;

use super::super::error::ErrorResponse;
use super::super::state::AppState;

/// Validates bearer tokens and loads the account.
///
/// - Missing token: passes through; handlers without `RequireAuth` stay
///   public, the extractor rejects the rest.
/// - Invalid or expired token: 401 immediately.
/// - Valid token whose account is gone: 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return next.run(request).await;
    };

    let user_id = match state.tokens.validate(token) {
        Ok(user_id) => user_id,
        Err(e) => {
            let message = match e {
                AuthError::TokenExpired => "Token expired",
                AuthError::InvalidToken => "Invalid token",
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("UNAUTHORIZED", message)),
            )
                .into_response();
        }
    };

    match state.users.find_by_id(&user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("UNAUTHORIZED", "Account no longer exists")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Principal lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("INTERNAL_ERROR", "Server Error")),
            )
                .into_response()
        }
    }
}

/// Extractor that requires an authenticated principal.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub User);

/// Rejection for missing authentication.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("UNAUTHORIZED", "Authentication is required")),
        )
            .into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<User>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthenticationRequired)
        })
    }
}

/// Extractor that additionally requires the admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

/// Rejection for missing admin role.
pub enum AdminRejection {
    Unauthenticated,
    NotAdmin,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            AdminRejection::Unauthenticated => AuthenticationRequired.into_response(),
            AdminRejection::NotAdmin => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new("FORBIDDEN", "Admin access required")),
            )
                .into_response(),
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts
                .extensions
                .get::<User>()
                .cloned()
                .ok_or(AdminRejection::Unauthenticated)?;
            if !user.is_admin() {
                return Err(AdminRejection::NotAdmin);
            }
            Ok(RequireAdmin(user))
        })
    }
}
