//! Router for auth endpoints.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    forgot_password, get_me, login, logout, register, reset_password, update_password,
    update_profile,
};

/// Auth API routes.
///
/// - `POST /register`, `POST /login`, `POST /forgot-password`,
///   `POST /reset-password` - public
/// - `POST /logout`, `GET /me`, `PATCH /profile`, `PUT /password` - auth
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_me))
        .route("/profile", patch(update_profile))
        .route("/password", put(update_password))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}
