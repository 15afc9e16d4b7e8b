//! Router for admin user endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{delete_user, get_users, update_user};

/// Admin user management routes. All require the admin role.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/:id", put(update_user).delete(delete_user))
}
