//! HTTP handlers for auth endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::auth::{
    ChangePasswordCommand, LoginUserCommand, RegisterUserCommand, RequestPasswordResetCommand,
    ResetPasswordCommand, UpdateProfileCommand,
};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::super::state::AppState;
use super::dto::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, MessageResponse,
    RegisterRequest, ResetPasswordRequest, UpdateProfileRequest, UserResponse,
};

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .register_handler()
        .handle(RegisterUserCommand {
            full_name: body.full_name,
            email: body.email,
            phone_number: body.phone_number,
            password: body.password,
        })
        .await?;

    let response = AuthResponse {
        user: UserResponse::from(&result.user),
        token: result.token,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .login_handler()
        .handle(LoginUserCommand {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(&result.user),
        token: result.token,
    }))
}

/// POST /api/auth/logout
///
/// Bearer tokens are stateless; the client discards its copy.
pub async fn logout() -> impl IntoResponse {
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/me
pub async fn get_me(RequireAuth(principal): RequireAuth) -> impl IntoResponse {
    Json(UserResponse::from(&principal))
}

/// PATCH /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            principal,
            full_name: body.full_name,
            phone_number: body.phone_number,
        })
        .await?;

    Ok(Json(UserResponse::from(&updated)))
}

/// PUT /api/auth/password
pub async fn update_password(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .change_password_handler()
        .handle(ChangePasswordCommand {
            principal,
            current_password: body.current_password,
            new_password: body.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// POST /api/auth/forgot-password
///
/// Always answers neutrally, whether or not the email has an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .request_password_reset_handler()
        .handle(RequestPasswordResetCommand { email: body.email })
        .await?;

    Ok(Json(MessageResponse::new(
        "If an account with that email exists, a reset link has been sent.",
    )))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .reset_password_handler()
        .handle(ResetPasswordCommand {
            token: body.token,
            new_password: body.new_password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Password has been reset")))
}
