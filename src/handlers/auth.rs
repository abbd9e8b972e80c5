// src/handlers/auth.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginAppPayload, LoginWebPayload, Usuario},
};

// POST /api/auth/signin/web
#[utoipa::path(
    post,
    path = "/api/auth/signin/web",
    tag = "Auth",
    request_body = LoginWebPayload,
    responses(
        (status = 200, description = "Token emitido para la cuenta administrativa", body = AuthResponse),
        (status = 401, description = "Credenciales inválidas")
    )
)]
pub async fn signin_web(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginWebPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_web(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// POST /api/auth/signin/app
#[utoipa::path(
    post,
    path = "/api/auth/signin/app",
    tag = "Auth",
    request_body = LoginAppPayload,
    responses(
        (status = 200, description = "Token emitido para el guardia de terreno", body = AuthResponse),
        (status = 401, description = "Credenciales inválidas o app no habilitada")
    )
)]
pub async fn signin_app(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginAppPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let token = app_state
        .auth_service
        .login_app(&payload.rut, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/auth/me — la cuenta administrativa autenticada
pub async fn get_me(AuthenticatedUser(usuario): AuthenticatedUser) -> Json<Usuario> {
    Json(usuario)
}
