// src/handlers/referencias.rs
//
// Catálogos de solo lectura para poblar selectores del frontend.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::referencias::FiltroComunas,
};

// GET /api/regiones
pub async fn listar_regiones(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_regiones().await?))
}

// GET /api/comunas?region_id=...
pub async fn listar_comunas(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Query(filtro): Query<FiltroComunas>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        app_state
            .referencia_repo
            .listar_comunas(filtro.region_id)
            .await?,
    ))
}

// GET /api/instalaciones
pub async fn listar_instalaciones(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_instalaciones().await?))
}

// GET /api/roles
pub async fn listar_roles(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_roles().await?))
}

// GET /api/permisos
pub async fn listar_permisos(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_permisos().await?))
}

// GET /api/afps
pub async fn listar_afps(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_afps().await?))
}

// GET /api/sistemas-salud
pub async fn listar_sistemas_salud(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_sistemas_salud().await?))
}

// GET /api/estados-civiles
pub async fn listar_estados_civiles(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(app_state.referencia_repo.listar_estados_civiles().await?))
}
