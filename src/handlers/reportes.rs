// src/handlers/reportes.rs
//
// Panel de indicadores: agregados de solo lectura sobre las tablas
// operacionales. Ningún endpoint de aquí escribe nada.

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermVerReportes, RequirePermiso},
    models::reportes::{ActividadDiaria, KpisResumen, TopProducto, TopUsuario},
};

// GET /api/reportes/kpis
#[utoipa::path(
    get,
    path = "/api/reportes/kpis",
    tag = "Reportes",
    responses(
        (status = 200, description = "Contadores globales del panel", body = KpisResumen)
    ),
    security(("bearer_auth" = []))
)]
pub async fn kpis(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerReportes>,
) -> Result<Json<KpisResumen>, AppError> {
    let resumen = app_state.reporte_repo.kpis().await?;
    Ok(Json(resumen))
}

// GET /api/reportes/semanal
#[utoipa::path(
    get,
    path = "/api/reportes/semanal",
    tag = "Reportes",
    responses(
        (status = 200, description = "Entradas y salidas por día, de lunes a domingo", body = [ActividadDiaria])
    ),
    security(("bearer_auth" = []))
)]
pub async fn actividad_semanal(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerReportes>,
) -> Result<Json<Vec<ActividadDiaria>>, AppError> {
    let dias = app_state.reporte_repo.actividad_semanal().await?;
    Ok(Json(dias))
}

// GET /api/reportes/top-productos
#[utoipa::path(
    get,
    path = "/api/reportes/top-productos",
    tag = "Reportes",
    responses(
        (status = 200, description = "Los cinco productos con más salidas del mes", body = [TopProducto])
    ),
    security(("bearer_auth" = []))
)]
pub async fn top_productos(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerReportes>,
) -> Result<Json<Vec<TopProducto>>, AppError> {
    let filas = app_state.reporte_repo.top_productos_del_mes().await?;
    Ok(Json(filas))
}

// GET /api/reportes/top-usuarios
#[utoipa::path(
    get,
    path = "/api/reportes/top-usuarios",
    tag = "Reportes",
    responses(
        (status = 200, description = "Los cinco usuarios con más movimientos del mes", body = [TopUsuario])
    ),
    security(("bearer_auth" = []))
)]
pub async fn top_usuarios(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerReportes>,
) -> Result<Json<Vec<TopUsuario>>, AppError> {
    let filas = app_state.reporte_repo.top_usuarios_del_mes().await?;
    Ok(Json(filas))
}
