// src/handlers/reportes_operativos.rs
//
// Reportes de incidentes en terreno. Los crean tanto guardias (desde la
// app) como usuarios administrativos; la autoría sale del token, así que
// exactamente una de las dos columnas de autor queda poblada.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, paginacion::ParamsPaginacion},
    config::AppState,
    middleware::auth::{AuthenticatedUser, Identidad, Portador},
    models::reporte_operativo::{
        ActualizarReporteOperativoPayload, CrearReporteOperativoPayload,
        FiltroReportesOperativos,
    },
};

// POST /api/reportes-operativos
pub async fn crear(
    State(app_state): State<AppState>,
    Portador(identidad): Portador,
    Json(payload): Json<CrearReporteOperativoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (guardia_id, usuario_id) = match &identidad {
        Identidad::Guardia(g) => (Some(g.id), None),
        Identidad::Usuario(u) => (None, Some(u.id)),
    };

    let reporte = app_state
        .reporte_operativo_repo
        .crear(guardia_id, usuario_id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(reporte)))
}

// GET /api/reportes-operativos
pub async fn listar(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroReportesOperativos>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .reporte_operativo_repo
        .listar(
            filtro.gravedad.as_deref(),
            filtro.tipo_incidente.as_deref(),
            &pag,
        )
        .await?;

    Ok(Json(pag.envolver("reportes", total, filas)))
}

// GET /api/reportes-operativos/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let reporte = app_state
        .reporte_operativo_repo
        .obtener(id)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Reporte operativo".into()))?;

    Ok(Json(reporte))
}

// PUT /api/reportes-operativos/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarReporteOperativoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let reporte = app_state
        .reporte_operativo_repo
        .actualizar(id, &payload)
        .await?;

    Ok(Json(reporte))
}

// DELETE /api/reportes-operativos/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    _actor: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.reporte_operativo_repo.eliminar(id).await? {
        return Err(AppError::NoEncontrado("Reporte operativo".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
