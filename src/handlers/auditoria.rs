// src/handlers/auditoria.rs

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, paginacion::ParamsPaginacion},
    config::AppState,
    middleware::rbac::{PermVerReportes, RequirePermiso},
    models::cumplimiento::FiltroAuditoria,
};

// GET /api/auditoria — solo lectura; las filas las escribe el servicio.
pub async fn listar(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerReportes>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroAuditoria>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .cumplimiento_repo
        .listar_auditoria(filtro.accion.as_deref(), filtro.usuario_id, &pag)
        .await?;

    Ok(Json(pag.envolver("registros", total, filas)))
}
