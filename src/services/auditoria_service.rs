// src/services/auditoria_service.rs
//
// Auditoría de mejor esfuerzo: si el registro falla, la operación
// principal ya está confirmada y no se revierte. La falla queda en el
// log de la aplicación, nunca silenciada.

use uuid::Uuid;

use crate::db::CumplimientoRepository;

#[derive(Clone)]
pub struct AuditoriaService {
    cumplimiento_repo: CumplimientoRepository,
}

impl AuditoriaService {
    pub fn new(cumplimiento_repo: CumplimientoRepository) -> Self {
        Self { cumplimiento_repo }
    }

    pub async fn registrar(
        &self,
        usuario_id: Option<Uuid>,
        entidad_id: Option<Uuid>,
        accion: &str,
        detalle: serde_json::Value,
    ) {
        if let Err(e) = self
            .cumplimiento_repo
            .insertar_auditoria(usuario_id, entidad_id, accion, detalle)
            .await
        {
            tracing::warn!(accion, error = ?e, "No se pudo escribir el registro de auditoría");
        }
    }
}
