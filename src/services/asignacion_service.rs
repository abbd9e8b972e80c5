// src/services/asignacion_service.rs

use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AsignacionRepository,
    models::asignacion::{ActualizarAsignacionPayload, Asignacion, CrearAsignacionPayload},
};

/// Prueba de intervalo cerrado/cerrado: una asignación que termina
/// exactamente cuando otra empieza cuenta como superposición.
pub(crate) fn hay_superposicion(
    inicio: NaiveTime,
    fin: NaiveTime,
    existentes: &[(NaiveTime, NaiveTime)],
) -> bool {
    existentes.iter().any(|&(s, e)| {
        (inicio >= s && inicio <= e)      // el nuevo inicio cae dentro
            || (fin >= s && fin <= e)     // el nuevo fin cae dentro
            || (inicio <= s && fin >= e)  // el nuevo contiene al existente
    })
}

#[derive(Clone)]
pub struct AsignacionService {
    asignacion_repo: AsignacionRepository,
    pool: PgPool,
}

impl AsignacionService {
    pub fn new(asignacion_repo: AsignacionRepository, pool: PgPool) -> Self {
        Self {
            asignacion_repo,
            pool,
        }
    }

    pub async fn crear(&self, payload: &CrearAsignacionPayload) -> Result<Asignacion, AppError> {
        if payload.hora_fin <= payload.hora_inicio {
            return Err(AppError::ReglaDeNegocio(
                "La hora de término debe ser posterior a la de inicio.".into(),
            ));
        }

        // Chequeo e inserción dentro de la misma transacción.
        let mut tx = self.pool.begin().await?;

        let ventanas = self
            .asignacion_repo
            .ventanas_de(&mut *tx, payload.guardia_id, payload.fecha, None)
            .await?;

        if hay_superposicion(payload.hora_inicio, payload.hora_fin, &ventanas) {
            return Err(AppError::ReglaDeNegocio(
                "El guardia ya tiene una asignación que se superpone en ese horario.".into(),
            ));
        }

        let asignacion = self
            .asignacion_repo
            .crear(
                &mut *tx,
                payload.guardia_id,
                payload.instalacion_id,
                payload.fecha,
                &payload.turno,
                payload.hora_inicio,
                payload.hora_fin,
                payload.observacion.as_deref(),
            )
            .await?;

        tx.commit().await?;
        Ok(asignacion)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &ActualizarAsignacionPayload,
    ) -> Result<Asignacion, AppError> {
        let actual = self
            .asignacion_repo
            .obtener(id)
            .await?
            .ok_or_else(|| AppError::NoEncontrado("Asignación".into()))?;

        let mut tx = self.pool.begin().await?;

        // La validación solo corre cuando el payload toca guardia,
        // fecha u horario; un cambio de estado u observación pasa directo.
        if payload.afecta_horario() {
            let guardia_id = payload.guardia_id.unwrap_or(actual.guardia_id);
            let fecha = payload.fecha.unwrap_or(actual.fecha);
            let hora_inicio = payload.hora_inicio.unwrap_or(actual.hora_inicio);
            let hora_fin = payload.hora_fin.unwrap_or(actual.hora_fin);

            if hora_fin <= hora_inicio {
                return Err(AppError::ReglaDeNegocio(
                    "La hora de término debe ser posterior a la de inicio.".into(),
                ));
            }

            let ventanas = self
                .asignacion_repo
                .ventanas_de(&mut *tx, guardia_id, fecha, Some(id))
                .await?;

            if hay_superposicion(hora_inicio, hora_fin, &ventanas) {
                return Err(AppError::ReglaDeNegocio(
                    "El guardia ya tiene una asignación que se superpone en ese horario.".into(),
                ));
            }
        }

        let asignacion = self
            .asignacion_repo
            .actualizar(
                &mut *tx,
                id,
                payload.guardia_id,
                payload.instalacion_id,
                payload.fecha,
                payload.turno.as_deref(),
                payload.hora_inicio,
                payload.hora_fin,
                payload.estado.clone(),
                payload.observacion.as_deref(),
            )
            .await?;

        tx.commit().await?;
        Ok(asignacion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn sin_ventanas_no_hay_conflicto() {
        assert!(!hay_superposicion(t(8, 0), t(16, 0), &[]));
    }

    #[test]
    fn inicio_dentro_de_ventana_existente() {
        let existentes = [(t(8, 0), t(16, 0))];
        assert!(hay_superposicion(t(12, 0), t(20, 0), &existentes));
    }

    #[test]
    fn fin_dentro_de_ventana_existente() {
        let existentes = [(t(8, 0), t(16, 0))];
        assert!(hay_superposicion(t(6, 0), t(9, 0), &existentes));
    }

    #[test]
    fn nueva_contiene_a_la_existente() {
        let existentes = [(t(10, 0), t(12, 0))];
        assert!(hay_superposicion(t(8, 0), t(16, 0), &existentes));
    }

    #[test]
    fn bordes_son_inclusivos() {
        // Terminar justo cuando otra empieza cuenta como conflicto.
        let existentes = [(t(16, 0), t(23, 0))];
        assert!(hay_superposicion(t(8, 0), t(16, 0), &existentes));
        // Y empezar justo cuando otra termina, también.
        let existentes = [(t(0, 0), t(8, 0))];
        assert!(hay_superposicion(t(8, 0), t(16, 0), &existentes));
    }

    #[test]
    fn ventanas_disjuntas_no_chocan() {
        let existentes = [(t(0, 0), t(7, 59)), (t(16, 1), t(23, 59))];
        assert!(!hay_superposicion(t(8, 0), t(16, 0), &existentes));
    }
}
