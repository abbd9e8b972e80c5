// src/db/reporte_operativo_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::reporte_operativo::{
        ActualizarReporteOperativoPayload, CrearReporteOperativoPayload, ReporteOperativo,
    },
};

const COLUMNAS: &str = "id, guardia_id, usuario_id, tipo_incidente, gravedad, fecha_hora, \
    instalacion_id, lugar, descripcion, escalado, created_at";

#[derive(Clone)]
pub struct ReporteOperativoRepository {
    pool: PgPool,
}

impl ReporteOperativoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // La autoría excluyente (guardia XOR usuario) la garantiza un CHECK
    // en la tabla; aquí solo se insertan los valores que vienen del token.
    pub async fn crear(
        &self,
        guardia_id: Option<Uuid>,
        usuario_id: Option<Uuid>,
        payload: &CrearReporteOperativoPayload,
    ) -> Result<ReporteOperativo, AppError> {
        let fila = sqlx::query_as::<_, ReporteOperativo>(&format!(
            r#"
            INSERT INTO reportes_operativos
                (guardia_id, usuario_id, tipo_incidente, gravedad, fecha_hora,
                 instalacion_id, lugar, descripcion, escalado)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(guardia_id)
        .bind(usuario_id)
        .bind(&payload.tipo_incidente)
        .bind(&payload.gravedad)
        .bind(payload.fecha_hora)
        .bind(payload.instalacion_id)
        .bind(&payload.lugar)
        .bind(&payload.descripcion)
        .bind(payload.escalado)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<ReporteOperativo>, AppError> {
        let fila = sqlx::query_as::<_, ReporteOperativo>(&format!(
            "SELECT {COLUMNAS} FROM reportes_operativos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &ActualizarReporteOperativoPayload,
    ) -> Result<ReporteOperativo, AppError> {
        sqlx::query_as::<_, ReporteOperativo>(&format!(
            r#"
            UPDATE reportes_operativos SET
                tipo_incidente = COALESCE($2, tipo_incidente),
                gravedad = COALESCE($3, gravedad),
                fecha_hora = COALESCE($4, fecha_hora),
                instalacion_id = COALESCE($5, instalacion_id),
                lugar = COALESCE($6, lugar),
                descripcion = COALESCE($7, descripcion),
                escalado = COALESCE($8, escalado)
            WHERE id = $1
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(id)
        .bind(&payload.tipo_incidente)
        .bind(&payload.gravedad)
        .bind(payload.fecha_hora)
        .bind(payload.instalacion_id)
        .bind(&payload.lugar)
        .bind(&payload.descripcion)
        .bind(payload.escalado)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Reporte operativo".into()))
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM reportes_operativos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar(
        &self,
        gravedad: Option<&str>,
        tipo_incidente: Option<&str>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<ReporteOperativo>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL OR gravedad = $1)
              AND ($2::text IS NULL OR tipo_incidente = $2)
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM reportes_operativos {FILTRO}"
        ))
        .bind(gravedad)
        .bind(tipo_incidente)
        .fetch_one(&self.pool)
        .await?;

        let filas = sqlx::query_as::<_, ReporteOperativo>(&format!(
            "SELECT {COLUMNAS} FROM reportes_operativos {FILTRO} ORDER BY fecha_hora DESC LIMIT $3 OFFSET $4"
        ))
        .bind(gravedad)
        .bind(tipo_incidente)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }
}
