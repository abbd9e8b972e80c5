// src/db/asignacion_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::asignacion::{Asignacion, AsignacionDetalle, EstadoAsignacion},
};

const COLUMNAS: &str = "id, guardia_id, instalacion_id, fecha, turno, hora_inicio, hora_fin, \
    estado, observacion, created_at, updated_at";

const DETALLE: &str = r#"
    SELECT a.id, a.guardia_id, g.nombre AS guardia_nombre, g.apellido AS guardia_apellido,
           g.rut AS guardia_rut, a.instalacion_id, i.nombre AS instalacion_nombre,
           a.fecha, a.turno, a.hora_inicio, a.hora_fin, a.estado, a.observacion
    FROM asignaciones a
    JOIN guardias g ON g.id = a.guardia_id
    JOIN instalaciones i ON i.id = a.instalacion_id
"#;

#[derive(Clone)]
pub struct AsignacionRepository {
    pool: PgPool,
}

impl AsignacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Asignacion>, AppError> {
        let fila = sqlx::query_as::<_, Asignacion>(&format!(
            "SELECT {COLUMNAS} FROM asignaciones WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn obtener_detalle(&self, id: Uuid) -> Result<Option<AsignacionDetalle>, AppError> {
        let fila = sqlx::query_as::<_, AsignacionDetalle>(&format!("{DETALLE} WHERE a.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(fila)
    }

    /// Ventanas horarias ya ocupadas por el guardia en esa fecha,
    /// opcionalmente excluyendo la fila que se está actualizando.
    pub async fn ventanas_de<'e, E>(
        &self,
        executor: E,
        guardia_id: Uuid,
        fecha: NaiveDate,
        excluir: Option<Uuid>,
    ) -> Result<Vec<(NaiveTime, NaiveTime)>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = sqlx::query_as::<_, (NaiveTime, NaiveTime)>(
            r#"
            SELECT hora_inicio, hora_fin
            FROM asignaciones
            WHERE guardia_id = $1
              AND fecha = $2
              AND ($3::uuid IS NULL OR id <> $3)
            "#,
        )
        .bind(guardia_id)
        .bind(fecha)
        .bind(excluir)
        .fetch_all(executor)
        .await?;
        Ok(filas)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        guardia_id: Uuid,
        instalacion_id: Uuid,
        fecha: NaiveDate,
        turno: &str,
        hora_inicio: NaiveTime,
        hora_fin: NaiveTime,
        observacion: Option<&str>,
    ) -> Result<Asignacion, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, Asignacion>(&format!(
            r#"
            INSERT INTO asignaciones
                (guardia_id, instalacion_id, fecha, turno, hora_inicio, hora_fin, observacion)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(guardia_id)
        .bind(instalacion_id)
        .bind(fecha)
        .bind(turno)
        .bind(hora_inicio)
        .bind(hora_fin)
        .bind(observacion)
        .fetch_one(executor)
        .await?;
        Ok(fila)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        guardia_id: Option<Uuid>,
        instalacion_id: Option<Uuid>,
        fecha: Option<NaiveDate>,
        turno: Option<&str>,
        hora_inicio: Option<NaiveTime>,
        hora_fin: Option<NaiveTime>,
        estado: Option<EstadoAsignacion>,
        observacion: Option<&str>,
    ) -> Result<Asignacion, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Asignacion>(&format!(
            r#"
            UPDATE asignaciones SET
                guardia_id = COALESCE($2, guardia_id),
                instalacion_id = COALESCE($3, instalacion_id),
                fecha = COALESCE($4, fecha),
                turno = COALESCE($5, turno),
                hora_inicio = COALESCE($6, hora_inicio),
                hora_fin = COALESCE($7, hora_fin),
                estado = COALESCE($8, estado),
                observacion = COALESCE($9, observacion),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(id)
        .bind(guardia_id)
        .bind(instalacion_id)
        .bind(fecha)
        .bind(turno)
        .bind(hora_inicio)
        .bind(hora_fin)
        .bind(estado)
        .bind(observacion)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Asignación".into()))
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM asignaciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar(
        &self,
        guardia_id: Option<Uuid>,
        instalacion_id: Option<Uuid>,
        fecha: Option<NaiveDate>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<AsignacionDetalle>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::uuid IS NULL OR a.guardia_id = $1)
              AND ($2::uuid IS NULL OR a.instalacion_id = $2)
              AND ($3::date IS NULL OR a.fecha = $3)
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM asignaciones a {FILTRO}"
        ))
        .bind(guardia_id)
        .bind(instalacion_id)
        .bind(fecha)
        .fetch_one(&self.pool)
        .await?;

        let filas = sqlx::query_as::<_, AsignacionDetalle>(&format!(
            "{DETALLE} {FILTRO} ORDER BY a.fecha DESC, a.hora_inicio LIMIT $4 OFFSET $5"
        ))
        .bind(guardia_id)
        .bind(instalacion_id)
        .bind(fecha)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }
}
