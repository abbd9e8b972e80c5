// src/db/guardia_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::guardia::{ActualizarGuardiaPayload, CrearGuardiaPayload, Guardia},
};

const COLUMNAS: &str = "id, rut, nombre, apellido, email, telefono, password_hash, \
    app_habilitado, ultimo_acceso, tipo_contrato, talla_ropa, talla_calzado, banco, \
    numero_cuenta, afp_id, salud_id, estado_civil_id, comuna_id, activo, created_at, updated_at";

#[derive(Clone)]
pub struct GuardiaRepository {
    pool: PgPool,
}

impl GuardiaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Guardia>, AppError> {
        let fila = sqlx::query_as::<_, Guardia>(&format!(
            "SELECT {COLUMNAS} FROM guardias WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn buscar_por_rut(&self, rut: &str) -> Result<Option<Guardia>, AppError> {
        let fila = sqlx::query_as::<_, Guardia>(&format!(
            "SELECT {COLUMNAS} FROM guardias WHERE rut = $1"
        ))
        .bind(rut)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn crear(
        &self,
        payload: &CrearGuardiaPayload,
        password_hash: Option<&str>,
    ) -> Result<Guardia, AppError> {
        sqlx::query_as::<_, Guardia>(&format!(
            r#"
            INSERT INTO guardias (
                rut, nombre, apellido, email, telefono, password_hash, app_habilitado,
                tipo_contrato, talla_ropa, talla_calzado, banco, numero_cuenta,
                afp_id, salud_id, estado_civil_id, comuna_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(&payload.rut)
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.email)
        .bind(&payload.telefono)
        .bind(password_hash)
        .bind(payload.app_habilitado)
        .bind(&payload.tipo_contrato)
        .bind(&payload.talla_ropa)
        .bind(&payload.talla_calzado)
        .bind(&payload.banco)
        .bind(&payload.numero_cuenta)
        .bind(payload.afp_id)
        .bind(payload.salud_id)
        .bind(payload.estado_civil_id)
        .bind(payload.comuna_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe un guardia con ese RUT."))
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &ActualizarGuardiaPayload,
        password_hash: Option<&str>,
    ) -> Result<Guardia, AppError> {
        sqlx::query_as::<_, Guardia>(&format!(
            r#"
            UPDATE guardias SET
                nombre = COALESCE($2, nombre),
                apellido = COALESCE($3, apellido),
                email = COALESCE($4, email),
                telefono = COALESCE($5, telefono),
                password_hash = COALESCE($6, password_hash),
                app_habilitado = COALESCE($7, app_habilitado),
                tipo_contrato = COALESCE($8, tipo_contrato),
                talla_ropa = COALESCE($9, talla_ropa),
                talla_calzado = COALESCE($10, talla_calzado),
                banco = COALESCE($11, banco),
                numero_cuenta = COALESCE($12, numero_cuenta),
                afp_id = COALESCE($13, afp_id),
                salud_id = COALESCE($14, salud_id),
                estado_civil_id = COALESCE($15, estado_civil_id),
                comuna_id = COALESCE($16, comuna_id),
                activo = COALESCE($17, activo),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.apellido)
        .bind(&payload.email)
        .bind(&payload.telefono)
        .bind(password_hash)
        .bind(payload.app_habilitado)
        .bind(&payload.tipo_contrato)
        .bind(&payload.talla_ropa)
        .bind(&payload.talla_calzado)
        .bind(&payload.banco)
        .bind(&payload.numero_cuenta)
        .bind(payload.afp_id)
        .bind(payload.salud_id)
        .bind(payload.estado_civil_id)
        .bind(payload.comuna_id)
        .bind(payload.activo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Guardia".into()))
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM guardias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar(
        &self,
        search: Option<&str>,
        activo: Option<bool>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<Guardia>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL
                   OR nombre ILIKE '%' || $1 || '%'
                   OR apellido ILIKE '%' || $1 || '%'
                   OR rut ILIKE '%' || $1 || '%')
              AND ($2::bool IS NULL OR activo = $2)
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM guardias {FILTRO}"))
                .bind(search)
                .bind(activo)
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, Guardia>(&format!(
            "SELECT {COLUMNAS} FROM guardias {FILTRO} ORDER BY apellido, nombre LIMIT $3 OFFSET $4"
        ))
        .bind(search)
        .bind(activo)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }

    // Marca temporal del último ingreso a la app; la escribe el propio login.
    pub async fn tocar_ultimo_acceso(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE guardias SET ultimo_acceso = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // Versión transaccional de la búsqueda, para el efecto colateral
    // de auto-entrega dentro del registro de movimientos.
    pub async fn buscar_por_id_tx<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Guardia>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, Guardia>(&format!(
            "SELECT {COLUMNAS} FROM guardias WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(fila)
    }
}
