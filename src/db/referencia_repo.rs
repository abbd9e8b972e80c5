// src/db/referencia_repo.rs
//
// Lecturas sobre las tablas de referencia. Se cargan por migración y la
// aplicación nunca las escribe.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::referencias::{Afp, Comuna, EstadoCivil, Instalacion, Permiso, Region, Rol, SistemaSalud},
};

#[derive(Clone)]
pub struct ReferenciaRepository {
    pool: PgPool,
}

impl ReferenciaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar_regiones(&self) -> Result<Vec<Region>, AppError> {
        let filas = sqlx::query_as::<_, Region>("SELECT id, nombre FROM regiones ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn listar_comunas(&self, region_id: Option<Uuid>) -> Result<Vec<Comuna>, AppError> {
        let filas = sqlx::query_as::<_, Comuna>(
            r#"
            SELECT id, region_id, nombre
            FROM comunas
            WHERE ($1::uuid IS NULL OR region_id = $1)
            ORDER BY nombre
            "#,
        )
        .bind(region_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_instalaciones(&self) -> Result<Vec<Instalacion>, AppError> {
        let filas = sqlx::query_as::<_, Instalacion>(
            "SELECT id, nombre, direccion, comuna_id FROM instalaciones ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_roles(&self) -> Result<Vec<Rol>, AppError> {
        let filas = sqlx::query_as::<_, Rol>("SELECT id, nombre FROM roles ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn listar_permisos(&self) -> Result<Vec<Permiso>, AppError> {
        let filas = sqlx::query_as::<_, Permiso>(
            "SELECT id, slug, descripcion FROM permisos ORDER BY slug",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_afps(&self) -> Result<Vec<Afp>, AppError> {
        let filas = sqlx::query_as::<_, Afp>("SELECT id, nombre FROM afps ORDER BY nombre")
            .fetch_all(&self.pool)
            .await?;
        Ok(filas)
    }

    pub async fn listar_sistemas_salud(&self) -> Result<Vec<SistemaSalud>, AppError> {
        let filas = sqlx::query_as::<_, SistemaSalud>(
            "SELECT id, nombre FROM sistemas_salud ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn listar_estados_civiles(&self) -> Result<Vec<EstadoCivil>, AppError> {
        let filas = sqlx::query_as::<_, EstadoCivil>(
            "SELECT id, nombre FROM estados_civiles ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }
}
