// src/db/entrega_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::entrega::{Entrega, EntregaItem, EstadoEntrega},
};

const COLUMNAS: &str = "id, receptor_nombre, receptor_rut, guardia_id, usuario_id, responsable, \
    fecha, estado, firma, created_at";

const COLUMNAS_ITEM: &str = "id, entrega_id, producto_id, nombre_item, cantidad, talla, tipo";

#[derive(Clone)]
pub struct EntregaRepository {
    pool: PgPool,
}

impl EntregaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insertar_cabecera<'e, E>(
        &self,
        executor: E,
        receptor_nombre: &str,
        receptor_rut: &str,
        guardia_id: Option<Uuid>,
        usuario_id: Option<Uuid>,
        responsable: &str,
        fecha: NaiveDate,
        estado: EstadoEntrega,
        firma: Option<&str>,
    ) -> Result<Entrega, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, Entrega>(&format!(
            r#"
            INSERT INTO entregas_epp
                (receptor_nombre, receptor_rut, guardia_id, usuario_id, responsable, fecha, estado, firma)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(receptor_nombre)
        .bind(receptor_rut)
        .bind(guardia_id)
        .bind(usuario_id)
        .bind(responsable)
        .bind(fecha)
        .bind(estado)
        .bind(firma)
        .fetch_one(executor)
        .await?;
        Ok(fila)
    }

    pub async fn insertar_item<'e, E>(
        &self,
        executor: E,
        entrega_id: Uuid,
        producto_id: Option<Uuid>,
        nombre_item: &str,
        cantidad: i32,
        talla: &str,
        tipo: &str,
    ) -> Result<EntregaItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, EntregaItem>(&format!(
            r#"
            INSERT INTO entregas_epp_items
                (entrega_id, producto_id, nombre_item, cantidad, talla, tipo)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNAS_ITEM}
            "#
        ))
        .bind(entrega_id)
        .bind(producto_id)
        .bind(nombre_item)
        .bind(cantidad)
        .bind(talla)
        .bind(tipo)
        .fetch_one(executor)
        .await?;
        Ok(fila)
    }

    /// Entregas de un guardia en una fecha, sin filtrar por estado. El
    /// efecto colateral de auto-entrega decide aparte cuál cabecera es
    /// reutilizable.
    pub async fn entregas_del_dia<'e, E>(
        &self,
        executor: E,
        guardia_id: Uuid,
        fecha: NaiveDate,
    ) -> Result<Vec<Entrega>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let filas = sqlx::query_as::<_, Entrega>(&format!(
            r#"
            SELECT {COLUMNAS} FROM entregas_epp
            WHERE guardia_id = $1 AND fecha = $2
            ORDER BY created_at
            "#
        ))
        .bind(guardia_id)
        .bind(fecha)
        .fetch_all(executor)
        .await?;
        Ok(filas)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Entrega>, AppError> {
        let fila = sqlx::query_as::<_, Entrega>(&format!(
            "SELECT {COLUMNAS} FROM entregas_epp WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn items_de(&self, entrega_id: Uuid) -> Result<Vec<EntregaItem>, AppError> {
        let filas = sqlx::query_as::<_, EntregaItem>(&format!(
            "SELECT {COLUMNAS_ITEM} FROM entregas_epp_items WHERE entrega_id = $1 ORDER BY id"
        ))
        .bind(entrega_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn firmar(&self, id: Uuid, firma: &str) -> Result<Entrega, AppError> {
        sqlx::query_as::<_, Entrega>(&format!(
            r#"
            UPDATE entregas_epp
            SET firma = $2, estado = 'Firmado'
            WHERE id = $1 AND estado = 'Borrador'
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(id)
        .bind(firma)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ReglaDeNegocio("La entrega no existe o ya fue firmada.".into()))
    }

    pub async fn listar(
        &self,
        guardia_id: Option<Uuid>,
        estado: Option<EstadoEntrega>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<Entrega>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::uuid IS NULL OR guardia_id = $1)
              AND ($2::estado_entrega IS NULL OR estado = $2)
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM entregas_epp {FILTRO}"))
                .bind(guardia_id)
                .bind(estado.clone())
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, Entrega>(&format!(
            "SELECT {COLUMNAS} FROM entregas_epp {FILTRO} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(guardia_id)
        .bind(estado)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }
}
