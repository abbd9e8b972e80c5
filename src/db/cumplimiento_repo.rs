// src/db/cumplimiento_repo.rs
//
// Lista negra, bitácora y auditoría. Bitácora y auditoría son
// solo-inserción: no hay UPDATE ni DELETE en este repositorio.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::cumplimiento::{
        ActualizarEntradaListaNegraPayload, EntradaBitacora, EntradaListaNegra, NivelBitacora,
        RegistroAuditoria,
    },
};

const COLUMNAS_LISTA: &str = "id, nombre, rut, recintos, fecha_bloqueo, motivo, agregado_por, \
    agregado_por_id, created_at";

const COLUMNAS_BITACORA: &str = "id, mensaje, nivel, autor, ip_origen, created_at";

const COLUMNAS_AUDITORIA: &str = "id, usuario_id, entidad_id, accion, detalle, created_at";

#[derive(Clone)]
pub struct CumplimientoRepository {
    pool: PgPool,
}

impl CumplimientoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Lista negra ---

    pub async fn existe_rut_bloqueado(&self, rut: &str) -> Result<bool, AppError> {
        let existe =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lista_negra WHERE rut = $1)")
                .bind(rut)
                .fetch_one(&self.pool)
                .await?;
        Ok(existe)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn crear_entrada_lista_negra(
        &self,
        nombre: &str,
        rut: &str,
        recintos: Option<&str>,
        fecha_bloqueo: chrono::NaiveDate,
        motivo: &str,
        agregado_por: &str,
        agregado_por_id: Option<Uuid>,
    ) -> Result<EntradaListaNegra, AppError> {
        sqlx::query_as::<_, EntradaListaNegra>(&format!(
            r#"
            INSERT INTO lista_negra
                (nombre, rut, recintos, fecha_bloqueo, motivo, agregado_por, agregado_por_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNAS_LISTA}
            "#
        ))
        .bind(nombre)
        .bind(rut)
        .bind(recintos)
        .bind(fecha_bloqueo)
        .bind(motivo)
        .bind(agregado_por)
        .bind(agregado_por_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ese RUT ya está en la lista negra."))
    }

    pub async fn actualizar_entrada_lista_negra(
        &self,
        id: Uuid,
        payload: &ActualizarEntradaListaNegraPayload,
    ) -> Result<EntradaListaNegra, AppError> {
        sqlx::query_as::<_, EntradaListaNegra>(&format!(
            r#"
            UPDATE lista_negra SET
                nombre = COALESCE($2, nombre),
                recintos = COALESCE($3, recintos),
                fecha_bloqueo = COALESCE($4, fecha_bloqueo),
                motivo = COALESCE($5, motivo)
            WHERE id = $1
            RETURNING {COLUMNAS_LISTA}
            "#
        ))
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.recintos)
        .bind(payload.fecha_bloqueo)
        .bind(&payload.motivo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Entrada de lista negra".into()))
    }

    pub async fn eliminar_entrada_lista_negra(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM lista_negra WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar_lista_negra(
        &self,
        search: Option<&str>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<EntradaListaNegra>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL
                   OR nombre ILIKE '%' || $1 || '%'
                   OR rut ILIKE '%' || $1 || '%')
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM lista_negra {FILTRO}"))
                .bind(search)
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, EntradaListaNegra>(&format!(
            "SELECT {COLUMNAS_LISTA} FROM lista_negra {FILTRO} ORDER BY fecha_bloqueo DESC LIMIT $2 OFFSET $3"
        ))
        .bind(search)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }

    // --- Bitácora ---

    pub async fn insertar_bitacora(
        &self,
        mensaje: &str,
        nivel: NivelBitacora,
        autor: &str,
        ip_origen: Option<&str>,
    ) -> Result<EntradaBitacora, AppError> {
        let fila = sqlx::query_as::<_, EntradaBitacora>(&format!(
            r#"
            INSERT INTO bitacora (mensaje, nivel, autor, ip_origen)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNAS_BITACORA}
            "#
        ))
        .bind(mensaje)
        .bind(nivel)
        .bind(autor)
        .bind(ip_origen)
        .fetch_one(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn listar_bitacora(
        &self,
        search: Option<&str>,
        nivel: Option<NivelBitacora>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<EntradaBitacora>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL OR mensaje ILIKE '%' || $1 || '%')
              AND ($2::nivel_bitacora IS NULL OR nivel = $2)
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM bitacora {FILTRO}"))
                .bind(search)
                .bind(nivel.clone())
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, EntradaBitacora>(&format!(
            "SELECT {COLUMNAS_BITACORA} FROM bitacora {FILTRO} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(search)
        .bind(nivel)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }

    // --- Auditoría ---

    pub async fn insertar_auditoria(
        &self,
        usuario_id: Option<Uuid>,
        entidad_id: Option<Uuid>,
        accion: &str,
        detalle: serde_json::Value,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO auditoria (usuario_id, entidad_id, accion, detalle)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(usuario_id)
        .bind(entidad_id)
        .bind(accion)
        .bind(detalle)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn listar_auditoria(
        &self,
        accion: Option<&str>,
        usuario_id: Option<Uuid>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<RegistroAuditoria>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL OR accion = $1)
              AND ($2::uuid IS NULL OR usuario_id = $2)
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM auditoria {FILTRO}"))
                .bind(accion)
                .bind(usuario_id)
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, RegistroAuditoria>(&format!(
            "SELECT {COLUMNAS_AUDITORIA} FROM auditoria {FILTRO} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(accion)
        .bind(usuario_id)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }
}
