// src/db/usuario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::auth::Usuario,
};

const COLUMNAS: &str = "id, nombre, email, password_hash, rol_id, activo, created_at, updated_at";

// Repositorio de cuentas administrativas y de sus vínculos
// usuario↔permiso y usuario↔región.
#[derive(Clone)]
pub struct UsuarioRepository {
    pool: PgPool,
}

impl UsuarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_email(&self, email: &str) -> Result<Option<Usuario>, AppError> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn buscar_por_id(&self, id: Uuid) -> Result<Option<Usuario>, AppError> {
        let fila = sqlx::query_as::<_, Usuario>(&format!(
            "SELECT {COLUMNAS} FROM usuarios WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        email: &str,
        password_hash: &str,
        rol_id: Uuid,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(&format!(
            r#"
            INSERT INTO usuarios (nombre, email, password_hash, rol_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(nombre)
        .bind(email)
        .bind(password_hash)
        .bind(rol_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe un usuario con ese e-mail."))
    }

    pub async fn actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nombre: Option<&str>,
        email: Option<&str>,
        rol_id: Option<Uuid>,
        activo: Option<bool>,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Usuario>(&format!(
            r#"
            UPDATE usuarios SET
                nombre = COALESCE($2, nombre),
                email = COALESCE($3, email),
                rol_id = COALESCE($4, rol_id),
                activo = COALESCE($5, activo),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNAS}
            "#
        ))
        .bind(id)
        .bind(nombre)
        .bind(email)
        .bind(rol_id)
        .bind(activo)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe un usuario con ese e-mail."))?
        .ok_or_else(|| AppError::NoEncontrado("Usuario".into()))
    }

    pub async fn actualizar_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE usuarios SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar(
        &self,
        search: Option<&str>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<Usuario>), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM usuarios
            WHERE ($1::text IS NULL OR nombre ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            "#,
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        let filas = sqlx::query_as::<_, Usuario>(&format!(
            r#"
            SELECT {COLUMNAS} FROM usuarios
            WHERE ($1::text IS NULL OR nombre ILIKE '%' || $1 || '%' OR email ILIKE '%' || $1 || '%')
            ORDER BY nombre
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(search)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }

    // --- Vínculos muchos-a-muchos ---
    //
    // Reemplazo total: se borran los vínculos actuales y se insertan los
    // nuevos dentro de la transacción que maneja el servicio.

    pub async fn reemplazar_permisos(
        &self,
        conn: &mut sqlx::PgConnection,
        usuario_id: Uuid,
        slugs: &[String],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM usuario_permisos WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO usuario_permisos (usuario_id, permiso_id)
            SELECT $1, p.id FROM permisos p WHERE p.slug = ANY($2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(usuario_id)
        .bind(slugs)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn reemplazar_regiones(
        &self,
        conn: &mut sqlx::PgConnection,
        usuario_id: Uuid,
        regiones: &[Uuid],
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM usuario_regiones WHERE usuario_id = $1")
            .bind(usuario_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO usuario_regiones (usuario_id, region_id)
            SELECT $1, unnest($2::uuid[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(usuario_id)
        .bind(regiones)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    pub async fn permisos_de(&self, usuario_id: Uuid) -> Result<Vec<String>, AppError> {
        let slugs = sqlx::query_scalar::<_, String>(
            r#"
            SELECT p.slug
            FROM usuario_permisos up
            JOIN permisos p ON p.id = up.permiso_id
            WHERE up.usuario_id = $1
            ORDER BY p.slug
            "#,
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(slugs)
    }

    pub async fn regiones_de(&self, usuario_id: Uuid) -> Result<Vec<Uuid>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT region_id FROM usuario_regiones WHERE usuario_id = $1",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    pub async fn tiene_permiso(&self, usuario_id: Uuid, slug: &str) -> Result<bool, AppError> {
        let existe = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM usuario_permisos up
                JOIN permisos p ON p.id = up.permiso_id
                WHERE up.usuario_id = $1 AND p.slug = $2
            )
            "#,
        )
        .bind(usuario_id)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(existe)
    }
}
