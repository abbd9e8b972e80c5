// src/db/inventario_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, paginacion::Paginacion},
    models::inventario::{
        ActualizarProductoPayload, Categoria, Direccion, Movimiento, MovimientoDetalle, Producto,
        TipoMovimiento,
    },
};

const COLUMNAS_PRODUCTO: &str =
    "id, nombre, stock_actual, stock_minimo, categoria_id, activo, created_at, updated_at";

const COLUMNAS_MOVIMIENTO: &str = "id, producto_id, usuario_id, tipo_movimiento_id, cantidad, \
    stock_resultante, documento_asociado, created_at";

#[derive(Clone)]
pub struct InventarioRepository {
    pool: PgPool,
}

impl InventarioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Categorías ---

    pub async fn listar_categorias(&self) -> Result<Vec<Categoria>, AppError> {
        let filas =
            sqlx::query_as::<_, Categoria>("SELECT id, nombre FROM categorias ORDER BY nombre")
                .fetch_all(&self.pool)
                .await?;
        Ok(filas)
    }

    pub async fn crear_categoria(&self, nombre: &str) -> Result<Categoria, AppError> {
        sqlx::query_as::<_, Categoria>(
            "INSERT INTO categorias (nombre) VALUES ($1) RETURNING id, nombre",
        )
        .bind(nombre)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe una categoría con ese nombre."))
    }

    pub async fn eliminar_categoria(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM categorias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    // --- Tipos de movimiento ---

    pub async fn listar_tipos(&self) -> Result<Vec<TipoMovimiento>, AppError> {
        let filas = sqlx::query_as::<_, TipoMovimiento>(
            "SELECT id, nombre, direccion FROM tipos_movimiento ORDER BY nombre",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn obtener_tipo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<TipoMovimiento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, TipoMovimiento>(
            "SELECT id, nombre, direccion FROM tipos_movimiento WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(fila)
    }

    pub async fn tipo_por_nombre<'e, E>(
        &self,
        executor: E,
        nombre: &str,
    ) -> Result<Option<TipoMovimiento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, TipoMovimiento>(
            "SELECT id, nombre, direccion FROM tipos_movimiento WHERE nombre = $1",
        )
        .bind(nombre)
        .fetch_optional(executor)
        .await?;
        Ok(fila)
    }

    pub async fn crear_tipo(
        &self,
        nombre: &str,
        direccion: Direccion,
    ) -> Result<TipoMovimiento, AppError> {
        sqlx::query_as::<_, TipoMovimiento>(
            r#"
            INSERT INTO tipos_movimiento (nombre, direccion)
            VALUES ($1, $2)
            RETURNING id, nombre, direccion
            "#,
        )
        .bind(nombre)
        .bind(direccion)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe un tipo de movimiento con ese nombre."))
    }

    // --- Productos ---

    pub async fn obtener_producto(&self, id: Uuid) -> Result<Option<Producto>, AppError> {
        let fila = sqlx::query_as::<_, Producto>(&format!(
            "SELECT {COLUMNAS_PRODUCTO} FROM productos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(fila)
    }

    /// Lee el producto tomando el candado de fila; toda mutación de stock
    /// pasa por aquí dentro de una transacción.
    pub async fn obtener_producto_para_actualizar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Producto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, Producto>(&format!(
            "SELECT {COLUMNAS_PRODUCTO} FROM productos WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(fila)
    }

    pub async fn crear_producto(
        &self,
        nombre: &str,
        stock_actual: i32,
        stock_minimo: i32,
        categoria_id: Uuid,
    ) -> Result<Producto, AppError> {
        sqlx::query_as::<_, Producto>(&format!(
            r#"
            INSERT INTO productos (nombre, stock_actual, stock_minimo, categoria_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNAS_PRODUCTO}
            "#
        ))
        .bind(nombre)
        .bind(stock_actual)
        .bind(stock_minimo)
        .bind(categoria_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::desde_unique(e, "Ya existe un producto con ese nombre."))
    }

    // El stock no se toca por aquí: solo los movimientos lo mueven.
    pub async fn actualizar_producto(
        &self,
        id: Uuid,
        payload: &ActualizarProductoPayload,
    ) -> Result<Producto, AppError> {
        sqlx::query_as::<_, Producto>(&format!(
            r#"
            UPDATE productos SET
                nombre = COALESCE($2, nombre),
                stock_minimo = COALESCE($3, stock_minimo),
                categoria_id = COALESCE($4, categoria_id),
                activo = COALESCE($5, activo),
                updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNAS_PRODUCTO}
            "#
        ))
        .bind(id)
        .bind(&payload.nombre)
        .bind(payload.stock_minimo)
        .bind(payload.categoria_id)
        .bind(payload.activo)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Producto".into()))
    }

    pub async fn eliminar_producto(&self, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query("DELETE FROM productos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(resultado.rows_affected() > 0)
    }

    pub async fn listar_productos(
        &self,
        search: Option<&str>,
        categoria_id: Option<Uuid>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<Producto>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::text IS NULL OR nombre ILIKE '%' || $1 || '%')
              AND ($2::uuid IS NULL OR categoria_id = $2)
        "#;

        let total =
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM productos {FILTRO}"))
                .bind(search)
                .bind(categoria_id)
                .fetch_one(&self.pool)
                .await?;

        let filas = sqlx::query_as::<_, Producto>(&format!(
            "SELECT {COLUMNAS_PRODUCTO} FROM productos {FILTRO} ORDER BY nombre LIMIT $3 OFFSET $4"
        ))
        .bind(search)
        .bind(categoria_id)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }

    /// Nombre de la categoría del producto, para etiquetar las líneas de
    /// la auto-entrega ("epp" → EPP, cualquier otra → Ropa).
    pub async fn nombre_categoria_de<'e, E>(
        &self,
        executor: E,
        producto_id: Uuid,
    ) -> Result<Option<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nombre = sqlx::query_scalar::<_, String>(
            r#"
            SELECT c.nombre
            FROM productos p
            JOIN categorias c ON c.id = p.categoria_id
            WHERE p.id = $1
            "#,
        )
        .bind(producto_id)
        .fetch_optional(executor)
        .await?;
        Ok(nombre)
    }

    // --- Stock y libro mayor ---

    pub async fn actualizar_stock<'e, E>(
        &self,
        executor: E,
        producto_id: Uuid,
        nuevo_stock: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE productos SET stock_actual = $2, updated_at = now() WHERE id = $1")
            .bind(producto_id)
            .bind(nuevo_stock)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn insertar_movimiento<'e, E>(
        &self,
        executor: E,
        producto_id: Uuid,
        usuario_id: Option<Uuid>,
        tipo_movimiento_id: Uuid,
        cantidad: i32,
        stock_resultante: i32,
        documento_asociado: Option<&str>,
    ) -> Result<Movimiento, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let fila = sqlx::query_as::<_, Movimiento>(&format!(
            r#"
            INSERT INTO movimientos_inventario
                (producto_id, usuario_id, tipo_movimiento_id, cantidad, stock_resultante, documento_asociado)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNAS_MOVIMIENTO}
            "#
        ))
        .bind(producto_id)
        .bind(usuario_id)
        .bind(tipo_movimiento_id)
        .bind(cantidad)
        .bind(stock_resultante)
        .bind(documento_asociado)
        .fetch_one(executor)
        .await?;
        Ok(fila)
    }

    pub async fn listar_movimientos(
        &self,
        producto_id: Option<Uuid>,
        tipo_movimiento_id: Option<Uuid>,
        pag: &Paginacion,
    ) -> Result<(i64, Vec<MovimientoDetalle>), AppError> {
        const FILTRO: &str = r#"
            WHERE ($1::uuid IS NULL OR m.producto_id = $1)
              AND ($2::uuid IS NULL OR m.tipo_movimiento_id = $2)
        "#;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM movimientos_inventario m {FILTRO}"
        ))
        .bind(producto_id)
        .bind(tipo_movimiento_id)
        .fetch_one(&self.pool)
        .await?;

        let filas = sqlx::query_as::<_, MovimientoDetalle>(&format!(
            r#"
            SELECT m.id, m.producto_id, p.nombre AS producto_nombre, m.usuario_id,
                   u.nombre AS usuario_nombre, m.tipo_movimiento_id, t.nombre AS tipo_nombre,
                   t.direccion, m.cantidad, m.stock_resultante, m.documento_asociado, m.created_at
            FROM movimientos_inventario m
            JOIN productos p ON p.id = m.producto_id
            JOIN tipos_movimiento t ON t.id = m.tipo_movimiento_id
            LEFT JOIN usuarios u ON u.id = m.usuario_id
            {FILTRO}
            ORDER BY m.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(producto_id)
        .bind(tipo_movimiento_id)
        .bind(pag.limit)
        .bind(pag.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((total, filas))
    }
}
