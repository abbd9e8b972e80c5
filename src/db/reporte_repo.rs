// src/db/reporte_repo.rs
//
// Agregaciones de solo lectura sobre el libro mayor. Sin caché:
// cada petición recalcula.

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::reportes::{ActividadDiaria, KpisResumen, TopProducto, TopUsuario},
};

#[derive(Clone)]
pub struct ReporteRepository {
    pool: PgPool,
}

impl ReporteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn kpis(&self) -> Result<KpisResumen, AppError> {
        let resumen = sqlx::query_as::<_, KpisResumen>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM productos) AS total_productos,
                (SELECT COUNT(*) FROM guardias WHERE activo) AS guardias_activos,
                (SELECT COUNT(*) FROM guardias) AS total_guardias,
                (SELECT COUNT(*) FROM productos WHERE stock_actual <= stock_minimo) AS productos_bajo_minimo,
                (SELECT COUNT(*)
                 FROM movimientos_inventario m
                 JOIN tipos_movimiento t ON t.id = m.tipo_movimiento_id
                 WHERE t.direccion = 'Salida' AND m.created_at::date = CURRENT_DATE) AS salidas_hoy
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(resumen)
    }

    /// Semana en curso con inicio lunes (date_trunc('week') en Postgres
    /// parte lunes), un registro por día con las sumas de cada dirección.
    pub async fn actividad_semanal(&self) -> Result<Vec<ActividadDiaria>, AppError> {
        let filas = sqlx::query_as::<_, ActividadDiaria>(
            r#"
            SELECT d::date AS fecha,
                   COALESCE(SUM(m.cantidad) FILTER (WHERE t.direccion = 'Entrada'), 0)::bigint AS entradas,
                   COALESCE(SUM(m.cantidad) FILTER (WHERE t.direccion = 'Salida'), 0)::bigint AS salidas
            FROM generate_series(
                     date_trunc('week', CURRENT_DATE),
                     date_trunc('week', CURRENT_DATE) + interval '6 days',
                     interval '1 day'
                 ) AS d
            LEFT JOIN movimientos_inventario m ON m.created_at::date = d::date
            LEFT JOIN tipos_movimiento t ON t.id = m.tipo_movimiento_id
            GROUP BY d
            ORDER BY d
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn top_productos_del_mes(&self) -> Result<Vec<TopProducto>, AppError> {
        let filas = sqlx::query_as::<_, TopProducto>(
            r#"
            SELECT p.id AS producto_id, p.nombre, SUM(m.cantidad)::bigint AS total_retirado
            FROM movimientos_inventario m
            JOIN tipos_movimiento t ON t.id = m.tipo_movimiento_id AND t.direccion = 'Salida'
            JOIN productos p ON p.id = m.producto_id
            WHERE date_trunc('month', m.created_at) = date_trunc('month', CURRENT_TIMESTAMP)
            GROUP BY p.id, p.nombre
            ORDER BY total_retirado DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }

    pub async fn top_usuarios_del_mes(&self) -> Result<Vec<TopUsuario>, AppError> {
        let filas = sqlx::query_as::<_, TopUsuario>(
            r#"
            SELECT u.id AS usuario_id, u.nombre, SUM(m.cantidad)::bigint AS total_retirado
            FROM movimientos_inventario m
            JOIN tipos_movimiento t ON t.id = m.tipo_movimiento_id AND t.direccion = 'Salida'
            JOIN usuarios u ON u.id = m.usuario_id
            WHERE date_trunc('month', m.created_at) = date_trunc('month', CURRENT_TIMESTAMP)
            GROUP BY u.id, u.nombre
            ORDER BY total_retirado DESC
            LIMIT 5
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filas)
    }
}
