// src/models/reportes.rs
//
// Agregaciones de solo lectura; se recalculan en cada petición.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct KpisResumen {
    pub total_productos: i64,
    pub guardias_activos: i64,
    pub total_guardias: i64,
    pub productos_bajo_minimo: i64,
    pub salidas_hoy: i64,
}

// Un día de la semana en curso (lunes a domingo), con los totales
// de entradas y salidas de ese día.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ActividadDiaria {
    pub fecha: NaiveDate,
    pub entradas: i64,
    pub salidas: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct TopProducto {
    pub producto_id: Uuid,
    pub nombre: String,
    pub total_retirado: i64,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct TopUsuario {
    pub usuario_id: Uuid,
    pub nombre: String,
    pub total_retirado: i64,
}
