// src/models/inventario.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// --- Categorías ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Categoria {
    pub id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearCategoriaPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
}

// --- Tipos de movimiento ---
//
// La dirección es un atributo explícito del tipo, nunca se deduce
// del nombre en tiempo de ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "direccion_movimiento", rename_all = "PascalCase")]
pub enum Direccion {
    Entrada,
    Salida,
}

impl Direccion {
    /// Clasifica un nombre de tipo según los patrones históricos conocidos.
    /// Se usa solo al crear tipos nuevos sin dirección explícita; un nombre
    /// que no calza con ningún patrón se rechaza en vez de quedar sin delta.
    pub fn desde_nombre(nombre: &str) -> Option<Direccion> {
        let n = nombre.to_lowercase();
        const ENTRADAS: [&str; 3] = ["entrada", "devolucion", "ingreso"];
        const SALIDAS: [&str; 3] = ["salida", "entrega", "baja"];

        // "devolución" con tilde también debe calzar
        let n = n.replace('ó', "o");
        if ENTRADAS.iter().any(|p| n.contains(p)) {
            return Some(Direccion::Entrada);
        }
        if SALIDAS.iter().any(|p| n.contains(p)) {
            return Some(Direccion::Salida);
        }
        None
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TipoMovimiento {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: Direccion,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearTipoMovimientoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    // Opcional: si falta, se infiere del nombre con los patrones conocidos.
    pub direccion: Option<Direccion>,
}

// --- Productos ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Producto {
    pub id: Uuid,
    pub nombre: String,
    pub stock_actual: i32,
    pub stock_minimo: i32,
    pub categoria_id: Uuid,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearProductoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[validate(range(min = 0, message = "El stock inicial no puede ser negativo."))]
    #[serde(default)]
    pub stock_actual: i32,
    #[validate(range(min = 0, message = "El stock mínimo no puede ser negativo."))]
    #[serde(default)]
    pub stock_minimo: i32,
    pub categoria_id: Uuid,
}

// Sin campos de stock: el stock solo se mueve por movimientos registrados.
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarProductoPayload {
    pub nombre: Option<String>,
    #[validate(range(min = 0, message = "El stock mínimo no puede ser negativo."))]
    pub stock_minimo: Option<i32>,
    pub categoria_id: Option<Uuid>,
    pub activo: Option<bool>,
}

// Filtros del listado de productos.
#[derive(Debug, Deserialize)]
pub struct FiltroProductos {
    pub search: Option<String>,
    pub categoria_id: Option<Uuid>,
}

// --- Movimientos (libro mayor, solo-inserción) ---
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movimiento {
    pub id: Uuid,
    pub producto_id: Uuid,
    pub usuario_id: Option<Uuid>,
    pub tipo_movimiento_id: Uuid,
    pub cantidad: i32,
    pub stock_resultante: i32,
    pub documento_asociado: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Fila del listado con nombres resueltos.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MovimientoDetalle {
    pub id: Uuid,
    pub producto_id: Uuid,
    pub producto_nombre: String,
    pub usuario_id: Option<Uuid>,
    pub usuario_nombre: Option<String>,
    pub tipo_movimiento_id: Uuid,
    pub tipo_nombre: String,
    pub direccion: Direccion,
    pub cantidad: i32,
    pub stock_resultante: i32,
    pub documento_asociado: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrarMovimientoPayload {
    pub producto_id: Uuid,
    pub tipo_movimiento_id: Uuid,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub cantidad: i32,
    // Documento vinculado; para salidas suele ser el id del guardia receptor.
    pub documento_asociado: Option<String>,
}

// Filtros del listado de movimientos.
#[derive(Debug, Deserialize)]
pub struct FiltroMovimientos {
    pub producto_id: Option<Uuid>,
    pub tipo_movimiento_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nombres_de_entrada_conocidos() {
        assert_eq!(Direccion::desde_nombre("Entrada"), Some(Direccion::Entrada));
        assert_eq!(
            Direccion::desde_nombre("Devolución de equipo"),
            Some(Direccion::Entrada)
        );
        assert_eq!(
            Direccion::desde_nombre("INGRESO COMPRA"),
            Some(Direccion::Entrada)
        );
    }

    #[test]
    fn nombres_de_salida_conocidos() {
        assert_eq!(Direccion::desde_nombre("Salida"), Some(Direccion::Salida));
        assert_eq!(Direccion::desde_nombre("Entrega EPP"), Some(Direccion::Salida));
        assert_eq!(
            Direccion::desde_nombre("baja por pérdida"),
            Some(Direccion::Salida)
        );
    }

    #[test]
    fn nombre_desconocido_no_clasifica() {
        assert_eq!(Direccion::desde_nombre("Ajuste misterioso"), None);
    }

    #[test]
    fn entrega_gana_aunque_contenga_entrada_parcial() {
        // "entrega" contiene "entr..." pero no "entrada": debe ser Salida.
        assert_eq!(Direccion::desde_nombre("entrega"), Some(Direccion::Salida));
    }
}
