// src/models/entrega.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "estado_entrega", rename_all = "PascalCase")]
pub enum EstadoEntrega {
    Borrador,
    Firmado,
}

// Cabecera de una entrega de equipamiento.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Entrega {
    pub id: Uuid,
    pub receptor_nombre: String,
    pub receptor_rut: String,
    pub guardia_id: Option<Uuid>,
    pub usuario_id: Option<Uuid>,
    pub responsable: String,
    pub fecha: NaiveDate,
    pub estado: EstadoEntrega,
    pub firma: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Línea de la entrega. `producto_id` es opcional: la línea puede
// nombrar un ítem que no está en el inventario.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EntregaItem {
    pub id: Uuid,
    pub entrega_id: Uuid,
    pub producto_id: Option<Uuid>,
    pub nombre_item: String,
    pub cantidad: i32,
    pub talla: String,
    pub tipo: String, // "EPP" | "Ropa"
}

#[derive(Debug, Serialize)]
pub struct EntregaDetalle {
    #[serde(flatten)]
    pub entrega: Entrega,
    pub items: Vec<EntregaItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CrearEntregaItemPayload {
    pub producto_id: Option<Uuid>,
    // Obligatorio solo cuando no hay producto asociado; si hay producto,
    // el nombre se toma del inventario.
    pub nombre_item: Option<String>,
    #[validate(range(min = 1, message = "La cantidad debe ser mayor que cero."))]
    pub cantidad: i32,
    pub talla: Option<String>,
    pub tipo: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CrearEntregaPayload {
    #[validate(length(min = 1, message = "El nombre del receptor es obligatorio."))]
    pub receptor_nombre: String,
    #[validate(length(min = 1, message = "El RUT del receptor es obligatorio."))]
    pub receptor_rut: String,
    pub guardia_id: Option<Uuid>,
    #[validate(length(min = 1, message = "El responsable es obligatorio."))]
    pub responsable: String,
    pub firma: Option<String>,
    #[validate(nested)]
    #[validate(length(min = 1, message = "La entrega debe tener al menos un ítem."))]
    pub items: Vec<CrearEntregaItemPayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FirmarEntregaPayload {
    #[validate(length(min = 1, message = "La firma es obligatoria."))]
    pub firma: String,
}

// Filtros del listado de entregas.
#[derive(Debug, Deserialize)]
pub struct FiltroEntregas {
    pub guardia_id: Option<Uuid>,
    pub estado: Option<EstadoEntrega>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_con_items(items: Vec<CrearEntregaItemPayload>) -> CrearEntregaPayload {
        CrearEntregaPayload {
            receptor_nombre: "Juan Soto".into(),
            receptor_rut: "12.345.678-9".into(),
            guardia_id: None,
            responsable: "Bodega".into(),
            firma: None,
            items,
        }
    }

    #[test]
    fn entrega_sin_items_es_invalida() {
        let payload = payload_con_items(vec![]);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn entrega_con_un_item_valido_pasa() {
        let payload = payload_con_items(vec![CrearEntregaItemPayload {
            producto_id: None,
            nombre_item: Some("Parka corporativa".into()),
            cantidad: 1,
            talla: Some("L".into()),
            tipo: None,
        }]);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn item_con_cantidad_cero_invalida_la_entrega() {
        let payload = payload_con_items(vec![CrearEntregaItemPayload {
            producto_id: None,
            nombre_item: Some("Casco".into()),
            cantidad: 0,
            talla: None,
            tipo: None,
        }]);
        assert!(payload.validate().is_err());
    }
}
