// src/models/referencias.rs
//
// Tablas de referencia de solo lectura (cargadas por migración).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Region {
    pub id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comuna {
    pub id: Uuid,
    pub region_id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Instalacion {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: Option<String>,
    pub comuna_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rol {
    pub id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Permiso {
    pub id: Uuid,
    pub slug: String,
    pub descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Afp {
    pub id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SistemaSalud {
    pub id: Uuid,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EstadoCivil {
    pub id: Uuid,
    pub nombre: String,
}

// Filtro `?region_id=` del listado de comunas.
#[derive(Debug, Deserialize)]
pub struct FiltroComunas {
    pub region_id: Option<Uuid>,
}
