// src/common/paginacion.rs

use serde::Deserialize;

const LIMITE_POR_DEFECTO: i64 = 10;
const LIMITE_MAXIMO: i64 = 100;

// Parámetros `?page=&limit=` que aceptan todos los listados.
#[derive(Debug, Deserialize)]
pub struct ParamsPaginacion {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ParamsPaginacion {
    /// Normaliza los parámetros: página 1-based, límite acotado a [1, 100].
    pub fn normalizar(&self) -> Paginacion {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(LIMITE_POR_DEFECTO)
            .clamp(1, LIMITE_MAXIMO);
        Paginacion {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paginacion {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Paginacion {
    /// `totalPages` = techo(totalItems / limit). Cero filas producen cero páginas.
    pub fn total_paginas(&self, total_items: i64) -> i64 {
        if total_items <= 0 {
            return 0;
        }
        (total_items + self.limit - 1) / self.limit
    }

    /// Arma el sobre estándar `{totalItems, totalPages, currentPage, <clave>: [...]}`.
    pub fn envolver<T: serde::Serialize>(
        &self,
        clave: &str,
        total_items: i64,
        filas: Vec<T>,
    ) -> serde_json::Value {
        serde_json::json!({
            "totalItems": total_items,
            "totalPages": self.total_paginas(total_items),
            "currentPage": self.page,
            clave: filas,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<i64>, limit: Option<i64>) -> Paginacion {
        ParamsPaginacion { page, limit }.normalizar()
    }

    #[test]
    fn coleccion_de_25_con_limite_10_tiene_3_paginas() {
        let p = params(Some(2), Some(10));
        assert_eq!(p.total_paginas(25), 3);
        assert_eq!(p.page, 2);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn valores_por_defecto() {
        let p = params(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 10);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn limite_acotado_y_pagina_minima() {
        let p = params(Some(0), Some(9999));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 100);
    }

    #[test]
    fn total_exacto_no_agrega_pagina() {
        let p = params(Some(1), Some(10));
        assert_eq!(p.total_paginas(30), 3);
        assert_eq!(p.total_paginas(31), 4);
        assert_eq!(p.total_paginas(0), 0);
    }

    #[test]
    fn sobre_estandar() {
        let p = params(Some(2), Some(10));
        let sobre = p.envolver("guardias", 25, vec![1, 2, 3]);
        assert_eq!(sobre["totalItems"], 25);
        assert_eq!(sobre["totalPages"], 3);
        assert_eq!(sobre["currentPage"], 2);
        assert_eq!(sobre["guardias"].as_array().unwrap().len(), 3);
    }
}
