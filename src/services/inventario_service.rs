// src/services/inventario_service.rs
//
// Registro de movimientos: la única vía por la que cambia el stock.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EntregaRepository, GuardiaRepository, InventarioRepository},
    models::{
        entrega::EstadoEntrega,
        inventario::{Direccion, Movimiento, Producto, RegistrarMovimientoPayload},
    },
};

// Talla de relleno para las líneas generadas desde retiros crudos de
// bodega; se corrige al firmar la entrega.
pub(crate) const TALLA_PENDIENTE: &str = "N/A";

/// Aplica la dirección del tipo al stock. Las salidas exigen stock
/// suficiente ANTES de cualquier escritura.
pub(crate) fn aplicar_direccion(
    stock_actual: i32,
    cantidad: i32,
    direccion: Direccion,
) -> Result<i32, AppError> {
    match direccion {
        Direccion::Entrada => Ok(stock_actual + cantidad),
        Direccion::Salida if cantidad > stock_actual => Err(AppError::ReglaDeNegocio(format!(
            "Stock insuficiente: disponible {}, solicitado {}.",
            stock_actual, cantidad
        ))),
        Direccion::Salida => Ok(stock_actual - cantidad),
    }
}

/// Etiqueta de la línea de entrega según la categoría del producto.
pub(crate) fn etiqueta_item(nombre_categoria: Option<&str>) -> &'static str {
    match nombre_categoria {
        Some(n) if n.to_lowercase().contains("epp") => "EPP",
        _ => "Ropa",
    }
}

/// Cabecera reutilizable entre las entregas del guardia: el primer
/// borrador de la fecha. Una entrega firmada o de otro día nunca
/// recibe líneas nuevas.
pub(crate) fn borrador_reutilizable(
    existentes: Vec<crate::models::entrega::Entrega>,
    fecha: chrono::NaiveDate,
) -> Option<crate::models::entrega::Entrega> {
    existentes
        .into_iter()
        .find(|e| e.estado == EstadoEntrega::Borrador && e.fecha == fecha)
}

#[derive(Clone)]
pub struct InventarioService {
    inventario_repo: InventarioRepository,
    entrega_repo: EntregaRepository,
    guardia_repo: GuardiaRepository,
    pool: PgPool,
}

impl InventarioService {
    pub fn new(
        inventario_repo: InventarioRepository,
        entrega_repo: EntregaRepository,
        guardia_repo: GuardiaRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            inventario_repo,
            entrega_repo,
            guardia_repo,
            pool,
        }
    }

    /// Crea un tipo de movimiento. Sin dirección explícita se infiere de
    /// los nombres históricos conocidos; un nombre inclasificable se
    /// rechaza en lugar de quedar como tipo "sin delta".
    pub async fn crear_tipo(
        &self,
        nombre: &str,
        direccion: Option<Direccion>,
    ) -> Result<crate::models::inventario::TipoMovimiento, AppError> {
        let direccion = match direccion {
            Some(d) => d,
            None => Direccion::desde_nombre(nombre).ok_or_else(|| {
                AppError::ReglaDeNegocio(format!(
                    "No se puede inferir la dirección del tipo '{}'; indíquela explícitamente.",
                    nombre
                ))
            })?,
        };
        self.inventario_repo.crear_tipo(nombre, direccion).await
    }

    /// Registra un movimiento. Actualización de stock, fila del libro
    /// mayor y auto-entrega (si corresponde) comparten una transacción:
    /// cualquier falla interna revierte todo.
    pub async fn registrar_movimiento(
        &self,
        usuario_id: Uuid,
        payload: &RegistrarMovimientoPayload,
    ) -> Result<Movimiento, AppError> {
        let mut tx = self.pool.begin().await?;

        let producto = self
            .inventario_repo
            .obtener_producto_para_actualizar(&mut *tx, payload.producto_id)
            .await?
            .ok_or_else(|| AppError::NoEncontrado("Producto".into()))?;

        let tipo = self
            .inventario_repo
            .obtener_tipo(&mut *tx, payload.tipo_movimiento_id)
            .await?
            .ok_or_else(|| AppError::NoEncontrado("Tipo de movimiento".into()))?;

        let nuevo_stock = aplicar_direccion(producto.stock_actual, payload.cantidad, tipo.direccion)?;

        self.inventario_repo
            .actualizar_stock(&mut *tx, producto.id, nuevo_stock)
            .await?;

        let movimiento = self
            .inventario_repo
            .insertar_movimiento(
                &mut *tx,
                producto.id,
                Some(usuario_id),
                tipo.id,
                payload.cantidad,
                nuevo_stock,
                payload.documento_asociado.as_deref(),
            )
            .await?;

        // Retiro crudo con documento asociado: si el documento resuelve a
        // un guardia, se arma (o reutiliza) el borrador de entrega del día.
        if tipo.direccion == Direccion::Salida {
            if let Some(doc) = payload.documento_asociado.as_deref() {
                self.auto_entrega(&mut tx, doc, &producto, payload.cantidad, usuario_id)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(movimiento)
    }

    /// Efecto colateral de auto-entrega. Un documento que no resuelve a un
    /// guardia deja solo una advertencia: el movimiento igual se confirma.
    async fn auto_entrega(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        documento: &str,
        producto: &Producto,
        cantidad: i32,
        usuario_id: Uuid,
    ) -> Result<(), AppError> {
        let Ok(guardia_id) = documento.parse::<Uuid>() else {
            tracing::warn!(documento, "Documento asociado no es un id de guardia; se omite la auto-entrega");
            return Ok(());
        };

        let Some(guardia) = self.guardia_repo.buscar_por_id_tx(&mut **tx, guardia_id).await? else {
            tracing::warn!(%guardia_id, "Guardia no encontrado; se omite la auto-entrega");
            return Ok(());
        };

        let hoy = Utc::now().date_naive();

        let existentes = self
            .entrega_repo
            .entregas_del_dia(&mut **tx, guardia.id, hoy)
            .await?;

        let cabecera = match borrador_reutilizable(existentes, hoy) {
            Some(existente) => existente,
            None => {
                self.entrega_repo
                    .insertar_cabecera(
                        &mut **tx,
                        &format!("{} {}", guardia.nombre, guardia.apellido),
                        &guardia.rut,
                        Some(guardia.id),
                        Some(usuario_id),
                        "Bodega",
                        hoy,
                        EstadoEntrega::Borrador,
                        None,
                    )
                    .await?
            }
        };

        let categoria = self
            .inventario_repo
            .nombre_categoria_de(&mut **tx, producto.id)
            .await?;

        self.entrega_repo
            .insertar_item(
                &mut **tx,
                cabecera.id,
                Some(producto.id),
                &producto.nombre,
                cantidad,
                TALLA_PENDIENTE,
                etiqueta_item(categoria.as_deref()),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entrada_suma() {
        assert_eq!(aplicar_direccion(100, 5, Direccion::Entrada).unwrap(), 105);
    }

    #[test]
    fn salida_resta() {
        assert_eq!(aplicar_direccion(100, 5, Direccion::Salida).unwrap(), 95);
    }

    #[test]
    fn salida_sin_stock_se_rechaza() {
        let resultado = aplicar_direccion(95, 200, Direccion::Salida);
        assert!(matches!(resultado, Err(AppError::ReglaDeNegocio(_))));
    }

    #[test]
    fn salida_exacta_deja_cero() {
        assert_eq!(aplicar_direccion(5, 5, Direccion::Salida).unwrap(), 0);
    }

    #[test]
    fn etiqueta_epp_por_categoria() {
        assert_eq!(etiqueta_item(Some("EPP")), "EPP");
        assert_eq!(etiqueta_item(Some("Elementos epp invierno")), "EPP");
        assert_eq!(etiqueta_item(Some("Uniformes")), "Ropa");
        assert_eq!(etiqueta_item(None), "Ropa");
    }

    fn entrega(fecha: chrono::NaiveDate, estado: EstadoEntrega) -> crate::models::entrega::Entrega {
        crate::models::entrega::Entrega {
            id: Uuid::new_v4(),
            receptor_nombre: "Juan Soto".into(),
            receptor_rut: "12.345.678-9".into(),
            guardia_id: Some(Uuid::new_v4()),
            usuario_id: None,
            responsable: "Bodega".into(),
            fecha,
            estado,
            firma: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn segundo_retiro_del_dia_reutiliza_el_borrador() {
        let hoy = Utc::now().date_naive();
        let borrador = entrega(hoy, EstadoEntrega::Borrador);
        let id = borrador.id;

        let elegida = borrador_reutilizable(vec![borrador], hoy).unwrap();
        assert_eq!(elegida.id, id);
    }

    #[test]
    fn entrega_firmada_no_se_reutiliza() {
        let hoy = Utc::now().date_naive();
        let firmada = entrega(hoy, EstadoEntrega::Firmado);

        assert!(borrador_reutilizable(vec![firmada], hoy).is_none());
    }

    #[test]
    fn borrador_de_otro_dia_no_se_reutiliza() {
        let hoy = Utc::now().date_naive();
        let ayer = hoy - chrono::Duration::days(1);
        let viejo = entrega(ayer, EstadoEntrega::Borrador);

        assert!(borrador_reutilizable(vec![viejo], hoy).is_none());
    }

    #[test]
    fn entre_firmada_y_borrador_elige_el_borrador() {
        let hoy = Utc::now().date_naive();
        let firmada = entrega(hoy, EstadoEntrega::Firmado);
        let borrador = entrega(hoy, EstadoEntrega::Borrador);
        let id = borrador.id;

        let elegida = borrador_reutilizable(vec![firmada, borrador], hoy).unwrap();
        assert_eq!(elegida.id, id);
    }
}
