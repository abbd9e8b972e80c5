// src/services/entrega_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EntregaRepository, InventarioRepository},
    models::entrega::{CrearEntregaPayload, Entrega, EntregaDetalle, EstadoEntrega},
    services::inventario_service::{aplicar_direccion, etiqueta_item},
};

// Nombre del tipo de movimiento sembrado que respalda las salidas
// generadas por entregas.
const TIPO_ENTREGA: &str = "Entrega";

#[derive(Clone)]
pub struct EntregaService {
    entrega_repo: EntregaRepository,
    inventario_repo: InventarioRepository,
    pool: PgPool,
}

impl EntregaService {
    pub fn new(
        entrega_repo: EntregaRepository,
        inventario_repo: InventarioRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            entrega_repo,
            inventario_repo,
            pool,
        }
    }

    /// Crea la entrega completa en una transacción: cabecera, líneas y,
    /// por cada línea con producto del inventario, el descuento de stock
    /// y su fila en el libro mayor. Un ítem sin stock aborta todo.
    pub async fn crear(
        &self,
        usuario_id: Uuid,
        payload: &CrearEntregaPayload,
    ) -> Result<EntregaDetalle, AppError> {
        let estado = if payload.firma.is_some() {
            EstadoEntrega::Firmado
        } else {
            EstadoEntrega::Borrador
        };

        let mut tx = self.pool.begin().await?;

        let cabecera = self
            .entrega_repo
            .insertar_cabecera(
                &mut *tx,
                &payload.receptor_nombre,
                &payload.receptor_rut,
                payload.guardia_id,
                Some(usuario_id),
                &payload.responsable,
                Utc::now().date_naive(),
                estado,
                payload.firma.as_deref(),
            )
            .await?;

        let tipo_salida = self
            .inventario_repo
            .tipo_por_nombre(&mut *tx, TIPO_ENTREGA)
            .await?
            .ok_or_else(|| {
                AppError::ReglaDeNegocio(format!(
                    "Falta el tipo de movimiento '{}' para descontar stock.",
                    TIPO_ENTREGA
                ))
            })?;

        let mut items = Vec::with_capacity(payload.items.len());

        for item in &payload.items {
            let (producto_id, nombre, tipo_etiqueta) = match item.producto_id {
                // Ítem rastreado: el stock baja y el movimiento queda en el libro.
                Some(pid) => {
                    let producto = self
                        .inventario_repo
                        .obtener_producto_para_actualizar(&mut *tx, pid)
                        .await?
                        .ok_or_else(|| AppError::NoEncontrado("Producto".into()))?;

                    let nuevo_stock = aplicar_direccion(
                        producto.stock_actual,
                        item.cantidad,
                        crate::models::inventario::Direccion::Salida,
                    )?;

                    self.inventario_repo
                        .actualizar_stock(&mut *tx, producto.id, nuevo_stock)
                        .await?;

                    self.inventario_repo
                        .insertar_movimiento(
                            &mut *tx,
                            producto.id,
                            Some(usuario_id),
                            tipo_salida.id,
                            item.cantidad,
                            nuevo_stock,
                            Some(&cabecera.id.to_string()),
                        )
                        .await?;

                    let categoria = self
                        .inventario_repo
                        .nombre_categoria_de(&mut *tx, producto.id)
                        .await?;

                    let etiqueta = item
                        .tipo
                        .clone()
                        .unwrap_or_else(|| etiqueta_item(categoria.as_deref()).to_string());

                    (Some(producto.id), producto.nombre, etiqueta)
                }
                // Ítem fuera de inventario: solo necesita nombre.
                None => {
                    let nombre = item.nombre_item.clone().ok_or_else(|| {
                        AppError::ReglaDeNegocio(
                            "Un ítem sin producto asociado debe llevar nombre.".into(),
                        )
                    })?;
                    let etiqueta = item.tipo.clone().unwrap_or_else(|| "Ropa".to_string());
                    (None, nombre, etiqueta)
                }
            };

            let linea = self
                .entrega_repo
                .insertar_item(
                    &mut *tx,
                    cabecera.id,
                    producto_id,
                    &nombre,
                    item.cantidad,
                    item.talla.as_deref().unwrap_or("N/A"),
                    &tipo_etiqueta,
                )
                .await?;
            items.push(linea);
        }

        tx.commit().await?;

        Ok(EntregaDetalle {
            entrega: cabecera,
            items,
        })
    }

    pub async fn obtener_detalle(&self, id: Uuid) -> Result<EntregaDetalle, AppError> {
        let cabecera = self
            .entrega_repo
            .obtener(id)
            .await?
            .ok_or_else(|| AppError::NoEncontrado("Entrega".into()))?;
        let items = self.entrega_repo.items_de(id).await?;
        Ok(EntregaDetalle {
            entrega: cabecera,
            items,
        })
    }

    pub async fn firmar(&self, id: Uuid, firma: &str) -> Result<Entrega, AppError> {
        self.entrega_repo.firmar(id, firma).await
    }
}
