// src/handlers/inventario.rs
//
// Categorías, tipos de movimiento, productos y el libro mayor de
// movimientos. Las mutaciones de stock pasan siempre por el servicio.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, paginacion::ParamsPaginacion},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{
            PermAjustarStock, PermCrearProducto, PermVerInventario, RequirePermiso,
        },
    },
    models::inventario::{
        ActualizarProductoPayload, CrearCategoriaPayload, CrearProductoPayload,
        CrearTipoMovimientoPayload, FiltroMovimientos, FiltroProductos,
        RegistrarMovimientoPayload,
    },
};

// --- Categorías ---

// GET /api/categorias
pub async fn listar_categorias(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state.inventario_repo.listar_categorias().await?;
    Ok(Json(categorias))
}

// POST /api/categorias
pub async fn crear_categoria(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermCrearProducto>,
    Json(payload): Json<CrearCategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let categoria = app_state
        .inventario_repo
        .crear_categoria(&payload.nombre)
        .await?;

    Ok((StatusCode::CREATED, Json(categoria)))
}

// DELETE /api/categorias/{id}
pub async fn eliminar_categoria(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermCrearProducto>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.inventario_repo.eliminar_categoria(id).await? {
        return Err(AppError::NoEncontrado("Categoría".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

// --- Tipos de movimiento ---

// GET /api/tipos-movimiento
pub async fn listar_tipos(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
) -> Result<impl IntoResponse, AppError> {
    let tipos = app_state.inventario_repo.listar_tipos().await?;
    Ok(Json(tipos))
}

// POST /api/tipos-movimiento
pub async fn crear_tipo(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermAjustarStock>,
    Json(payload): Json<CrearTipoMovimientoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tipo = app_state
        .inventario_service
        .crear_tipo(&payload.nombre, payload.direccion)
        .await?;

    Ok((StatusCode::CREATED, Json(tipo)))
}

// --- Productos ---

// POST /api/productos
pub async fn crear_producto(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermCrearProducto>,
    Json(payload): Json<CrearProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let producto = app_state
        .inventario_repo
        .crear_producto(
            &payload.nombre,
            payload.stock_actual,
            payload.stock_minimo,
            payload.categoria_id,
        )
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(producto.id),
            "PRODUCTO_CREADO",
            json!({ "nombre": producto.nombre, "stock_inicial": producto.stock_actual }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(producto)))
}

// GET /api/productos
pub async fn listar_productos(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroProductos>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .inventario_repo
        .listar_productos(filtro.search.as_deref(), filtro.categoria_id, &pag)
        .await?;

    Ok(Json(pag.envolver("productos", total, filas)))
}

// GET /api/productos/{id}
pub async fn obtener_producto(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state
        .inventario_repo
        .obtener_producto(id)
        .await?
        .ok_or_else(|| AppError::NoEncontrado("Producto".into()))?;

    Ok(Json(producto))
}

// PUT /api/productos/{id}
//
// El payload no admite campos de stock: un ajuste de inventario se hace
// registrando un movimiento, nunca editando el producto.
pub async fn actualizar_producto(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermCrearProducto>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActualizarProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let producto = app_state
        .inventario_repo
        .actualizar_producto(id, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(id),
            "PRODUCTO_ACTUALIZADO",
            json!({ "nombre": producto.nombre }),
        )
        .await;

    Ok(Json(producto))
}

// DELETE /api/productos/{id}
pub async fn eliminar_producto(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermCrearProducto>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.inventario_repo.eliminar_producto(id).await? {
        return Err(AppError::NoEncontrado("Producto".into()));
    }

    app_state
        .auditoria_service
        .registrar(Some(actor.id), Some(id), "PRODUCTO_ELIMINADO", json!({}))
        .await;

    Ok(StatusCode::NO_CONTENT)
}

// --- Movimientos ---

// POST /api/movimientos
pub async fn registrar_movimiento(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    _guard: RequirePermiso<PermAjustarStock>,
    Json(payload): Json<RegistrarMovimientoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let movimiento = app_state
        .inventario_service
        .registrar_movimiento(actor.id, &payload)
        .await?;

    app_state
        .auditoria_service
        .registrar(
            Some(actor.id),
            Some(movimiento.producto_id),
            "MOVIMIENTO_REGISTRADO",
            json!({
                "cantidad": movimiento.cantidad,
                "stock_resultante": movimiento.stock_resultante,
            }),
        )
        .await;

    Ok((StatusCode::CREATED, Json(movimiento)))
}

// GET /api/movimientos
pub async fn listar_movimientos(
    State(app_state): State<AppState>,
    _guard: RequirePermiso<PermVerInventario>,
    Query(pag): Query<ParamsPaginacion>,
    Query(filtro): Query<FiltroMovimientos>,
) -> Result<impl IntoResponse, AppError> {
    let pag = pag.normalizar();
    let (total, filas) = app_state
        .inventario_repo
        .listar_movimientos(filtro.producto_id, filtro.tipo_movimiento_id, &pag)
        .await?;

    Ok(Json(pag.envolver("movimientos", total, filas)))
}
