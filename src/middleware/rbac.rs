// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{common::error::AppError, config::AppState, middleware::auth::Identidad};

/// 1. El trait que define qué es un permiso.
pub trait PermisoDef: Send + Sync + 'static {
    fn slug() -> &'static str;
}

/// 2. El extractor (guardián). Se declara como argumento del handler y
/// corta la petición con 403 si el portador no tiene el permiso.
pub struct RequirePermiso<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermiso<T>
where
    T: PermisoDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let usuario = match parts.extensions.get::<Identidad>() {
            Some(Identidad::Usuario(u)) => u.clone(),
            // Los guardias de terreno no portan permisos administrativos.
            Some(Identidad::Guardia(_)) => {
                return Err(AppError::PermisoDenegado(T::slug().into()));
            }
            None => return Err(AppError::TokenInvalido),
        };

        let requerido = T::slug();

        let tiene = app_state
            .usuario_repo
            .tiene_permiso(usuario.id, requerido)
            .await?;

        if !tiene {
            return Err(AppError::PermisoDenegado(requerido.into()));
        }

        Ok(RequirePermiso(PhantomData))
    }
}

// ---
// DEFINICIÓN DE LOS PERMISOS (TIPOS)
// ---

pub struct PermVerInventario;
impl PermisoDef for PermVerInventario {
    fn slug() -> &'static str {
        "VER_INVENTARIO"
    }
}

pub struct PermCrearProducto;
impl PermisoDef for PermCrearProducto {
    fn slug() -> &'static str {
        "CREAR_PRODUCTO"
    }
}

pub struct PermAjustarStock;
impl PermisoDef for PermAjustarStock {
    fn slug() -> &'static str {
        "AJUSTAR_STOCK"
    }
}

pub struct PermGestionarGuardias;
impl PermisoDef for PermGestionarGuardias {
    fn slug() -> &'static str {
        "GESTIONAR_GUARDIAS"
    }
}

pub struct PermGestionarUsuarios;
impl PermisoDef for PermGestionarUsuarios {
    fn slug() -> &'static str {
        "GESTIONAR_USUARIOS"
    }
}

pub struct PermVerReportes;
impl PermisoDef for PermVerReportes {
    fn slug() -> &'static str {
        "VER_REPORTES"
    }
}

pub struct PermGestionarBlacklist;
impl PermisoDef for PermGestionarBlacklist {
    fn slug() -> &'static str {
        "GESTIONAR_BLACKLIST"
    }
}
