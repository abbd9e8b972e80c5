// src/services/personal_service.rs
//
// Altas y mantenciones de cuentas administrativas y guardias.
// Los vínculos muchos-a-muchos del usuario se reemplazan dentro de
// la misma transacción que toca la fila principal.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GuardiaRepository, UsuarioRepository},
    models::{
        auth::{
            ActualizarUsuarioPayload, CambiarPasswordPayload, CrearUsuarioPayload, Usuario,
            UsuarioDetalle,
        },
        guardia::{ActualizarGuardiaPayload, CrearGuardiaPayload, Guardia},
    },
    services::auth::{hashear_password, verificar_password},
};

#[derive(Clone)]
pub struct PersonalService {
    usuario_repo: UsuarioRepository,
    guardia_repo: GuardiaRepository,
    pool: PgPool,
}

impl PersonalService {
    pub fn new(
        usuario_repo: UsuarioRepository,
        guardia_repo: GuardiaRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            usuario_repo,
            guardia_repo,
            pool,
        }
    }

    pub async fn crear_usuario(
        &self,
        payload: &CrearUsuarioPayload,
    ) -> Result<UsuarioDetalle, AppError> {
        // El hashing queda fuera de la transacción: no toca la base.
        let password_hash = hashear_password(&payload.password).await?;

        let mut tx = self.pool.begin().await?;

        let usuario = self
            .usuario_repo
            .crear(
                &mut *tx,
                &payload.nombre,
                &payload.email,
                &password_hash,
                payload.rol_id,
            )
            .await?;

        self.usuario_repo
            .reemplazar_permisos(&mut tx, usuario.id, &payload.permisos)
            .await?;
        self.usuario_repo
            .reemplazar_regiones(&mut tx, usuario.id, &payload.regiones)
            .await?;

        tx.commit().await?;

        Ok(UsuarioDetalle {
            usuario,
            permisos: payload.permisos.clone(),
            regiones: payload.regiones.clone(),
        })
    }

    pub async fn actualizar_usuario(
        &self,
        id: Uuid,
        payload: &ActualizarUsuarioPayload,
    ) -> Result<UsuarioDetalle, AppError> {
        let mut tx = self.pool.begin().await?;

        let usuario = self
            .usuario_repo
            .actualizar(
                &mut *tx,
                id,
                payload.nombre.as_deref(),
                payload.email.as_deref(),
                payload.rol_id,
                payload.activo,
            )
            .await?;

        // Presencia = reemplazo total del vínculo; ausencia = sin cambios.
        if let Some(permisos) = &payload.permisos {
            self.usuario_repo
                .reemplazar_permisos(&mut tx, id, permisos)
                .await?;
        }
        if let Some(regiones) = &payload.regiones {
            self.usuario_repo
                .reemplazar_regiones(&mut tx, id, regiones)
                .await?;
        }

        tx.commit().await?;

        let permisos = self.usuario_repo.permisos_de(id).await?;
        let regiones = self.usuario_repo.regiones_de(id).await?;

        Ok(UsuarioDetalle {
            usuario,
            permisos,
            regiones,
        })
    }

    /// Cambio de contraseña de la propia cuenta: exige la contraseña
    /// vigente y rechaza reutilizar exactamente la misma.
    pub async fn cambiar_password(
        &self,
        usuario: &Usuario,
        payload: &CambiarPasswordPayload,
    ) -> Result<(), AppError> {
        if !verificar_password(&payload.password_actual, &usuario.password_hash).await? {
            return Err(AppError::ReglaDeNegocio(
                "La contraseña actual no coincide.".into(),
            ));
        }

        if verificar_password(&payload.password_nueva, &usuario.password_hash).await? {
            return Err(AppError::ReglaDeNegocio(
                "La nueva contraseña debe ser distinta de la actual.".into(),
            ));
        }

        let nuevo_hash = hashear_password(&payload.password_nueva).await?;
        self.usuario_repo
            .actualizar_password(usuario.id, &nuevo_hash)
            .await
    }

    pub async fn crear_guardia(&self, payload: &CrearGuardiaPayload) -> Result<Guardia, AppError> {
        if payload.app_habilitado && payload.password.is_none() {
            return Err(AppError::ReglaDeNegocio(
                "Habilitar la app requiere definir una contraseña.".into(),
            ));
        }

        let password_hash = match &payload.password {
            Some(p) => Some(hashear_password(p).await?),
            None => None,
        };

        self.guardia_repo.crear(payload, password_hash.as_deref()).await
    }

    pub async fn actualizar_guardia(
        &self,
        id: Uuid,
        payload: &ActualizarGuardiaPayload,
    ) -> Result<Guardia, AppError> {
        let password_hash = match &payload.password {
            Some(p) => Some(hashear_password(p).await?),
            None => None,
        };

        self.guardia_repo
            .actualizar(id, payload, password_hash.as_deref())
            .await
    }
}
