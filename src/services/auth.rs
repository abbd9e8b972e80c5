// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{GuardiaRepository, UsuarioRepository},
    models::{
        auth::{Claims, TipoPortador, Usuario},
        guardia::Guardia,
    },
};

#[derive(Clone)]
pub struct AuthService {
    usuario_repo: UsuarioRepository,
    guardia_repo: GuardiaRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        usuario_repo: UsuarioRepository,
        guardia_repo: GuardiaRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            usuario_repo,
            guardia_repo,
            jwt_secret,
        }
    }

    /// Login administrativo: e-mail + contraseña contra `usuarios`.
    pub async fn login_web(&self, email: &str, password: &str) -> Result<String, AppError> {
        let usuario = self
            .usuario_repo
            .buscar_por_email(email)
            .await?
            .filter(|u| u.activo)
            .ok_or(AppError::CredencialesInvalidas)?;

        if !verificar_password(password, &usuario.password_hash).await? {
            return Err(AppError::CredencialesInvalidas);
        }

        self.crear_token(usuario.id, TipoPortador::Web, Some(usuario.rol_id.to_string()))
    }

    /// Login de terreno: RUT + contraseña contra `guardias`, con la
    /// compuerta adicional de `app_habilitado`.
    pub async fn login_app(&self, rut: &str, password: &str) -> Result<String, AppError> {
        let guardia = self
            .guardia_repo
            .buscar_por_rut(rut)
            .await?
            .filter(|g| g.activo && g.app_habilitado)
            .ok_or(AppError::CredencialesInvalidas)?;

        let hash_almacenado = guardia
            .password_hash
            .as_deref()
            .ok_or(AppError::CredencialesInvalidas)?;

        if !verificar_password(password, hash_almacenado).await? {
            return Err(AppError::CredencialesInvalidas);
        }

        self.guardia_repo.tocar_ultimo_acceso(guardia.id).await?;

        self.crear_token(guardia.id, TipoPortador::App, None)
    }

    pub async fn resolver_usuario(&self, claims: &Claims) -> Result<Usuario, AppError> {
        self.usuario_repo
            .buscar_por_id(claims.sub)
            .await?
            .filter(|u| u.activo)
            .ok_or(AppError::TokenInvalido)
    }

    pub async fn resolver_guardia(&self, claims: &Claims) -> Result<Guardia, AppError> {
        self.guardia_repo
            .buscar_por_id(claims.sub)
            .await?
            .filter(|g| g.activo && g.app_habilitado)
            .ok_or(AppError::TokenInvalido)
    }

    pub fn validar_token(&self, token: &str) -> Result<Claims, AppError> {
        decodificar_claims(token, &self.jwt_secret)
    }

    fn crear_token(
        &self,
        sub: Uuid,
        tipo: TipoPortador,
        rol: Option<String>,
    ) -> Result<String, AppError> {
        emitir_token(sub, tipo, rol, &self.jwt_secret)
    }
}

// --- Primitivas de credenciales ---
//
// bcrypt es costoso a propósito; hash y verificación corren en
// `spawn_blocking` para no bloquear el runtime.

pub async fn hashear_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falló la tarea de hashing: {}", e))?
        .map_err(AppError::BcryptError)
}

pub async fn verificar_password(password: &str, hash_almacenado: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash_almacenado = hash_almacenado.to_owned();
    tokio::task::spawn_blocking(move || verify(&password, &hash_almacenado))
        .await
        .map_err(|e| anyhow::anyhow!("Falló la tarea de verificación: {}", e))?
        .map_err(AppError::BcryptError)
}

fn emitir_token(
    sub: Uuid,
    tipo: TipoPortador,
    rol: Option<String>,
    secreto: &str,
) -> Result<String, AppError> {
    let ahora = Utc::now();
    let expira = ahora + chrono::Duration::hours(12);

    let claims = Claims {
        sub,
        tipo,
        rol,
        exp: expira.timestamp() as usize,
        iat: ahora.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secreto.as_ref()),
    )?)
}

fn decodificar_claims(token: &str, secreto: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let datos = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secreto.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::TokenInvalido)?;
    Ok(datos.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRETO: &str = "secreto-de-prueba";

    #[test]
    fn token_emitido_se_decodifica() {
        let id = Uuid::new_v4();
        let token = emitir_token(id, TipoPortador::Web, Some("admin".into()), SECRETO).unwrap();
        let claims = decodificar_claims(&token, SECRETO).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.tipo, TipoPortador::Web);
        assert_eq!(claims.rol.as_deref(), Some("admin"));
    }

    #[test]
    fn token_con_otro_secreto_es_rechazado() {
        let token = emitir_token(Uuid::new_v4(), TipoPortador::App, None, SECRETO).unwrap();
        let resultado = decodificar_claims(&token, "otro-secreto");
        assert!(matches!(resultado, Err(AppError::TokenInvalido)));
    }

    #[test]
    fn basura_no_es_token() {
        assert!(matches!(
            decodificar_claims("no-es-un-jwt", SECRETO),
            Err(AppError::TokenInvalido)
        ));
    }

    #[tokio::test]
    async fn hash_y_verificacion_de_password() {
        let h = hashear_password("secreta123").await.unwrap();
        assert!(verificar_password("secreta123", &h).await.unwrap());
        assert!(!verificar_password("otra", &h).await.unwrap());
    }
}
