// src/docs.rs
//
// Documentación OpenAPI. Solo las superficies que consume gente externa
// al equipo (login y panel de reportes) están anotadas; el resto del API
// se documenta en el repositorio.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::signin_web,
        handlers::auth::signin_app,

        // --- Reportes ---
        handlers::reportes::kpis,
        handlers::reportes::actividad_semanal,
        handlers::reportes::top_productos,
        handlers::reportes::top_usuarios,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::LoginWebPayload,
            models::auth::LoginAppPayload,
            models::auth::AuthResponse,

            // --- Reportes ---
            models::reportes::KpisResumen,
            models::reportes::ActividadDiaria,
            models::reportes::TopProducto,
            models::reportes::TopUsuario,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación web y de la app de terreno"),
        (name = "Reportes", description = "Indicadores del panel gerencial")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
