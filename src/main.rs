//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_middleware;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación
    // no debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    // Corre las migraciones de SQLx en el arranque
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falló la ejecución de las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de la base de datos ejecutadas con éxito!");

    // Rutas públicas de autenticación
    let auth_routes = Router::new()
        .route("/signin/web", post(handlers::auth::signin_web))
        .route("/signin/app", post(handlers::auth::signin_app));

    let usuario_routes = Router::new()
        .route(
            "/",
            post(handlers::usuarios::crear).get(handlers::usuarios::listar),
        )
        .route("/me/password", put(handlers::usuarios::cambiar_password))
        .route(
            "/{id}",
            get(handlers::usuarios::obtener)
                .put(handlers::usuarios::actualizar)
                .delete(handlers::usuarios::eliminar),
        );

    let guardia_routes = Router::new()
        .route(
            "/",
            post(handlers::guardias::crear).get(handlers::guardias::listar),
        )
        .route(
            "/{id}",
            get(handlers::guardias::obtener)
                .put(handlers::guardias::actualizar)
                .delete(handlers::guardias::eliminar),
        );

    let asignacion_routes = Router::new()
        .route(
            "/",
            post(handlers::asignaciones::crear).get(handlers::asignaciones::listar),
        )
        .route(
            "/{id}",
            get(handlers::asignaciones::obtener)
                .put(handlers::asignaciones::actualizar)
                .delete(handlers::asignaciones::eliminar),
        );

    let inventario_routes = Router::new()
        .route(
            "/productos",
            post(handlers::inventario::crear_producto).get(handlers::inventario::listar_productos),
        )
        .route(
            "/productos/{id}",
            get(handlers::inventario::obtener_producto)
                .put(handlers::inventario::actualizar_producto)
                .delete(handlers::inventario::eliminar_producto),
        )
        .route(
            "/categorias",
            post(handlers::inventario::crear_categoria)
                .get(handlers::inventario::listar_categorias),
        )
        .route(
            "/categorias/{id}",
            axum::routing::delete(handlers::inventario::eliminar_categoria),
        )
        .route(
            "/tipos-movimiento",
            post(handlers::inventario::crear_tipo).get(handlers::inventario::listar_tipos),
        )
        .route(
            "/movimientos",
            post(handlers::inventario::registrar_movimiento)
                .get(handlers::inventario::listar_movimientos),
        );

    let entrega_routes = Router::new()
        .route(
            "/",
            post(handlers::entregas::crear).get(handlers::entregas::listar),
        )
        .route("/{id}", get(handlers::entregas::obtener))
        .route("/{id}/firmar", put(handlers::entregas::firmar));

    let blacklist_routes = Router::new()
        .route(
            "/",
            post(handlers::blacklist::crear).get(handlers::blacklist::listar),
        )
        .route("/verificar/{rut}", get(handlers::blacklist::verificar))
        .route(
            "/{id}",
            put(handlers::blacklist::actualizar).delete(handlers::blacklist::eliminar),
        );

    let bitacora_routes = Router::new().route(
        "/",
        post(handlers::bitacora::crear).get(handlers::bitacora::listar),
    );

    let reporte_operativo_routes = Router::new()
        .route(
            "/",
            post(handlers::reportes_operativos::crear)
                .get(handlers::reportes_operativos::listar),
        )
        .route(
            "/{id}",
            get(handlers::reportes_operativos::obtener)
                .put(handlers::reportes_operativos::actualizar)
                .delete(handlers::reportes_operativos::eliminar),
        );

    let reporte_routes = Router::new()
        .route("/kpis", get(handlers::reportes::kpis))
        .route("/semanal", get(handlers::reportes::actividad_semanal))
        .route("/top-productos", get(handlers::reportes::top_productos))
        .route("/top-usuarios", get(handlers::reportes::top_usuarios));

    // Catálogos de referencia para selectores
    let referencia_routes = Router::new()
        .route("/regiones", get(handlers::referencias::listar_regiones))
        .route("/comunas", get(handlers::referencias::listar_comunas))
        .route(
            "/instalaciones",
            get(handlers::referencias::listar_instalaciones),
        )
        .route("/roles", get(handlers::referencias::listar_roles))
        .route("/permisos", get(handlers::referencias::listar_permisos))
        .route("/afps", get(handlers::referencias::listar_afps))
        .route(
            "/sistemas-salud",
            get(handlers::referencias::listar_sistemas_salud),
        )
        .route(
            "/estados-civiles",
            get(handlers::referencias::listar_estados_civiles),
        );

    // Todo lo que no es login exige un bearer válido.
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .nest("/usuarios", usuario_routes)
        .nest("/guardias", guardia_routes)
        .nest("/asignaciones", asignacion_routes)
        .merge(inventario_routes)
        .nest("/entrega-epp", entrega_routes)
        .nest("/blacklist", blacklist_routes)
        .nest("/bitacora", bitacora_routes)
        .nest("/reportes-operativos", reporte_operativo_routes)
        .nest("/reportes", reporte_routes)
        .route("/auditoria", get(handlers::auditoria::listar))
        .merge(referencia_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    let addr = std::env::var("APP_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falló el arranque del listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
