// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AsignacionRepository, CumplimientoRepository, EntregaRepository, GuardiaRepository,
        InventarioRepository, ReferenciaRepository, ReporteOperativoRepository, ReporteRepository,
        UsuarioRepository,
    },
    services::{
        asignacion_service::AsignacionService, auditoria_service::AuditoriaService,
        auth::AuthService, entrega_service::EntregaService,
        inventario_service::InventarioService, personal_service::PersonalService,
    },
};

// El estado compartido, construido una vez en el arranque y clonado
// (barato: puros Arc/Pool por dentro) hacia los handlers.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,

    // Repositorios que los handlers usan directo para CRUD simple
    pub usuario_repo: UsuarioRepository,
    pub guardia_repo: GuardiaRepository,
    pub asignacion_repo: AsignacionRepository,
    pub inventario_repo: InventarioRepository,
    pub entrega_repo: EntregaRepository,
    pub cumplimiento_repo: CumplimientoRepository,
    pub reporte_operativo_repo: ReporteOperativoRepository,
    pub reporte_repo: ReporteRepository,
    pub referencia_repo: ReferenciaRepository,

    // Servicios con reglas de negocio / transacciones
    pub auth_service: AuthService,
    pub personal_service: PersonalService,
    pub asignacion_service: AsignacionService,
    pub inventario_service: InventarioService,
    pub entrega_service: EntregaService,
    pub auditoria_service: AuditoriaService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        // Conecta a la base de datos, propagando errores con '?'
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida con éxito!");

        // --- Arma el grafo de dependencias ---
        let usuario_repo = UsuarioRepository::new(db_pool.clone());
        let guardia_repo = GuardiaRepository::new(db_pool.clone());
        let asignacion_repo = AsignacionRepository::new(db_pool.clone());
        let inventario_repo = InventarioRepository::new(db_pool.clone());
        let entrega_repo = EntregaRepository::new(db_pool.clone());
        let cumplimiento_repo = CumplimientoRepository::new(db_pool.clone());
        let reporte_operativo_repo = ReporteOperativoRepository::new(db_pool.clone());
        let reporte_repo = ReporteRepository::new(db_pool.clone());
        let referencia_repo = ReferenciaRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(usuario_repo.clone(), guardia_repo.clone(), jwt_secret.clone());
        let personal_service = PersonalService::new(
            usuario_repo.clone(),
            guardia_repo.clone(),
            db_pool.clone(),
        );
        let asignacion_service =
            AsignacionService::new(asignacion_repo.clone(), db_pool.clone());
        let inventario_service = InventarioService::new(
            inventario_repo.clone(),
            entrega_repo.clone(),
            guardia_repo.clone(),
            db_pool.clone(),
        );
        let entrega_service = EntregaService::new(
            entrega_repo.clone(),
            inventario_repo.clone(),
            db_pool.clone(),
        );
        let auditoria_service = AuditoriaService::new(cumplimiento_repo.clone());

        Ok(Self {
            db_pool,
            usuario_repo,
            guardia_repo,
            asignacion_repo,
            inventario_repo,
            entrega_repo,
            cumplimiento_repo,
            reporte_operativo_repo,
            reporte_repo,
            referencia_repo,
            auth_service,
            personal_service,
            asignacion_service,
            inventario_service,
            entrega_service,
            auditoria_service,
        })
    }
}
