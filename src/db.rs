pub mod asignacion_repo;
pub use asignacion_repo::AsignacionRepository;
pub mod cumplimiento_repo;
pub use cumplimiento_repo::CumplimientoRepository;
pub mod entrega_repo;
pub use entrega_repo::EntregaRepository;
pub mod guardia_repo;
pub use guardia_repo::GuardiaRepository;
pub mod inventario_repo;
pub use inventario_repo::InventarioRepository;
pub mod referencia_repo;
pub use referencia_repo::ReferenciaRepository;
pub mod reporte_operativo_repo;
pub use reporte_operativo_repo::ReporteOperativoRepository;
pub mod reporte_repo;
pub use reporte_repo::ReporteRepository;
pub mod usuario_repo;
pub use usuario_repo::UsuarioRepository;
