pub mod asignacion;
pub mod auth;
pub mod cumplimiento;
pub mod entrega;
pub mod guardia;
pub mod inventario;
pub mod referencias;
pub mod reporte_operativo;
pub mod reportes;
