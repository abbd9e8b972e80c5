pub mod asignaciones;
pub mod auditoria;
pub mod auth;
pub mod bitacora;
pub mod blacklist;
pub mod entregas;
pub mod guardias;
pub mod inventario;
pub mod referencias;
pub mod reportes;
pub mod reportes_operativos;
pub mod usuarios;
