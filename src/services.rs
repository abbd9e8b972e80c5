pub mod asignacion_service;
pub mod auditoria_service;
pub mod auth;
pub mod entrega_service;
pub mod inventario_service;
pub mod personal_service;
