pub mod auth;
pub mod conciliacion_service;
pub mod document_service;
pub mod folio;
pub mod ordenes_service;
pub mod pagos_service;
pub mod totals;
