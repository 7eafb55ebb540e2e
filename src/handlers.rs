pub mod auth;
pub mod conciliacion;
pub mod obras;
pub mod ordenes_compra;
pub mod pagos;
pub mod proveedores;
pub mod requisiciones;
