pub mod auth;
pub mod conciliacion;
pub mod obra;
pub mod orden_compra;
pub mod pago;
pub mod proveedor;
pub mod requisicion;
