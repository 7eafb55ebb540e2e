pub mod user_repo;
pub use user_repo::UserRepository;
pub mod obras_repo;
pub use obras_repo::ObrasRepository;
pub mod proveedores_repo;
pub use proveedores_repo::ProveedoresRepository;
pub mod requisiciones_repo;
pub use requisiciones_repo::RequisicionesRepository;
pub mod ordenes_repo;
pub use ordenes_repo::OrdenesRepository;
pub mod pagos_repo;
pub use pagos_repo::PagosRepository;
pub mod conciliacion_repo;
pub use conciliacion_repo::ConciliacionRepository;
