// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ConciliacionRepository, ObrasRepository, OrdenesRepository, PagosRepository,
        ProveedoresRepository, RequisicionesRepository, UserRepository,
    },
    services::{
        auth::AuthService, conciliacion_service::ConciliacionService,
        document_service::DocumentService, ordenes_service::OrdenesService,
        pagos_service::PagosService,
    },
};

// El estado compartido accesible en toda la aplicación
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    pub auth_service: AuthService,
    pub ordenes_service: OrdenesService,
    pub pagos_service: PagosService,
    pub conciliacion_service: ConciliacionService,
    pub document_service: DocumentService,

    // Los catálogos simples no necesitan servicio: los handlers hablan
    // directo con el repositorio.
    pub obras_repo: ObrasRepository,
    pub proveedores_repo: ProveedoresRepository,
    pub requisiciones_repo: RequisicionesRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definida");

        // Conecta a la base de datos, propagando errores con '?'
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexión con la base de datos establecida");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let obras_repo = ObrasRepository::new(db_pool.clone());
        let proveedores_repo = ProveedoresRepository::new(db_pool.clone());
        let requisiciones_repo = RequisicionesRepository::new(db_pool.clone());
        let ordenes_repo = OrdenesRepository::new(db_pool.clone());
        let pagos_repo = PagosRepository::new(db_pool.clone());
        let conciliacion_repo = ConciliacionRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone());
        let ordenes_service = OrdenesService::new(
            ordenes_repo.clone(),
            obras_repo.clone(),
            proveedores_repo.clone(),
            db_pool.clone(),
        );
        let pagos_service = PagosService::new(
            pagos_repo.clone(),
            ordenes_repo.clone(),
            db_pool.clone(),
        );
        let conciliacion_service = ConciliacionService::new(
            conciliacion_repo,
            ordenes_repo.clone(),
            pagos_repo,
            db_pool.clone(),
        );
        let document_service = DocumentService::new(
            ordenes_repo,
            obras_repo.clone(),
            proveedores_repo.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            ordenes_service,
            pagos_service,
            conciliacion_service,
            document_service,
            obras_repo,
            proveedores_repo,
            requisiciones_repo,
        })
    }
}
