// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa el logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() está bien aquí: si la configuración falla, la aplicación no
    // debe arrancar.
    let app_state = AppState::new()
        .await
        .expect("Falló la inicialización del estado de la aplicación.");

    // Corre las migraciones de SQLx al arrancar
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallaron las migraciones de la base de datos.");

    tracing::info!("✅ Migraciones de base de datos ejecutadas");

    // Rutas de autenticación (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rutas de usuario (protegidas por el guard)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let obras_routes = Router::new()
        .route("/", post(handlers::obras::crear_obra).get(handlers::obras::listar_obras))
        .route(
            "/{id}",
            get(handlers::obras::obtener_obra).put(handlers::obras::actualizar_obra),
        )
        .route("/{id}/metricas", get(handlers::obras::metricas_obra));

    // Las bajas de catálogo son acciones administrativas: pasan por el guard.
    let obras_admin_routes = Router::new()
        .route("/{id}", axum::routing::delete(handlers::obras::eliminar_obra))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let proveedores_routes = Router::new()
        .route(
            "/",
            post(handlers::proveedores::crear_proveedor)
                .get(handlers::proveedores::listar_proveedores),
        )
        .route(
            "/{id}",
            get(handlers::proveedores::obtener_proveedor)
                .put(handlers::proveedores::actualizar_proveedor),
        );

    let proveedores_admin_routes = Router::new()
        .route(
            "/{id}",
            axum::routing::delete(handlers::proveedores::eliminar_proveedor),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let requisiciones_routes = Router::new()
        .route(
            "/",
            post(handlers::requisiciones::crear_requisicion)
                .get(handlers::requisiciones::listar_requisiciones),
        )
        .route(
            "/{id}",
            get(handlers::requisiciones::obtener_requisicion)
                .put(handlers::requisiciones::actualizar_requisicion),
        );

    let ordenes_routes = Router::new()
        .route(
            "/",
            post(handlers::ordenes_compra::crear_orden)
                .get(handlers::ordenes_compra::listar_ordenes),
        )
        .route(
            "/{id}",
            get(handlers::ordenes_compra::obtener_orden)
                .put(handlers::ordenes_compra::actualizar_orden),
        )
        .route("/{id}/pdf", get(handlers::ordenes_compra::pdf_orden));

    let ordenes_admin_routes = Router::new()
        .route(
            "/{id}",
            axum::routing::delete(handlers::ordenes_compra::eliminar_orden),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let pagos_routes = Router::new().route(
        "/",
        post(handlers::pagos::crear_pago).get(handlers::pagos::listar_pagos),
    );

    let conciliacion_routes = Router::new()
        .route(
            "/transacciones",
            get(handlers::conciliacion::listar_transacciones),
        )
        .route("/importar", post(handlers::conciliacion::importar_csv))
        .route("/auto", post(handlers::conciliacion::auto_conciliar))
        .route("/manual", post(handlers::conciliacion::conciliar_manual))
        .route(
            "/desconciliar/{id}",
            post(handlers::conciliacion::desconciliar),
        );

    // Combina todo en el router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/v1/obras", obras_routes)
        .nest("/api/v1/obras", obras_admin_routes)
        .nest("/api/v1/proveedores", proveedores_routes)
        .nest("/api/v1/proveedores", proveedores_admin_routes)
        .nest("/api/v1/requisiciones", requisiciones_routes)
        .nest("/api/v1/ordenes-compra", ordenes_routes)
        .nest("/api/v1/ordenes-compra", ordenes_admin_routes)
        .nest("/api/v1/pagos", pagos_routes)
        .nest("/api/v1/conciliacion", conciliacion_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Arranca el servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falló el listener TCP");
    tracing::info!("🚀 Servidor escuchando en {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Error en el servidor Axum");
}
