// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Obras ---
        handlers::obras::listar_obras,
        handlers::obras::obtener_obra,
        handlers::obras::crear_obra,
        handlers::obras::actualizar_obra,
        handlers::obras::eliminar_obra,
        handlers::obras::metricas_obra,

        // --- Proveedores ---
        handlers::proveedores::listar_proveedores,
        handlers::proveedores::obtener_proveedor,
        handlers::proveedores::crear_proveedor,
        handlers::proveedores::actualizar_proveedor,
        handlers::proveedores::eliminar_proveedor,

        // --- Requisiciones ---
        handlers::requisiciones::listar_requisiciones,
        handlers::requisiciones::obtener_requisicion,
        handlers::requisiciones::crear_requisicion,
        handlers::requisiciones::actualizar_requisicion,

        // --- Ordenes de compra ---
        handlers::ordenes_compra::listar_ordenes,
        handlers::ordenes_compra::obtener_orden,
        handlers::ordenes_compra::crear_orden,
        handlers::ordenes_compra::actualizar_orden,
        handlers::ordenes_compra::eliminar_orden,
        handlers::ordenes_compra::pdf_orden,

        // --- Pagos ---
        handlers::pagos::listar_pagos,
        handlers::pagos::crear_pago,

        // --- Conciliacion ---
        handlers::conciliacion::listar_transacciones,
        handlers::conciliacion::importar_csv,
        handlers::conciliacion::auto_conciliar,
        handlers::conciliacion::conciliar_manual,
        handlers::conciliacion::desconciliar,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Obras ---
            models::obra::Obra,
            models::obra::ObraCreate,
            models::obra::ObraUpdate,
            models::obra::MetricasObra,

            // --- Proveedores ---
            models::proveedor::Proveedor,
            models::proveedor::ProveedorCreate,
            models::proveedor::ProveedorUpdate,

            // --- Requisiciones ---
            models::requisicion::Requisicion,
            models::requisicion::RequisicionItem,
            models::requisicion::RequisicionDetalle,
            models::requisicion::RequisicionCreate,
            models::requisicion::RequisicionItemCreate,
            models::requisicion::RequisicionUpdate,

            // --- Ordenes de compra ---
            models::orden_compra::DescuentoModo,
            models::orden_compra::EstadoOrden,
            models::orden_compra::OrdenCompra,
            models::orden_compra::OrdenCompraItem,
            models::orden_compra::OrdenCompraDetalle,
            models::orden_compra::OrdenCompraCreate,
            models::orden_compra::OrdenCompraItemCreate,
            models::orden_compra::OrdenCompraUpdate,

            // --- Pagos ---
            models::pago::MetodoPago,
            models::pago::Pago,
            models::pago::PagoCreate,

            // --- Conciliacion ---
            models::conciliacion::TransaccionBancaria,
            models::conciliacion::FilaCsv,
            models::conciliacion::ImportarCsvPayload,
            models::conciliacion::MatchManualPayload,
            models::conciliacion::ResumenConciliacion,
            models::conciliacion::ParejaConciliada,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticación y registro"),
        (name = "Obras", description = "Catálogo de obras y métricas"),
        (name = "Proveedores", description = "Catálogo de proveedores"),
        (name = "Requisiciones", description = "Requisiciones de material"),
        (name = "Ordenes de compra", description = "Órdenes de compra, totales y PDF"),
        (name = "Pagos", description = "Programación y registro de pagos"),
        (name = "Conciliacion", description = "Conciliación bancaria por folio")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
