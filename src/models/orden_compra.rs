// src/models/orden_compra.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

// El descuento llega en dos sabores según el formulario de origen: un
// porcentaje sobre el subtotal o un monto fijo en pesos. El modo es SIEMPRE
// explícito; nunca se adivina por el valor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DescuentoModo {
    Porcentaje,
    Monto,
}

impl DescuentoModo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Porcentaje => "porcentaje",
            Self::Monto => "monto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstadoOrden {
    Borrador,
    Emitida,
    Recibida,
    Facturada,
    Pagada,
    Cancelada,
}

impl EstadoOrden {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Borrador => "borrador",
            Self::Emitida => "emitida",
            Self::Recibida => "recibida",
            Self::Facturada => "facturada",
            Self::Pagada => "pagada",
            Self::Cancelada => "cancelada",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompra {
    pub id: Uuid,

    // Folio legible: {codigo_obra}-{letra}{nn}{iniciales_comprador}-{prefijo_proveedor}
    #[schema(example = "228-A04JP-ACE")]
    pub numero_orden: String,

    pub obra_id: Uuid,
    pub proveedor_id: Uuid,
    pub requisicion_id: Option<Uuid>,
    pub comprador_nombre: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub fecha_emision: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub fecha_entrega: NaiveDate,

    #[schema(example = "emitida")]
    pub estado: String,

    // en_obra | bodega | recoger
    pub tipo_entrega: Option<String>,

    pub has_iva: bool,

    #[schema(example = "porcentaje")]
    pub modo_descuento: String,

    // Valor capturado del descuento (porcentaje o monto, según el modo).
    #[schema(example = "10.00")]
    pub descuento: Decimal,

    // Los cuatro totales se recalculan SIEMPRE juntos en services::totals;
    // nadie parcha uno solo.
    #[schema(example = "4200.00")]
    pub subtotal: Decimal,
    #[schema(example = "420.00")]
    pub descuento_monto: Decimal,
    #[schema(example = "604.80")]
    pub iva: Decimal,
    #[schema(example = "4384.80")]
    pub total: Decimal,

    pub observaciones: Option<String>,
    pub creado_por: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompraItem {
    pub id: Uuid,
    pub orden_compra_id: Uuid,

    #[schema(example = "10")]
    pub cantidad: Decimal,
    #[schema(example = "pza")]
    pub unidad: String,
    #[schema(example = "Varilla 3/8 R-42")]
    pub descripcion: String,
    #[schema(example = "200.00")]
    pub precio_unitario: Decimal,

    // Invariante: total == round2(cantidad * precio_unitario).
    // Se recalcula en el servidor; el cliente nunca lo dicta.
    #[schema(example = "2000.00")]
    pub total: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompraDetalle {
    #[serde(flatten)]
    pub header: OrdenCompra,
    pub items: Vec<OrdenCompraItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompraItemCreate {
    #[schema(example = "10")]
    pub cantidad: Decimal,
    #[validate(length(min = 1, message = "requerido"))]
    pub unidad: String,
    #[validate(length(min = 1, message = "requerido"))]
    pub descripcion: String,
    #[schema(example = "200.00")]
    pub precio_unitario: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompraCreate {
    pub obra_id: Uuid,
    pub proveedor_id: Uuid,
    pub requisicion_id: Option<Uuid>,
    pub comprador_nombre: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub fecha_entrega: NaiveDate,
    pub tipo_entrega: Option<String>,

    #[serde(default = "con_iva")]
    pub has_iva: bool,

    #[serde(default = "modo_monto")]
    pub modo_descuento: DescuentoModo,

    // Valor del descuento en el modo indicado; el monto efectivo lo deriva
    // la calculadora de totales.
    #[serde(default)]
    pub descuento: Decimal,

    pub observaciones: Option<String>,
    pub creado_por: Option<String>,

    #[validate(length(min = 1, message = "la orden necesita al menos una partida"), nested)]
    pub items: Vec<OrdenCompraItemCreate>,
}

fn con_iva() -> bool {
    true
}

fn modo_monto() -> DescuentoModo {
    DescuentoModo::Monto
}

// La edición reemplaza partidas y configuración completas y recalcula los
// totales desde cero; no existe el parche parcial de un solo total.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrdenCompraUpdate {
    pub comprador_nombre: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub fecha_entrega: NaiveDate,
    pub tipo_entrega: Option<String>,

    pub estado: Option<EstadoOrden>,

    #[serde(default = "con_iva")]
    pub has_iva: bool,

    #[serde(default = "modo_monto")]
    pub modo_descuento: DescuentoModo,

    #[serde(default)]
    pub descuento: Decimal,

    pub observaciones: Option<String>,

    #[validate(length(min = 1, message = "la orden necesita al menos una partida"), nested)]
    pub items: Vec<OrdenCompraItemCreate>,
}
