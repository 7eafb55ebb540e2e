// src/models/pago.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetodoPago {
    Transferencia,
    Cheque,
    Efectivo,
}

impl MetodoPago {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transferencia => "transferencia",
            Self::Cheque => "cheque",
            Self::Efectivo => "efectivo",
        }
    }
}

// Un pago SIEMPRE cuelga de una orden de compra válida. Se crea a mano desde
// el módulo de pagos, o como efecto de conciliar una transacción bancaria.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pago {
    pub id: Uuid,

    #[schema(example = "PG-00042")]
    pub numero_pago: String,

    pub obra_id: Uuid,
    pub proveedor_id: Uuid,
    pub orden_compra_id: Uuid,

    #[schema(example = "4384.80")]
    pub monto: Decimal,

    #[schema(example = "transferencia")]
    pub metodo_pago: String,

    #[schema(value_type = String, format = Date)]
    pub fecha_programada: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_procesado: Option<NaiveDate>,

    // programado | procesando | completado | cancelado
    #[schema(example = "programado")]
    pub estado: String,

    pub referencia: Option<String>,
    pub folio_factura: Option<String>,
    pub monto_factura: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_factura: Option<NaiveDate>,
    pub dias_credito: Option<i32>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_vencimiento: Option<NaiveDate>,
    pub comprobante: Option<String>,
    pub observaciones: Option<String>,
    pub procesado_por: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagoCreate {
    pub obra_id: Uuid,
    pub proveedor_id: Uuid,
    pub orden_compra_id: Uuid,

    #[schema(example = "4384.80")]
    pub monto: Decimal,

    pub metodo_pago: MetodoPago,

    #[schema(value_type = String, format = Date)]
    pub fecha_programada: NaiveDate,

    pub referencia: Option<String>,
    pub folio_factura: Option<String>,
    pub monto_factura: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_factura: Option<NaiveDate>,
    pub dias_credito: Option<i32>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_vencimiento: Option<NaiveDate>,
    pub observaciones: Option<String>,
}
