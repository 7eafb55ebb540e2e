// src/models/requisicion.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requisicion {
    pub id: Uuid,

    // Folio generado: REQ{codigo_obra}-{consecutivo}{iniciales_residente}
    #[schema(example = "REQ228-4JP")]
    pub numero_requisicion: String,

    pub obra_id: Uuid,
    pub solicitado_por: String,

    #[schema(value_type = String, format = Date)]
    pub fecha_solicitud: NaiveDate,

    // normal | urgente | muy_urgente
    #[schema(example = "normal")]
    pub urgencia: String,

    // pendiente | aprobada | rechazada | en_proceso | completada
    #[schema(example = "pendiente")]
    pub estado: String,

    pub observaciones: Option<String>,
    pub aprobado_por: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_aprobacion: Option<NaiveDate>,
    pub motivo_rechazo: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisicionItem {
    pub id: Uuid,
    pub requisicion_id: Uuid,

    #[schema(example = "12.5")]
    pub cantidad: Decimal,
    #[schema(example = "m3")]
    pub unidad: String,
    #[schema(example = "Concreto premezclado f'c=250")]
    pub descripcion: String,

    pub created_at: DateTime<Utc>,
}

// Cabecera + partidas, como la consume el frontend.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisicionDetalle {
    #[serde(flatten)]
    pub header: Requisicion,
    pub items: Vec<RequisicionItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisicionItemCreate {
    pub cantidad: Decimal,
    #[validate(length(min = 1, message = "requerido"))]
    pub unidad: String,
    #[validate(length(min = 1, message = "requerido"))]
    pub descripcion: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisicionCreate {
    pub obra_id: Uuid,

    #[validate(length(min = 1, message = "requerido"))]
    pub solicitado_por: String,

    #[serde(default = "urgencia_normal")]
    pub urgencia: String,

    pub observaciones: Option<String>,

    #[validate(length(min = 1, message = "la requisición necesita al menos una partida"), nested)]
    pub items: Vec<RequisicionItemCreate>,
}

fn urgencia_normal() -> String {
    "normal".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequisicionUpdate {
    pub urgencia: Option<String>,
    pub estado: Option<String>,
    pub observaciones: Option<String>,
    pub aprobado_por: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_aprobacion: Option<NaiveDate>,
    pub motivo_rechazo: Option<String>,
}
