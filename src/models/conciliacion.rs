// src/models/conciliacion.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Ciclo de vida: la transacción nace sin conciliar (matched = false) al
// importar el CSV y pasa a conciliada exactamente una vez, por auto-match o
// por match manual. La vuelta atrás es una transición explícita
// (desconciliar) que además cancela el pago asociado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransaccionBancaria {
    pub id: Uuid,

    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,

    #[schema(example = "PAGO OC-228-A04JP-ACE TRANSFERENCIA")]
    pub descripcion_banco: String,

    // Descripción en minúsculas, lista para la búsqueda de folios.
    pub descripcion_banco_normalizada: Option<String>,

    #[schema(example = "4384.80")]
    pub monto: Decimal,

    pub referencia_bancaria: Option<String>,

    pub orden_compra_id: Option<Uuid>,
    pub pago_id: Option<Uuid>,

    pub matched: bool,

    #[schema(example = "csv")]
    pub origen: String,

    // 100 en auto-match, 0 en match manual.
    #[schema(example = 100)]
    pub match_confidence: i32,
    pub match_manual: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Una fila ya parseada del CSV del banco:
// fecha, descripcionBanco, monto, referenciaBancaria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilaCsv {
    #[schema(value_type = String, format = Date)]
    pub fecha: NaiveDate,
    pub descripcion_banco: String,
    pub monto: Decimal,
    pub referencia_bancaria: Option<String>,
}

// Resumen que devuelve la conciliación automática.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResumenConciliacion {
    pub candidatas: usize,
    pub aplicadas: Vec<ParejaConciliada>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParejaConciliada {
    pub transaccion_id: Uuid,
    pub orden_compra_id: Uuid,
    #[schema(example = "228-A04JP-ACE")]
    pub numero_orden: String,
    pub pago_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportarCsvPayload {
    // Contenido crudo del CSV del banco:
    // fecha, descripcionBanco, monto, referenciaBancaria
    #[validate(length(min = 1, message = "requerido"))]
    pub csv: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchManualPayload {
    pub transaccion_id: Uuid,
    pub orden_compra_id: Uuid,
}
