// src/models/obra.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// La obra es el contrato de construcción que se está ejecutando.
// `estado` se guarda como TEXT: activa | suspendida | terminada | cancelada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Obra {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "228")]
    pub codigo: String,

    #[schema(example = "Torre Reforma Norte")]
    pub nombre: String,

    pub numero_contrato: String,
    pub cliente: String,
    pub residente: String,

    // Iniciales del residente, usadas al foliar requisiciones.
    #[schema(example = "JP")]
    pub residente_iniciales: Option<String>,

    pub direccion: Option<String>,

    #[schema(example = "12500000.00")]
    pub monto_contratado: Decimal,
    pub anticipo_porcentaje: Decimal,
    pub retencion_porcentaje: Decimal,
    pub saldo_actual: Decimal,
    pub total_estimaciones: Decimal,
    pub total_gastos: Decimal,
    pub avance_fisico_porcentaje: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-01-15")]
    pub fecha_inicio: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2026-12-15")]
    pub fecha_fin_programada: NaiveDate,
    pub plazo_ejecucion: i32,

    #[schema(example = "activa")]
    pub estado: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObraCreate {
    #[validate(length(min = 1, message = "requerido"))]
    #[schema(example = "228")]
    pub codigo: String,

    #[validate(length(min = 1, message = "requerido"))]
    pub nombre: String,

    #[validate(length(min = 1, message = "requerido"))]
    pub numero_contrato: String,

    #[validate(length(min = 1, message = "requerido"))]
    pub cliente: String,

    #[validate(length(min = 1, message = "requerido"))]
    pub residente: String,

    pub residente_iniciales: Option<String>,
    pub direccion: Option<String>,

    pub monto_contratado: Decimal,
    #[serde(default)]
    pub anticipo_porcentaje: Decimal,
    #[serde(default)]
    pub retencion_porcentaje: Decimal,
    #[serde(default)]
    pub saldo_actual: Decimal,
    #[serde(default)]
    pub total_estimaciones: Decimal,
    #[serde(default)]
    pub total_gastos: Decimal,
    #[serde(default)]
    pub avance_fisico_porcentaje: Decimal,

    #[schema(value_type = String, format = Date)]
    pub fecha_inicio: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub fecha_fin_programada: NaiveDate,
    pub plazo_ejecucion: i32,

    #[serde(default = "estado_activa")]
    pub estado: String,
}

fn estado_activa() -> String {
    "activa".to_string()
}

// Actualización parcial: lo que venga en None conserva el valor actual.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObraUpdate {
    pub nombre: Option<String>,
    pub numero_contrato: Option<String>,
    pub cliente: Option<String>,
    pub residente: Option<String>,
    pub residente_iniciales: Option<String>,
    pub direccion: Option<String>,
    pub monto_contratado: Option<Decimal>,
    pub anticipo_porcentaje: Option<Decimal>,
    pub retencion_porcentaje: Option<Decimal>,
    pub saldo_actual: Option<Decimal>,
    pub total_estimaciones: Option<Decimal>,
    pub total_gastos: Option<Decimal>,
    pub avance_fisico_porcentaje: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_inicio: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub fecha_fin_programada: Option<NaiveDate>,
    pub plazo_ejecucion: Option<i32>,
    pub estado: Option<String>,
}

// Métricas derivadas por obra: nunca se persisten, se calculan al vuelo
// sobre órdenes y pagos ya redondeados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricasObra {
    pub obra_id: Uuid,

    // Suma de totales de órdenes de compra no canceladas.
    #[schema(example = "845000.00")]
    pub comprometido: Decimal,

    // Suma de pagos no cancelados.
    #[schema(example = "320000.00")]
    pub pagado: Decimal,

    pub saldo: Decimal,
    pub porcentaje_ejecutado: Decimal,
    pub total_estimaciones: Decimal,
    pub total_gastos: Decimal,
    pub saldo_actual: Decimal,
    pub avance_fisico_porcentaje: Decimal,
}
