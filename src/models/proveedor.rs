// src/models/proveedor.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Catálogo de proveedores. `tipo_proveedor` se guarda como TEXT:
// material | servicio | renta | mixto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Proveedor {
    pub id: Uuid,

    #[schema(example = "Aceros del Norte SA de CV")]
    pub razon_social: String,

    // Alias corto; su prefijo participa en el folio de las órdenes.
    #[schema(example = "ACE")]
    pub alias_proveedor: Option<String>,

    pub nombre_comercial: Option<String>,

    #[schema(example = "ANO910101AB1")]
    pub rfc: String,

    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub codigo_postal: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub contacto_principal: Option<String>,

    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,
    pub clabe: Option<String>,

    pub tipo_proveedor: Option<String>,
    pub credito_dias: i32,
    pub limite_credito: Decimal,
    pub activo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProveedorCreate {
    #[validate(length(min = 1, message = "requerido"))]
    pub razon_social: String,

    pub alias_proveedor: Option<String>,
    pub nombre_comercial: Option<String>,

    #[validate(length(min = 1, message = "requerido"))]
    pub rfc: String,

    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub codigo_postal: Option<String>,
    pub telefono: Option<String>,
    #[validate(email(message = "e-mail inválido"))]
    pub email: Option<String>,
    pub contacto_principal: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,
    pub clabe: Option<String>,
    pub tipo_proveedor: Option<String>,
    #[serde(default)]
    pub credito_dias: i32,
    #[serde(default)]
    pub limite_credito: Decimal,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
}

fn activo_por_defecto() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProveedorUpdate {
    pub razon_social: Option<String>,
    pub alias_proveedor: Option<String>,
    pub nombre_comercial: Option<String>,
    pub rfc: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub codigo_postal: Option<String>,
    pub telefono: Option<String>,
    #[validate(email(message = "e-mail inválido"))]
    pub email: Option<String>,
    pub contacto_principal: Option<String>,
    pub banco: Option<String>,
    pub numero_cuenta: Option<String>,
    pub clabe: Option<String>,
    pub tipo_proveedor: Option<String>,
    pub credito_dias: Option<i32>,
    pub limite_credito: Option<Decimal>,
    pub activo: Option<bool>,
}
