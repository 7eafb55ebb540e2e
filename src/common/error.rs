use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nuestro tipo de error, con `thiserror` para mejor ergonomía.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Cantidad inválida: {0}")]
    InvalidQuantity(rust_decimal::Decimal),

    #[error("Precio unitario inválido: {0}")]
    InvalidPrice(rust_decimal::Decimal),

    #[error("Descuento inválido: {0}")]
    InvalidDiscount(rust_decimal::Decimal),

    #[error("Monto inválido: {0}")]
    InvalidAmount(rust_decimal::Decimal),

    #[error("El CSV no contiene filas válidas")]
    EmptyBatch,

    #[error("La transacción bancaria ya está conciliada")]
    AlreadyMatched,

    #[error("La transacción bancaria no está conciliada")]
    NotMatched,

    #[error("Recurso no encontrado: {0}")]
    ResourceNotFound(String),

    // Conciliación aplicada parcialmente: las parejas anteriores quedaron
    // confirmadas, la transacción `fallida` no. Requiere revisión humana.
    #[error("Conciliación inconsistente: {aplicados} parejas aplicadas, falló la transacción {fallida}")]
    ReconciliationInconsistency { aplicados: usize, fallida: Uuid },

    #[error("El e-mail ya existe")]
    EmailAlreadyExists,

    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Fuente tipográfica no encontrada: {0}")]
    FontNotFound(String),

    // Variante para errores de base de datos (sqlx)
    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para cualquier otro error inesperado.
    // `anyhow::Error` captura bien el contexto del error.
    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos todos los detalles de la validación, campo por campo,
            // para que el formulario pueda pintarlos junto al input correcto.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::InvalidQuantity(_)
            | AppError::InvalidPrice(_)
            | AppError::InvalidDiscount(_)
            | AppError::InvalidAmount(_)
            | AppError::EmptyBatch => {
                let body = Json(json!({ "error": self.to_string() }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::AlreadyMatched | AppError::NotMatched => {
                let body = Json(json!({ "error": self.to_string() }));
                return (StatusCode::CONFLICT, body).into_response();
            }
            AppError::ResourceNotFound(ref recurso) => {
                let body = Json(json!({ "error": format!("No se encontró: {}", recurso) }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            // Este caso deja estado persistido que un humano debe revisar,
            // así que se reporta distinto de un error remoto normal.
            AppError::ReconciliationInconsistency { aplicados, fallida } => {
                tracing::error!(
                    aplicados,
                    %fallida,
                    "⚠️ Conciliación aplicada parcialmente; revisar transacción fallida"
                );
                let body = Json(json!({
                    "error": "La conciliación se aplicó parcialmente.",
                    "aplicados": aplicados,
                    "transaccionFallida": fallida,
                }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "Este e-mail ya está en uso."),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "E-mail o contraseña inválidos."),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Token de autenticación inválido o ausente."),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "Usuario no encontrado."),

            // Todo lo demás (DatabaseError, InternalServerError...) es un 500.
            // `tracing` registra el mensaje detallado que nos dio `thiserror`.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocurrió un error inesperado.")
            }
        };

        // Respuesta estándar para errores simples que solo llevan un mensaje.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
