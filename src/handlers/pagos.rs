// src/handlers/pagos.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::pago::{Pago, PagoCreate},
};

// GET /api/v1/pagos
#[utoipa::path(
    get,
    path = "/api/v1/pagos",
    tag = "Pagos",
    responses(
        (status = 200, description = "Pagos registrados", body = [Pago])
    )
)]
pub async fn listar_pagos(State(app_state): State<AppState>) -> Result<Json<Vec<Pago>>, AppError> {
    let pagos = app_state.pagos_service.listar().await?;
    Ok(Json(pagos))
}

// POST /api/v1/pagos
#[utoipa::path(
    post,
    path = "/api/v1/pagos",
    tag = "Pagos",
    request_body = PagoCreate,
    responses(
        (status = 201, description = "Pago registrado", body = Pago),
        (status = 404, description = "Orden de compra inválida")
    )
)]
pub async fn crear_pago(
    State(app_state): State<AppState>,
    Json(payload): Json<PagoCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let pago = app_state.pagos_service.crear(&payload).await?;

    Ok((StatusCode::CREATED, Json(pago)))
}
