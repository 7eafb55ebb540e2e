// src/handlers/conciliacion.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::conciliacion::{
        ImportarCsvPayload, MatchManualPayload, ParejaConciliada, ResumenConciliacion,
        TransaccionBancaria,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroTransacciones {
    pub matched: Option<bool>,
}

// GET /api/v1/conciliacion/transacciones
#[utoipa::path(
    get,
    path = "/api/v1/conciliacion/transacciones",
    tag = "Conciliacion",
    params(FiltroTransacciones),
    responses(
        (status = 200, description = "Transacciones bancarias", body = [TransaccionBancaria])
    )
)]
pub async fn listar_transacciones(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroTransacciones>,
) -> Result<Json<Vec<TransaccionBancaria>>, AppError> {
    let transacciones = app_state
        .conciliacion_service
        .listar(filtro.matched)
        .await?;

    Ok(Json(transacciones))
}

// POST /api/v1/conciliacion/importar
// Recibe el contenido crudo del CSV. Las filas inválidas se descartan una a
// una; un lote sin filas válidas regresa 400 en lugar de importar nada en
// silencio.
#[utoipa::path(
    post,
    path = "/api/v1/conciliacion/importar",
    tag = "Conciliacion",
    request_body = ImportarCsvPayload,
    responses(
        (status = 201, description = "Transacciones importadas", body = [TransaccionBancaria]),
        (status = 400, description = "El CSV no contiene filas válidas")
    )
)]
pub async fn importar_csv(
    State(app_state): State<AppState>,
    Json(payload): Json<ImportarCsvPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let importadas = app_state
        .conciliacion_service
        .importar_csv(&payload.csv)
        .await?;

    Ok((StatusCode::CREATED, Json(importadas)))
}

// POST /api/v1/conciliacion/auto
#[utoipa::path(
    post,
    path = "/api/v1/conciliacion/auto",
    tag = "Conciliacion",
    responses(
        (status = 200, description = "Resumen de la conciliación automática", body = ResumenConciliacion),
        (status = 500, description = "Conciliación aplicada parcialmente")
    )
)]
pub async fn auto_conciliar(
    State(app_state): State<AppState>,
) -> Result<Json<ResumenConciliacion>, AppError> {
    let resumen = app_state.conciliacion_service.auto_conciliar().await?;
    Ok(Json(resumen))
}

// POST /api/v1/conciliacion/manual
#[utoipa::path(
    post,
    path = "/api/v1/conciliacion/manual",
    tag = "Conciliacion",
    request_body = MatchManualPayload,
    responses(
        (status = 200, description = "Transacción conciliada", body = ParejaConciliada),
        (status = 404, description = "Transacción u orden no encontrada"),
        (status = 409, description = "La transacción ya estaba conciliada")
    )
)]
pub async fn conciliar_manual(
    State(app_state): State<AppState>,
    Json(payload): Json<MatchManualPayload>,
) -> Result<Json<ParejaConciliada>, AppError> {
    let pareja = app_state
        .conciliacion_service
        .conciliar_manual(payload.transaccion_id, payload.orden_compra_id)
        .await?;

    Ok(Json(pareja))
}

// POST /api/v1/conciliacion/desconciliar/{id}
// Transición explícita Matched -> Unmatched; cancela el pago del match.
#[utoipa::path(
    post,
    path = "/api/v1/conciliacion/desconciliar/{id}",
    tag = "Conciliacion",
    params(("id" = Uuid, Path, description = "ID de la transacción bancaria")),
    responses(
        (status = 200, description = "Transacción desconciliada", body = TransaccionBancaria),
        (status = 404, description = "Transacción no encontrada"),
        (status = 409, description = "La transacción no estaba conciliada")
    )
)]
pub async fn desconciliar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransaccionBancaria>, AppError> {
    let transaccion = app_state.conciliacion_service.desconciliar(id).await?;
    Ok(Json(transaccion))
}
