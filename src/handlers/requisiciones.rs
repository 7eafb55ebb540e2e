// src/handlers/requisiciones.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::requisicion::{
        Requisicion, RequisicionCreate, RequisicionDetalle, RequisicionUpdate,
    },
};

// GET /api/v1/requisiciones
#[utoipa::path(
    get,
    path = "/api/v1/requisiciones",
    tag = "Requisiciones",
    responses(
        (status = 200, description = "Requisiciones de material", body = [Requisicion])
    )
)]
pub async fn listar_requisiciones(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Requisicion>>, AppError> {
    let requisiciones = app_state.requisiciones_repo.listar().await?;
    Ok(Json(requisiciones))
}

// GET /api/v1/requisiciones/{id}
#[utoipa::path(
    get,
    path = "/api/v1/requisiciones/{id}",
    tag = "Requisiciones",
    params(("id" = Uuid, Path, description = "ID de la requisición")),
    responses(
        (status = 200, description = "Requisición con partidas", body = RequisicionDetalle),
        (status = 404, description = "Requisición no encontrada")
    )
)]
pub async fn obtener_requisicion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequisicionDetalle>, AppError> {
    let detalle = app_state
        .requisiciones_repo
        .obtener_detalle(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Requisición {}", id)))?;

    Ok(Json(detalle))
}

// POST /api/v1/requisiciones
#[utoipa::path(
    post,
    path = "/api/v1/requisiciones",
    tag = "Requisiciones",
    request_body = RequisicionCreate,
    responses(
        (status = 201, description = "Requisición creada y foliada", body = RequisicionDetalle),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn crear_requisicion(
    State(app_state): State<AppState>,
    Json(payload): Json<RequisicionCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state.requisiciones_repo.crear(&payload).await?;

    Ok((StatusCode::CREATED, Json(detalle)))
}

// PUT /api/v1/requisiciones/{id}
// Cubre el flujo de aprobación/rechazo: estado, aprobadoPor, motivoRechazo.
#[utoipa::path(
    put,
    path = "/api/v1/requisiciones/{id}",
    tag = "Requisiciones",
    params(("id" = Uuid, Path, description = "ID de la requisición")),
    request_body = RequisicionUpdate,
    responses(
        (status = 200, description = "Requisición actualizada", body = Requisicion),
        (status = 404, description = "Requisición no encontrada")
    )
)]
pub async fn actualizar_requisicion(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RequisicionUpdate>,
) -> Result<Json<Requisicion>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let requisicion = app_state
        .requisiciones_repo
        .actualizar(id, &payload)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Requisición {}", id)))?;

    Ok(Json(requisicion))
}
