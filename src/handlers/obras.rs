// src/handlers/obras.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::obra::{MetricasObra, Obra, ObraCreate, ObraUpdate},
    services::totals,
};

// GET /api/v1/obras
#[utoipa::path(
    get,
    path = "/api/v1/obras",
    tag = "Obras",
    responses(
        (status = 200, description = "Catálogo de obras", body = [Obra])
    )
)]
pub async fn listar_obras(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Obra>>, AppError> {
    let obras = app_state.obras_repo.listar().await?;
    Ok(Json(obras))
}

// GET /api/v1/obras/{id}
#[utoipa::path(
    get,
    path = "/api/v1/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Obra", body = Obra),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn obtener_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Obra>, AppError> {
    let obra = app_state
        .obras_repo
        .obtener(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Obra {}", id)))?;

    Ok(Json(obra))
}

// POST /api/v1/obras
#[utoipa::path(
    post,
    path = "/api/v1/obras",
    tag = "Obras",
    request_body = ObraCreate,
    responses(
        (status = 201, description = "Obra creada", body = Obra)
    )
)]
pub async fn crear_obra(
    State(app_state): State<AppState>,
    Json(payload): Json<ObraCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let obra = app_state.obras_repo.crear(&payload).await?;

    Ok((StatusCode::CREATED, Json(obra)))
}

// PUT /api/v1/obras/{id}
#[utoipa::path(
    put,
    path = "/api/v1/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    request_body = ObraUpdate,
    responses(
        (status = 200, description = "Obra actualizada", body = Obra),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn actualizar_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ObraUpdate>,
) -> Result<Json<Obra>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let obra = app_state
        .obras_repo
        .actualizar(id, &payload)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Obra {}", id)))?;

    Ok(Json(obra))
}

// DELETE /api/v1/obras/{id} (protegida)
#[utoipa::path(
    delete,
    path = "/api/v1/obras/{id}",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 204, description = "Obra eliminada"),
        (status = 404, description = "Obra no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_obra(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let borradas = app_state.obras_repo.eliminar(id).await?;
    if borradas == 0 {
        return Err(AppError::ResourceNotFound(format!("Obra {}", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/obras/{id}/metricas
#[utoipa::path(
    get,
    path = "/api/v1/obras/{id}/metricas",
    tag = "Obras",
    params(("id" = Uuid, Path, description = "ID de la obra")),
    responses(
        (status = 200, description = "Métricas derivadas de la obra", body = MetricasObra),
        (status = 404, description = "Obra no encontrada")
    )
)]
pub async fn metricas_obra(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MetricasObra>, AppError> {
    let obra = app_state
        .obras_repo
        .obtener(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Obra {}", id)))?;

    let (comprometido, pagado) = app_state.obras_repo.comprometido_y_pagado(id).await?;

    let saldo = totals::redondear2(obra.monto_contratado - comprometido);
    let porcentaje_ejecutado = if obra.monto_contratado > Decimal::ZERO {
        totals::redondear2(comprometido / obra.monto_contratado * Decimal::from(100))
    } else {
        Decimal::ZERO
    };

    Ok(Json(MetricasObra {
        obra_id: obra.id,
        comprometido,
        pagado,
        saldo,
        porcentaje_ejecutado,
        total_estimaciones: obra.total_estimaciones,
        total_gastos: obra.total_gastos,
        saldo_actual: obra.saldo_actual,
        avance_fisico_porcentaje: obra.avance_fisico_porcentaje,
    }))
}
