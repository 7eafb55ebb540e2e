// src/handlers/ordenes_compra.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
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
    middleware::auth::AuthenticatedUser,
    models::orden_compra::{
        OrdenCompra, OrdenCompraCreate, OrdenCompraDetalle, OrdenCompraUpdate,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct FiltroOrdenes {
    pub obra_id: Option<Uuid>,
    pub estado: Option<String>,
}

// GET /api/v1/ordenes-compra
#[utoipa::path(
    get,
    path = "/api/v1/ordenes-compra",
    tag = "Ordenes de compra",
    params(FiltroOrdenes),
    responses(
        (status = 200, description = "Órdenes de compra", body = [OrdenCompra])
    )
)]
pub async fn listar_ordenes(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroOrdenes>,
) -> Result<Json<Vec<OrdenCompra>>, AppError> {
    let ordenes = app_state
        .ordenes_service
        .listar(filtro.obra_id, filtro.estado.as_deref())
        .await?;

    Ok(Json(ordenes))
}

// GET /api/v1/ordenes-compra/{id}
#[utoipa::path(
    get,
    path = "/api/v1/ordenes-compra/{id}",
    tag = "Ordenes de compra",
    params(("id" = Uuid, Path, description = "ID de la orden")),
    responses(
        (status = 200, description = "Orden con partidas", body = OrdenCompraDetalle),
        (status = 404, description = "Orden no encontrada")
    )
)]
pub async fn obtener_orden(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrdenCompraDetalle>, AppError> {
    let detalle = app_state.ordenes_service.detalle(id).await?;
    Ok(Json(detalle))
}

// POST /api/v1/ordenes-compra
// El folio y los totales se calculan en el servidor; el payload solo trae
// partidas y configuración de descuento/IVA.
#[utoipa::path(
    post,
    path = "/api/v1/ordenes-compra",
    tag = "Ordenes de compra",
    request_body = OrdenCompraCreate,
    responses(
        (status = 201, description = "Orden creada y foliada", body = OrdenCompraDetalle),
        (status = 404, description = "Obra o proveedor no encontrado"),
        (status = 400, description = "Cantidad, precio o descuento inválidos")
    )
)]
pub async fn crear_orden(
    State(app_state): State<AppState>,
    Json(payload): Json<OrdenCompraCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state.ordenes_service.crear(&payload).await?;

    Ok((StatusCode::CREATED, Json(detalle)))
}

// PUT /api/v1/ordenes-compra/{id}
#[utoipa::path(
    put,
    path = "/api/v1/ordenes-compra/{id}",
    tag = "Ordenes de compra",
    params(("id" = Uuid, Path, description = "ID de la orden")),
    request_body = OrdenCompraUpdate,
    responses(
        (status = 200, description = "Orden actualizada con totales recalculados", body = OrdenCompraDetalle),
        (status = 404, description = "Orden no encontrada")
    )
)]
pub async fn actualizar_orden(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrdenCompraUpdate>,
) -> Result<Json<OrdenCompraDetalle>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detalle = app_state.ordenes_service.actualizar(id, &payload).await?;

    Ok(Json(detalle))
}

// DELETE /api/v1/ordenes-compra/{id} (protegida)
#[utoipa::path(
    delete,
    path = "/api/v1/ordenes-compra/{id}",
    tag = "Ordenes de compra",
    params(("id" = Uuid, Path, description = "ID de la orden")),
    responses(
        (status = 204, description = "Orden eliminada"),
        (status = 404, description = "Orden no encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_orden(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.ordenes_service.eliminar(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// GET /api/v1/ordenes-compra/{id}/pdf
#[utoipa::path(
    get,
    path = "/api/v1/ordenes-compra/{id}/pdf",
    tag = "Ordenes de compra",
    params(("id" = Uuid, Path, description = "ID de la orden")),
    responses(
        (status = 200, description = "PDF de la orden"),
        (status = 404, description = "Orden no encontrada")
    )
)]
pub async fn pdf_orden(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.document_service.generar_orden_pdf(id).await?;

    // Headers para que el navegador descargue o muestre el PDF
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"orden_{}.pdf\"", id),
        ),
    ];

    Ok((StatusCode::OK, headers, pdf))
}
