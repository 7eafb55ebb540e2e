// src/handlers/proveedores.rs

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
    middleware::auth::AuthenticatedUser,
    models::proveedor::{Proveedor, ProveedorCreate, ProveedorUpdate},
};

// GET /api/v1/proveedores
#[utoipa::path(
    get,
    path = "/api/v1/proveedores",
    tag = "Proveedores",
    responses(
        (status = 200, description = "Catálogo de proveedores", body = [Proveedor])
    )
)]
pub async fn listar_proveedores(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Proveedor>>, AppError> {
    let proveedores = app_state.proveedores_repo.listar().await?;
    Ok(Json(proveedores))
}

// GET /api/v1/proveedores/{id}
#[utoipa::path(
    get,
    path = "/api/v1/proveedores/{id}",
    tag = "Proveedores",
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    responses(
        (status = 200, description = "Proveedor", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado")
    )
)]
pub async fn obtener_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Proveedor>, AppError> {
    let proveedor = app_state
        .proveedores_repo
        .obtener(id)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Proveedor {}", id)))?;

    Ok(Json(proveedor))
}

// POST /api/v1/proveedores
#[utoipa::path(
    post,
    path = "/api/v1/proveedores",
    tag = "Proveedores",
    request_body = ProveedorCreate,
    responses(
        (status = 201, description = "Proveedor creado", body = Proveedor)
    )
)]
pub async fn crear_proveedor(
    State(app_state): State<AppState>,
    Json(payload): Json<ProveedorCreate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let proveedor = app_state.proveedores_repo.crear(&payload).await?;

    Ok((StatusCode::CREATED, Json(proveedor)))
}

// PUT /api/v1/proveedores/{id}
#[utoipa::path(
    put,
    path = "/api/v1/proveedores/{id}",
    tag = "Proveedores",
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    request_body = ProveedorUpdate,
    responses(
        (status = 200, description = "Proveedor actualizado", body = Proveedor),
        (status = 404, description = "Proveedor no encontrado")
    )
)]
pub async fn actualizar_proveedor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProveedorUpdate>,
) -> Result<Json<Proveedor>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let proveedor = app_state
        .proveedores_repo
        .actualizar(id, &payload)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Proveedor {}", id)))?;

    Ok(Json(proveedor))
}

// DELETE /api/v1/proveedores/{id} (protegida)
#[utoipa::path(
    delete,
    path = "/api/v1/proveedores/{id}",
    tag = "Proveedores",
    params(("id" = Uuid, Path, description = "ID del proveedor")),
    responses(
        (status = 204, description = "Proveedor eliminado"),
        (status = 404, description = "Proveedor no encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn eliminar_proveedor(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let borradas = app_state.proveedores_repo.eliminar(id).await?;
    if borradas == 0 {
        return Err(AppError::ResourceNotFound(format!("Proveedor {}", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
