// src/services/pagos_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{pagos_repo::NuevoPago, OrdenesRepository, PagosRepository},
    models::pago::{Pago, PagoCreate},
    services::folio,
};

#[derive(Clone)]
pub struct PagosService {
    repo: PagosRepository,
    ordenes_repo: OrdenesRepository,
    pool: PgPool,
}

impl PagosService {
    pub fn new(repo: PagosRepository, ordenes_repo: OrdenesRepository, pool: PgPool) -> Self {
        Self {
            repo,
            ordenes_repo,
            pool,
        }
    }

    pub async fn listar(&self) -> Result<Vec<Pago>, AppError> {
        self.repo.listar().await
    }

    /// Alta manual de un pago. El pago siempre referencia una orden válida;
    /// un monto por encima del total de la orden no se rechaza, pero se deja
    /// constancia en el log.
    pub async fn crear(&self, payload: &PagoCreate) -> Result<Pago, AppError> {
        if payload.monto < Decimal::ZERO {
            return Err(AppError::InvalidAmount(payload.monto));
        }

        let orden = self
            .ordenes_repo
            .obtener(payload.orden_compra_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!(
                    "Orden de compra {}",
                    payload.orden_compra_id
                ))
            })?;

        if payload.monto > orden.total {
            tracing::warn!(
                folio = %orden.numero_orden,
                monto = %payload.monto,
                total_orden = %orden.total,
                "El pago excede el total de la orden"
            );
        }

        let mut tx = self.pool.begin().await?;

        let consecutivo = self.repo.siguiente_consecutivo(&mut tx).await?;
        let numero_pago = folio::generar_numero_pago(consecutivo);

        let datos = NuevoPago {
            obra_id: payload.obra_id,
            proveedor_id: payload.proveedor_id,
            orden_compra_id: payload.orden_compra_id,
            monto: payload.monto,
            metodo_pago: payload.metodo_pago.as_str(),
            fecha_programada: payload.fecha_programada,
            referencia: payload.referencia.as_deref(),
            folio_factura: payload.folio_factura.as_deref(),
            monto_factura: payload.monto_factura,
            fecha_factura: payload.fecha_factura,
            dias_credito: payload.dias_credito,
            fecha_vencimiento: payload.fecha_vencimiento,
            observaciones: payload.observaciones.as_deref(),
        };

        let pago = self.repo.insertar(&mut tx, &numero_pago, &datos).await?;

        tx.commit().await?;

        Ok(pago)
    }
}
