// src/services/ordenes_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ObrasRepository, OrdenesRepository, ProveedoresRepository},
    models::orden_compra::{
        OrdenCompra, OrdenCompraCreate, OrdenCompraDetalle, OrdenCompraUpdate,
    },
    services::{folio, totals},
};

#[derive(Clone)]
pub struct OrdenesService {
    repo: OrdenesRepository,
    obras_repo: ObrasRepository,
    proveedores_repo: ProveedoresRepository,
    pool: PgPool,
}

impl OrdenesService {
    pub fn new(
        repo: OrdenesRepository,
        obras_repo: ObrasRepository,
        proveedores_repo: ProveedoresRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            obras_repo,
            proveedores_repo,
            pool,
        }
    }

    pub async fn listar(
        &self,
        obra_id: Option<Uuid>,
        estado: Option<&str>,
    ) -> Result<Vec<OrdenCompra>, AppError> {
        self.repo.listar(obra_id, estado).await
    }

    pub async fn detalle(&self, id: Uuid) -> Result<OrdenCompraDetalle, AppError> {
        self.repo
            .obtener_detalle(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Orden de compra {}", id)))
    }

    /// Crea la orden: valida obra y proveedor, recalcula totales de línea y
    /// de orden en el servidor, y folia con el consecutivo de la obra dentro
    /// de la transacción que inserta cabecera y partidas.
    pub async fn crear(&self, payload: &OrdenCompraCreate) -> Result<OrdenCompraDetalle, AppError> {
        let obra = self
            .obras_repo
            .obtener(payload.obra_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Obra {}", payload.obra_id)))?;

        let proveedor = self
            .proveedores_repo
            .obtener(payload.proveedor_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Proveedor {}", payload.proveedor_id))
            })?;

        let lineas = Self::totales_de_linea(&payload.items)?;
        let totales = totals::calcular_totales(
            &lineas,
            payload.modo_descuento,
            payload.descuento,
            payload.has_iva,
        )?;

        let mut tx = self.pool.begin().await?;

        let consecutivo = self.repo.contar_por_obra(&mut tx, payload.obra_id).await? + 1;
        let iniciales =
            folio::iniciales_de(payload.comprador_nombre.as_deref().unwrap_or_default());
        let nombre_proveedor = proveedor
            .alias_proveedor
            .as_deref()
            .unwrap_or(&proveedor.razon_social);
        let numero_orden =
            folio::generar_folio_oc(&obra.codigo, consecutivo, &iniciales, nombre_proveedor);

        let header = self
            .repo
            .insertar(&mut tx, &numero_orden, payload, &totales)
            .await?;

        let mut items = Vec::with_capacity(payload.items.len());
        for (item, linea) in payload.items.iter().zip(&lineas) {
            items.push(
                self.repo
                    .insertar_item(
                        &mut tx,
                        header.id,
                        item.cantidad,
                        &item.unidad,
                        &item.descripcion,
                        item.precio_unitario,
                        *linea,
                    )
                    .await?,
            );
        }

        tx.commit().await?;

        tracing::info!(folio = %header.numero_orden, "📦 Orden de compra creada");

        Ok(OrdenCompraDetalle { header, items })
    }

    /// Edición completa: cualquier cambio de partidas, descuento o IVA
    /// vuelve a pasar por la calculadora; el folio no cambia.
    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &OrdenCompraUpdate,
    ) -> Result<OrdenCompraDetalle, AppError> {
        let lineas = Self::totales_de_linea(&payload.items)?;
        let totales = totals::calcular_totales(
            &lineas,
            payload.modo_descuento,
            payload.descuento,
            payload.has_iva,
        )?;

        let mut tx = self.pool.begin().await?;

        let header = self
            .repo
            .actualizar(&mut tx, id, payload, &totales)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Orden de compra {}", id)))?;

        self.repo.borrar_items(&mut tx, id).await?;

        let mut items = Vec::with_capacity(payload.items.len());
        for (item, linea) in payload.items.iter().zip(&lineas) {
            items.push(
                self.repo
                    .insertar_item(
                        &mut tx,
                        id,
                        item.cantidad,
                        &item.unidad,
                        &item.descripcion,
                        item.precio_unitario,
                        *linea,
                    )
                    .await?,
            );
        }

        tx.commit().await?;

        Ok(OrdenCompraDetalle { header, items })
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<(), AppError> {
        let borradas = self.repo.eliminar(id).await?;
        if borradas == 0 {
            return Err(AppError::ResourceNotFound(format!("Orden de compra {}", id)));
        }
        Ok(())
    }

    fn totales_de_linea(
        items: &[crate::models::orden_compra::OrdenCompraItemCreate],
    ) -> Result<Vec<Decimal>, AppError> {
        items
            .iter()
            .map(|item| totals::linea_total(item.cantidad, item.precio_unitario))
            .collect()
    }
}
