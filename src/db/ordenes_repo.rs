// src/db/ordenes_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orden_compra::{
        OrdenCompra, OrdenCompraCreate, OrdenCompraDetalle, OrdenCompraItem, OrdenCompraUpdate,
    },
    services::totals::TotalesOrden,
};

#[derive(Clone)]
pub struct OrdenesRepository {
    pool: PgPool,
}

impl OrdenesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    pub async fn listar(
        &self,
        obra_id: Option<Uuid>,
        estado: Option<&str>,
    ) -> Result<Vec<OrdenCompra>, AppError> {
        let ordenes = sqlx::query_as::<_, OrdenCompra>(
            r#"
            SELECT * FROM ordenes_compra
            WHERE ($1::uuid IS NULL OR obra_id = $1)
              AND ($2::text IS NULL OR estado = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(obra_id)
        .bind(estado)
        .fetch_all(&self.pool)
        .await?;

        Ok(ordenes)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<OrdenCompra>, AppError> {
        let orden = sqlx::query_as::<_, OrdenCompra>("SELECT * FROM ordenes_compra WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(orden)
    }

    pub async fn obtener_detalle(&self, id: Uuid) -> Result<Option<OrdenCompraDetalle>, AppError> {
        let Some(header) = self.obtener(id).await? else {
            return Ok(None);
        };

        let items = self.listar_items(id).await?;

        Ok(Some(OrdenCompraDetalle { header, items }))
    }

    pub async fn listar_items(&self, orden_id: Uuid) -> Result<Vec<OrdenCompraItem>, AppError> {
        let items = sqlx::query_as::<_, OrdenCompraItem>(
            "SELECT * FROM orden_compra_items WHERE orden_compra_id = $1 ORDER BY created_at ASC",
        )
        .bind(orden_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    pub async fn contar_por_obra(
        &self,
        conn: &mut PgConnection,
        obra_id: Uuid,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ordenes_compra WHERE obra_id = $1",
        )
        .bind(obra_id)
        .fetch_one(conn)
        .await?;

        Ok(total)
    }

    // =========================================================================
    //  ESCRITURA (participa en la transacción del servicio)
    // =========================================================================

    pub async fn insertar(
        &self,
        conn: &mut PgConnection,
        numero_orden: &str,
        payload: &OrdenCompraCreate,
        totales: &TotalesOrden,
    ) -> Result<OrdenCompra, AppError> {
        let orden = sqlx::query_as::<_, OrdenCompra>(
            r#"
            INSERT INTO ordenes_compra (
                numero_orden, obra_id, proveedor_id, requisicion_id,
                comprador_nombre, fecha_entrega, tipo_entrega, has_iva,
                modo_descuento, descuento, subtotal, descuento_monto, iva,
                total, observaciones, creado_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(numero_orden)
        .bind(payload.obra_id)
        .bind(payload.proveedor_id)
        .bind(payload.requisicion_id)
        .bind(&payload.comprador_nombre)
        .bind(payload.fecha_entrega)
        .bind(&payload.tipo_entrega)
        .bind(payload.has_iva)
        .bind(payload.modo_descuento.as_str())
        .bind(payload.descuento)
        .bind(totales.subtotal)
        .bind(totales.descuento_monto)
        .bind(totales.iva)
        .bind(totales.total)
        .bind(&payload.observaciones)
        .bind(&payload.creado_por)
        .fetch_one(conn)
        .await?;

        Ok(orden)
    }

    pub async fn insertar_item(
        &self,
        conn: &mut PgConnection,
        orden_id: Uuid,
        cantidad: rust_decimal::Decimal,
        unidad: &str,
        descripcion: &str,
        precio_unitario: rust_decimal::Decimal,
        total: rust_decimal::Decimal,
    ) -> Result<OrdenCompraItem, AppError> {
        let item = sqlx::query_as::<_, OrdenCompraItem>(
            r#"
            INSERT INTO orden_compra_items (
                orden_compra_id, cantidad, unidad, descripcion, precio_unitario, total
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(orden_id)
        .bind(cantidad)
        .bind(unidad)
        .bind(descripcion)
        .bind(precio_unitario)
        .bind(total)
        .fetch_one(conn)
        .await?;

        Ok(item)
    }

    pub async fn borrar_items(
        &self,
        conn: &mut PgConnection,
        orden_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM orden_compra_items WHERE orden_compra_id = $1")
            .bind(orden_id)
            .execute(conn)
            .await?;

        Ok(())
    }

    // Reescribe cabecera y totales completos; las partidas las repone el
    // servicio en la misma transacción (borrar_items + insertar_item).
    pub async fn actualizar(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        payload: &OrdenCompraUpdate,
        totales: &TotalesOrden,
    ) -> Result<Option<OrdenCompra>, AppError> {
        let estado = payload.estado.map(|e| e.as_str());

        let orden = sqlx::query_as::<_, OrdenCompra>(
            r#"
            UPDATE ordenes_compra SET
                comprador_nombre = COALESCE($2, comprador_nombre),
                fecha_entrega = $3,
                tipo_entrega = COALESCE($4, tipo_entrega),
                estado = COALESCE($5, estado),
                has_iva = $6,
                modo_descuento = $7,
                descuento = $8,
                subtotal = $9,
                descuento_monto = $10,
                iva = $11,
                total = $12,
                observaciones = COALESCE($13, observaciones),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.comprador_nombre)
        .bind(payload.fecha_entrega)
        .bind(&payload.tipo_entrega)
        .bind(estado)
        .bind(payload.has_iva)
        .bind(payload.modo_descuento.as_str())
        .bind(payload.descuento)
        .bind(totales.subtotal)
        .bind(totales.descuento_monto)
        .bind(totales.iva)
        .bind(totales.total)
        .bind(&payload.observaciones)
        .fetch_optional(conn)
        .await?;

        Ok(orden)
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM ordenes_compra WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
