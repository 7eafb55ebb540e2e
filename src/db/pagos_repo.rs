// src/db/pagos_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{common::error::AppError, models::pago::Pago};

// Los datos mínimos para registrar un pago; los comparten el alta manual y
// la conciliación bancaria.
#[derive(Debug, Clone)]
pub struct NuevoPago<'a> {
    pub obra_id: Uuid,
    pub proveedor_id: Uuid,
    pub orden_compra_id: Uuid,
    pub monto: Decimal,
    pub metodo_pago: &'a str,
    pub fecha_programada: NaiveDate,
    pub referencia: Option<&'a str>,
    pub folio_factura: Option<&'a str>,
    pub monto_factura: Option<Decimal>,
    pub fecha_factura: Option<NaiveDate>,
    pub dias_credito: Option<i32>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub observaciones: Option<&'a str>,
}

#[derive(Clone)]
pub struct PagosRepository {
    pool: PgPool,
}

impl PagosRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Pago>, AppError> {
        let pagos = sqlx::query_as::<_, Pago>(
            "SELECT * FROM pagos ORDER BY fecha_programada DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pagos)
    }

    pub async fn siguiente_consecutivo(&self, conn: &mut PgConnection) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pagos")
            .fetch_one(conn)
            .await?;

        Ok(total + 1)
    }

    pub async fn insertar(
        &self,
        conn: &mut PgConnection,
        numero_pago: &str,
        datos: &NuevoPago<'_>,
    ) -> Result<Pago, AppError> {
        let pago = sqlx::query_as::<_, Pago>(
            r#"
            INSERT INTO pagos (
                numero_pago, obra_id, proveedor_id, orden_compra_id, monto,
                metodo_pago, fecha_programada, referencia, folio_factura,
                monto_factura, fecha_factura, dias_credito, fecha_vencimiento,
                observaciones
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(numero_pago)
        .bind(datos.obra_id)
        .bind(datos.proveedor_id)
        .bind(datos.orden_compra_id)
        .bind(datos.monto)
        .bind(datos.metodo_pago)
        .bind(datos.fecha_programada)
        .bind(datos.referencia)
        .bind(datos.folio_factura)
        .bind(datos.monto_factura)
        .bind(datos.fecha_factura)
        .bind(datos.dias_credito)
        .bind(datos.fecha_vencimiento)
        .bind(datos.observaciones)
        .fetch_one(conn)
        .await?;

        Ok(pago)
    }

    // Usado al desconciliar: el pago generado por el match se cancela, no se
    // borra, para conservar el rastro.
    pub async fn cancelar(&self, conn: &mut PgConnection, pago_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE pagos SET estado = 'cancelado', updated_at = now() WHERE id = $1")
            .bind(pago_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
