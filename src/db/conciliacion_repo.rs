// src/db/conciliacion_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::conciliacion::{FilaCsv, TransaccionBancaria},
};

#[derive(Clone)]
pub struct ConciliacionRepository {
    pool: PgPool,
}

impl ConciliacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(
        &self,
        matched: Option<bool>,
    ) -> Result<Vec<TransaccionBancaria>, AppError> {
        let transacciones = sqlx::query_as::<_, TransaccionBancaria>(
            r#"
            SELECT * FROM transacciones_bancarias
            WHERE ($1::boolean IS NULL OR matched = $1)
            ORDER BY fecha DESC, created_at DESC
            "#,
        )
        .bind(matched)
        .fetch_all(&self.pool)
        .await?;

        Ok(transacciones)
    }

    pub async fn obtener(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<TransaccionBancaria>, AppError> {
        let transaccion = sqlx::query_as::<_, TransaccionBancaria>(
            "SELECT * FROM transacciones_bancarias WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(transaccion)
    }

    pub async fn insertar(
        &self,
        conn: &mut PgConnection,
        fila: &FilaCsv,
    ) -> Result<TransaccionBancaria, AppError> {
        let transaccion = sqlx::query_as::<_, TransaccionBancaria>(
            r#"
            INSERT INTO transacciones_bancarias (
                fecha, descripcion_banco, descripcion_banco_normalizada,
                monto, referencia_bancaria, origen
            )
            VALUES ($1, $2, $3, $4, $5, 'csv')
            RETURNING *
            "#,
        )
        .bind(fila.fecha)
        .bind(&fila.descripcion_banco)
        .bind(fila.descripcion_banco.to_lowercase())
        .bind(fila.monto)
        .bind(&fila.referencia_bancaria)
        .fetch_one(conn)
        .await?;

        Ok(transaccion)
    }

    // El guard `matched = FALSE` hace idempotente la conciliación: volver a
    // conciliar una transacción ya conciliada devuelve None y el servicio lo
    // convierte en AlreadyMatched, nunca en un pago duplicado.
    pub async fn marcar_conciliada(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        orden_compra_id: Uuid,
        match_confidence: i32,
        match_manual: bool,
    ) -> Result<Option<TransaccionBancaria>, AppError> {
        let transaccion = sqlx::query_as::<_, TransaccionBancaria>(
            r#"
            UPDATE transacciones_bancarias SET
                matched = TRUE,
                orden_compra_id = $2,
                match_confidence = $3,
                match_manual = $4,
                updated_at = now()
            WHERE id = $1 AND matched = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(orden_compra_id)
        .bind(match_confidence)
        .bind(match_manual)
        .fetch_optional(conn)
        .await?;

        Ok(transaccion)
    }

    pub async fn vincular_pago(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        pago_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE transacciones_bancarias SET pago_id = $2 WHERE id = $1")
            .bind(id)
            .bind(pago_id)
            .execute(conn)
            .await?;

        Ok(())
    }

    // Transición explícita Matched -> Unmatched.
    pub async fn desmarcar(&self, conn: &mut PgConnection, id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE transacciones_bancarias SET
                matched = FALSE,
                orden_compra_id = NULL,
                pago_id = NULL,
                match_confidence = 0,
                match_manual = FALSE,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(conn)
        .await?;

        Ok(())
    }
}
