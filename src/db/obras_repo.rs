// src/db/obras_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::obra::{Obra, ObraCreate, ObraUpdate},
};

#[derive(Clone)]
pub struct ObrasRepository {
    pool: PgPool,
}

impl ObrasRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Obra>, AppError> {
        let obras = sqlx::query_as::<_, Obra>("SELECT * FROM obras ORDER BY codigo ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(obras)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Obra>, AppError> {
        let obra = sqlx::query_as::<_, Obra>("SELECT * FROM obras WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(obra)
    }

    pub async fn crear(&self, payload: &ObraCreate) -> Result<Obra, AppError> {
        let obra = sqlx::query_as::<_, Obra>(
            r#"
            INSERT INTO obras (
                codigo, nombre, numero_contrato, cliente, residente,
                residente_iniciales, direccion, monto_contratado,
                anticipo_porcentaje, retencion_porcentaje, saldo_actual,
                total_estimaciones, total_gastos, avance_fisico_porcentaje,
                fecha_inicio, fecha_fin_programada, plazo_ejecucion, estado
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(&payload.codigo)
        .bind(&payload.nombre)
        .bind(&payload.numero_contrato)
        .bind(&payload.cliente)
        .bind(&payload.residente)
        .bind(&payload.residente_iniciales)
        .bind(&payload.direccion)
        .bind(payload.monto_contratado)
        .bind(payload.anticipo_porcentaje)
        .bind(payload.retencion_porcentaje)
        .bind(payload.saldo_actual)
        .bind(payload.total_estimaciones)
        .bind(payload.total_gastos)
        .bind(payload.avance_fisico_porcentaje)
        .bind(payload.fecha_inicio)
        .bind(payload.fecha_fin_programada)
        .bind(payload.plazo_ejecucion)
        .bind(&payload.estado)
        .fetch_one(&self.pool)
        .await?;

        Ok(obra)
    }

    // Actualización parcial: COALESCE conserva el valor actual cuando el
    // campo no viene en el payload.
    pub async fn actualizar(&self, id: Uuid, payload: &ObraUpdate) -> Result<Option<Obra>, AppError> {
        let obra = sqlx::query_as::<_, Obra>(
            r#"
            UPDATE obras SET
                nombre = COALESCE($2, nombre),
                numero_contrato = COALESCE($3, numero_contrato),
                cliente = COALESCE($4, cliente),
                residente = COALESCE($5, residente),
                residente_iniciales = COALESCE($6, residente_iniciales),
                direccion = COALESCE($7, direccion),
                monto_contratado = COALESCE($8, monto_contratado),
                anticipo_porcentaje = COALESCE($9, anticipo_porcentaje),
                retencion_porcentaje = COALESCE($10, retencion_porcentaje),
                saldo_actual = COALESCE($11, saldo_actual),
                total_estimaciones = COALESCE($12, total_estimaciones),
                total_gastos = COALESCE($13, total_gastos),
                avance_fisico_porcentaje = COALESCE($14, avance_fisico_porcentaje),
                fecha_inicio = COALESCE($15, fecha_inicio),
                fecha_fin_programada = COALESCE($16, fecha_fin_programada),
                plazo_ejecucion = COALESCE($17, plazo_ejecucion),
                estado = COALESCE($18, estado),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.nombre)
        .bind(&payload.numero_contrato)
        .bind(&payload.cliente)
        .bind(&payload.residente)
        .bind(&payload.residente_iniciales)
        .bind(&payload.direccion)
        .bind(payload.monto_contratado)
        .bind(payload.anticipo_porcentaje)
        .bind(payload.retencion_porcentaje)
        .bind(payload.saldo_actual)
        .bind(payload.total_estimaciones)
        .bind(payload.total_gastos)
        .bind(payload.avance_fisico_porcentaje)
        .bind(payload.fecha_inicio)
        .bind(payload.fecha_fin_programada)
        .bind(payload.plazo_ejecucion)
        .bind(&payload.estado)
        .fetch_optional(&self.pool)
        .await?;

        Ok(obra)
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM obras WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // Montos agregados para las métricas de la obra: lo comprometido en
    // órdenes de compra y lo ya pagado, excluyendo cancelados.
    pub async fn comprometido_y_pagado(&self, obra_id: Uuid) -> Result<(Decimal, Decimal), AppError> {
        let comprometido = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(total), 0)
            FROM ordenes_compra
            WHERE obra_id = $1 AND estado <> 'cancelada'
            "#,
        )
        .bind(obra_id)
        .fetch_one(&self.pool)
        .await?;

        let pagado = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(monto), 0)
            FROM pagos
            WHERE obra_id = $1 AND estado <> 'cancelado'
            "#,
        )
        .bind(obra_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((comprometido, pagado))
    }
}
