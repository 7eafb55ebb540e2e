// src/db/requisiciones_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::requisicion::{
        Requisicion, RequisicionCreate, RequisicionDetalle, RequisicionItem, RequisicionUpdate,
    },
    services::folio,
};

#[derive(Clone)]
pub struct RequisicionesRepository {
    pool: PgPool,
}

impl RequisicionesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Requisicion>, AppError> {
        let requisiciones = sqlx::query_as::<_, Requisicion>(
            "SELECT * FROM requisiciones ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requisiciones)
    }

    pub async fn obtener_detalle(&self, id: Uuid) -> Result<Option<RequisicionDetalle>, AppError> {
        let header = sqlx::query_as::<_, Requisicion>("SELECT * FROM requisiciones WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, RequisicionItem>(
            "SELECT * FROM requisicion_items WHERE requisicion_id = $1 ORDER BY created_at ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(RequisicionDetalle { header, items }))
    }

    // Cabecera + partidas en una sola transacción; el folio se deriva del
    // consecutivo por obra dentro de esa misma transacción.
    pub async fn crear(&self, payload: &RequisicionCreate) -> Result<RequisicionDetalle, AppError> {
        let mut tx = self.pool.begin().await?;

        let obra = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT codigo, residente_iniciales FROM obras WHERE id = $1",
        )
        .bind(payload.obra_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Obra {}", payload.obra_id)))?;

        let consecutivo = self.contar_por_obra(&mut tx, payload.obra_id).await? + 1;
        let numero = folio::generar_numero_requisicion(
            &obra.0,
            consecutivo,
            obra.1.as_deref().unwrap_or(""),
        );

        let header = sqlx::query_as::<_, Requisicion>(
            r#"
            INSERT INTO requisiciones (
                numero_requisicion, obra_id, solicitado_por, urgencia, observaciones
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&numero)
        .bind(payload.obra_id)
        .bind(&payload.solicitado_por)
        .bind(&payload.urgencia)
        .bind(&payload.observaciones)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(payload.items.len());
        for item in &payload.items {
            let fila = sqlx::query_as::<_, RequisicionItem>(
                r#"
                INSERT INTO requisicion_items (requisicion_id, cantidad, unidad, descripcion)
                VALUES ($1, $2, $3, $4)
                RETURNING *
                "#,
            )
            .bind(header.id)
            .bind(item.cantidad)
            .bind(&item.unidad)
            .bind(&item.descripcion)
            .fetch_one(&mut *tx)
            .await?;
            items.push(fila);
        }

        tx.commit().await?;

        Ok(RequisicionDetalle { header, items })
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &RequisicionUpdate,
    ) -> Result<Option<Requisicion>, AppError> {
        let requisicion = sqlx::query_as::<_, Requisicion>(
            r#"
            UPDATE requisiciones SET
                urgencia = COALESCE($2, urgencia),
                estado = COALESCE($3, estado),
                observaciones = COALESCE($4, observaciones),
                aprobado_por = COALESCE($5, aprobado_por),
                fecha_aprobacion = COALESCE($6, fecha_aprobacion),
                motivo_rechazo = COALESCE($7, motivo_rechazo),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.urgencia)
        .bind(&payload.estado)
        .bind(&payload.observaciones)
        .bind(&payload.aprobado_por)
        .bind(payload.fecha_aprobacion)
        .bind(&payload.motivo_rechazo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(requisicion)
    }

    async fn contar_por_obra(&self, conn: &mut PgConnection, obra_id: Uuid) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM requisiciones WHERE obra_id = $1",
        )
        .bind(obra_id)
        .fetch_one(conn)
        .await?;

        Ok(total)
    }
}
