// src/db/proveedores_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::proveedor::{Proveedor, ProveedorCreate, ProveedorUpdate},
};

#[derive(Clone)]
pub struct ProveedoresRepository {
    pool: PgPool,
}

impl ProveedoresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self) -> Result<Vec<Proveedor>, AppError> {
        let proveedores =
            sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedores ORDER BY razon_social ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(proveedores)
    }

    pub async fn obtener(&self, id: Uuid) -> Result<Option<Proveedor>, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>("SELECT * FROM proveedores WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(proveedor)
    }

    pub async fn crear(&self, payload: &ProveedorCreate) -> Result<Proveedor, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            INSERT INTO proveedores (
                razon_social, alias_proveedor, nombre_comercial, rfc, direccion,
                ciudad, codigo_postal, telefono, email, contacto_principal,
                banco, numero_cuenta, clabe, tipo_proveedor, credito_dias,
                limite_credito, activo
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&payload.razon_social)
        .bind(&payload.alias_proveedor)
        .bind(&payload.nombre_comercial)
        .bind(&payload.rfc)
        .bind(&payload.direccion)
        .bind(&payload.ciudad)
        .bind(&payload.codigo_postal)
        .bind(&payload.telefono)
        .bind(&payload.email)
        .bind(&payload.contacto_principal)
        .bind(&payload.banco)
        .bind(&payload.numero_cuenta)
        .bind(&payload.clabe)
        .bind(&payload.tipo_proveedor)
        .bind(payload.credito_dias)
        .bind(payload.limite_credito)
        .bind(payload.activo)
        .fetch_one(&self.pool)
        .await?;

        Ok(proveedor)
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        payload: &ProveedorUpdate,
    ) -> Result<Option<Proveedor>, AppError> {
        let proveedor = sqlx::query_as::<_, Proveedor>(
            r#"
            UPDATE proveedores SET
                razon_social = COALESCE($2, razon_social),
                alias_proveedor = COALESCE($3, alias_proveedor),
                nombre_comercial = COALESCE($4, nombre_comercial),
                rfc = COALESCE($5, rfc),
                direccion = COALESCE($6, direccion),
                ciudad = COALESCE($7, ciudad),
                codigo_postal = COALESCE($8, codigo_postal),
                telefono = COALESCE($9, telefono),
                email = COALESCE($10, email),
                contacto_principal = COALESCE($11, contacto_principal),
                banco = COALESCE($12, banco),
                numero_cuenta = COALESCE($13, numero_cuenta),
                clabe = COALESCE($14, clabe),
                tipo_proveedor = COALESCE($15, tipo_proveedor),
                credito_dias = COALESCE($16, credito_dias),
                limite_credito = COALESCE($17, limite_credito),
                activo = COALESCE($18, activo),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.razon_social)
        .bind(&payload.alias_proveedor)
        .bind(&payload.nombre_comercial)
        .bind(&payload.rfc)
        .bind(&payload.direccion)
        .bind(&payload.ciudad)
        .bind(&payload.codigo_postal)
        .bind(&payload.telefono)
        .bind(&payload.email)
        .bind(&payload.contacto_principal)
        .bind(&payload.banco)
        .bind(&payload.numero_cuenta)
        .bind(&payload.clabe)
        .bind(&payload.tipo_proveedor)
        .bind(payload.credito_dias)
        .bind(payload.limite_credito)
        .bind(payload.activo)
        .fetch_optional(&self.pool)
        .await?;

        Ok(proveedor)
    }

    pub async fn eliminar(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM proveedores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
