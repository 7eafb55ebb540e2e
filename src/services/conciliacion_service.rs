// src/services/conciliacion_service.rs
//
// Conciliación bancaria: importar el CSV del banco, emparejar transacciones
// con órdenes de compra por folio y registrar el pago resultante. El par
// marcar-conciliada + crear-pago viaja SIEMPRE en una sola transacción de
// base de datos: o quedan los dos efectos o no queda ninguno.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        pagos_repo::NuevoPago, ConciliacionRepository, OrdenesRepository, PagosRepository,
    },
    models::{
        conciliacion::{FilaCsv, ParejaConciliada, ResumenConciliacion, TransaccionBancaria},
        orden_compra::OrdenCompra,
        pago::{MetodoPago, Pago},
    },
    services::folio,
};

// =============================================================================
//  PARSEO DEL CSV (puro)
// =============================================================================

fn parsear_fecha(texto: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(texto, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(texto, "%d/%m/%Y"))
        .ok()
}

fn parsear_fila(linea: &str) -> Option<FilaCsv> {
    let mut campos = linea.split(',');

    let fecha = parsear_fecha(campos.next()?.trim())?;

    let descripcion_banco = campos.next()?.trim().to_string();
    if descripcion_banco.is_empty() {
        return None;
    }

    let monto = Decimal::from_str(campos.next()?.trim()).ok()?;

    let referencia_bancaria = campos
        .next()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    Some(FilaCsv {
        fecha,
        descripcion_banco,
        monto,
        referencia_bancaria,
    })
}

/// Parsea el contenido del CSV del banco.
///
/// Columnas: fecha, descripcionBanco, monto, referenciaBancaria. Si la
/// primera columna del primer renglón contiene "fecha" se trata como
/// encabezado y se salta. Una fila inválida (fecha o descripción vacías,
/// monto no numérico) se descarta sin tumbar el lote completo.
pub fn parsear_csv(contenido: &str) -> Vec<FilaCsv> {
    let lineas: Vec<&str> = contenido
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();

    let datos: &[&str] = match lineas.first() {
        Some(primera)
            if primera
                .split(',')
                .next()
                .unwrap_or("")
                .to_lowercase()
                .contains("fecha") =>
        {
            &lineas[1..]
        }
        _ => &lineas[..],
    };

    datos.iter().filter_map(|linea| parsear_fila(linea)).collect()
}

// =============================================================================
//  BÚSQUEDA DE MATCHES (pura)
// =============================================================================

/// Elige la orden cuyo folio aparece dentro de la descripción bancaria
/// (sin distinguir mayúsculas).
///
/// Gana el folio MÁS LARGO que aparezca: "228-A01JP-ACE" le gana a "228".
/// Si dos órdenes distintas empatan en la mejor longitud, el caso es ambiguo
/// y no se concilia en automático; queda para el match manual.
pub fn elegir_orden<'a>(
    descripcion_banco: &str,
    ordenes: &'a [OrdenCompra],
) -> Option<&'a OrdenCompra> {
    let descripcion = descripcion_banco.to_lowercase();

    let mut mejor: Option<&OrdenCompra> = None;
    let mut empate = false;

    for orden in ordenes {
        let folio = orden.numero_orden.to_lowercase();
        if folio.is_empty() || !descripcion.contains(&folio) {
            continue;
        }

        match mejor {
            None => {
                mejor = Some(orden);
                empate = false;
            }
            Some(actual) if folio.len() > actual.numero_orden.len() => {
                mejor = Some(orden);
                empate = false;
            }
            Some(actual) if folio.len() == actual.numero_orden.len() && orden.id != actual.id => {
                empate = true;
            }
            _ => {}
        }
    }

    if empate {
        None
    } else {
        mejor
    }
}

/// Parejas (transacción, orden) candidatas a conciliación automática.
pub fn buscar_auto_matches<'a>(
    transacciones: &'a [TransaccionBancaria],
    ordenes: &'a [OrdenCompra],
) -> Vec<(&'a TransaccionBancaria, &'a OrdenCompra)> {
    transacciones
        .iter()
        .filter(|t| !t.matched)
        .filter_map(|t| {
            let descripcion = t
                .descripcion_banco_normalizada
                .as_deref()
                .unwrap_or(&t.descripcion_banco);
            elegir_orden(descripcion, ordenes).map(|orden| (t, orden))
        })
        .collect()
}

// =============================================================================
//  SERVICIO
// =============================================================================

#[derive(Clone)]
pub struct ConciliacionService {
    repo: ConciliacionRepository,
    ordenes_repo: OrdenesRepository,
    pagos_repo: PagosRepository,
    pool: PgPool,
}

impl ConciliacionService {
    pub fn new(
        repo: ConciliacionRepository,
        ordenes_repo: OrdenesRepository,
        pagos_repo: PagosRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            ordenes_repo,
            pagos_repo,
            pool,
        }
    }

    pub async fn listar(
        &self,
        matched: Option<bool>,
    ) -> Result<Vec<TransaccionBancaria>, AppError> {
        self.repo.listar(matched).await
    }

    /// Importa el CSV completo en una transacción. Las filas inválidas ya
    /// fueron descartadas por el parser; si no sobrevivió ninguna, el lote
    /// se rechaza con EmptyBatch en lugar de importar silenciosamente nada.
    pub async fn importar_csv(
        &self,
        contenido: &str,
    ) -> Result<Vec<TransaccionBancaria>, AppError> {
        let filas = parsear_csv(contenido);
        if filas.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let mut tx = self.pool.begin().await?;

        let mut importadas = Vec::with_capacity(filas.len());
        for fila in &filas {
            importadas.push(self.repo.insertar(&mut tx, fila).await?);
        }

        tx.commit().await?;

        tracing::info!("🏦 Importadas {} transacciones bancarias", importadas.len());
        Ok(importadas)
    }

    /// Busca y aplica todas las conciliaciones automáticas.
    ///
    /// Cada pareja se aplica en su propia transacción atómica. Si una falla
    /// a mitad del lote, lo ya confirmado no se revierte: se reporta como
    /// inconsistencia de conciliación para revisión humana.
    pub async fn auto_conciliar(&self) -> Result<ResumenConciliacion, AppError> {
        let transacciones = self.repo.listar(Some(false)).await?;
        let ordenes = self.ordenes_repo.listar(None, None).await?;

        let parejas = buscar_auto_matches(&transacciones, &ordenes);
        let candidatas = parejas.len();

        let mut aplicadas: Vec<ParejaConciliada> = Vec::new();
        for (transaccion, orden) in parejas {
            match self.aplicar_pareja(transaccion.id, orden, 100, false).await {
                Ok(pago) => aplicadas.push(ParejaConciliada {
                    transaccion_id: transaccion.id,
                    orden_compra_id: orden.id,
                    numero_orden: orden.numero_orden.clone(),
                    pago_id: pago.id,
                }),
                Err(err) if aplicadas.is_empty() => return Err(err),
                Err(err) => {
                    tracing::error!(
                        transaccion = %transaccion.id,
                        error = %err,
                        "Falló una pareja a mitad de la conciliación automática"
                    );
                    return Err(AppError::ReconciliationInconsistency {
                        aplicados: aplicadas.len(),
                        fallida: transaccion.id,
                    });
                }
            }
        }

        tracing::info!(
            candidatas,
            aplicadas = aplicadas.len(),
            "✅ Conciliación automática terminada"
        );

        Ok(ResumenConciliacion {
            candidatas,
            aplicadas,
        })
    }

    /// Match manual: el usuario ya eligió la orden en pantalla.
    pub async fn conciliar_manual(
        &self,
        transaccion_id: Uuid,
        orden_compra_id: Uuid,
    ) -> Result<ParejaConciliada, AppError> {
        let orden = self
            .ordenes_repo
            .obtener(orden_compra_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Orden de compra {}", orden_compra_id))
            })?;

        let pago = self.aplicar_pareja(transaccion_id, &orden, 0, true).await?;

        Ok(ParejaConciliada {
            transaccion_id,
            orden_compra_id: orden.id,
            numero_orden: orden.numero_orden.clone(),
            pago_id: pago.id,
        })
    }

    /// Transición explícita Matched -> Unmatched: desmarca la transacción y
    /// cancela el pago que generó el match, en una sola transacción.
    pub async fn desconciliar(
        &self,
        transaccion_id: Uuid,
    ) -> Result<TransaccionBancaria, AppError> {
        let mut tx = self.pool.begin().await?;

        let transaccion = self
            .repo
            .obtener(&mut tx, transaccion_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Transacción bancaria {}", transaccion_id))
            })?;

        if !transaccion.matched {
            return Err(AppError::NotMatched);
        }

        self.repo.desmarcar(&mut tx, transaccion_id).await?;

        if let Some(pago_id) = transaccion.pago_id {
            self.pagos_repo.cancelar(&mut tx, pago_id).await?;
        }

        let actualizada = self
            .repo
            .obtener(&mut tx, transaccion_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Transacción bancaria {}", transaccion_id))
            })?;

        tx.commit().await?;

        Ok(actualizada)
    }

    // Marca la transacción y crea el pago como una unidad atómica. El UPDATE
    // guardado con `matched = FALSE` rechaza el doble match: si no regresa
    // fila, distinguimos entre "no existe" y "ya conciliada".
    async fn aplicar_pareja(
        &self,
        transaccion_id: Uuid,
        orden: &OrdenCompra,
        match_confidence: i32,
        match_manual: bool,
    ) -> Result<Pago, AppError> {
        let mut tx = self.pool.begin().await?;

        let transaccion = match self
            .repo
            .marcar_conciliada(&mut tx, transaccion_id, orden.id, match_confidence, match_manual)
            .await?
        {
            Some(t) => t,
            None => {
                return match self.repo.obtener(&mut tx, transaccion_id).await? {
                    Some(_) => Err(AppError::AlreadyMatched),
                    None => Err(AppError::ResourceNotFound(format!(
                        "Transacción bancaria {}",
                        transaccion_id
                    ))),
                };
            }
        };

        let consecutivo = self.pagos_repo.siguiente_consecutivo(&mut tx).await?;
        let numero_pago = folio::generar_numero_pago(consecutivo);

        let datos = NuevoPago {
            obra_id: orden.obra_id,
            proveedor_id: orden.proveedor_id,
            orden_compra_id: orden.id,
            monto: transaccion.monto,
            metodo_pago: MetodoPago::Transferencia.as_str(),
            fecha_programada: transaccion.fecha,
            referencia: transaccion.referencia_bancaria.as_deref(),
            folio_factura: None,
            monto_factura: None,
            fecha_factura: None,
            dias_credito: None,
            fecha_vencimiento: None,
            observaciones: Some(&transaccion.descripcion_banco),
        };

        let pago = self.pagos_repo.insertar(&mut tx, &numero_pago, &datos).await?;
        self.repo.vincular_pago(&mut tx, transaccion_id, pago.id).await?;

        tx.commit().await?;

        Ok(pago)
    }
}

// =============================================================================
//  TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn orden_con_folio(folio: &str) -> OrdenCompra {
        let ahora = Utc::now();
        OrdenCompra {
            id: Uuid::new_v4(),
            numero_orden: folio.to_string(),
            obra_id: Uuid::new_v4(),
            proveedor_id: Uuid::new_v4(),
            requisicion_id: None,
            comprador_nombre: None,
            fecha_emision: ahora.date_naive(),
            fecha_entrega: ahora.date_naive(),
            estado: "emitida".to_string(),
            tipo_entrega: None,
            has_iva: true,
            modo_descuento: "monto".to_string(),
            descuento: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            descuento_monto: Decimal::ZERO,
            iva: Decimal::ZERO,
            total: Decimal::ZERO,
            observaciones: None,
            creado_por: None,
            created_at: ahora,
            updated_at: ahora,
        }
    }

    fn transaccion_con_descripcion(descripcion: &str) -> TransaccionBancaria {
        let ahora = Utc::now();
        TransaccionBancaria {
            id: Uuid::new_v4(),
            fecha: ahora.date_naive(),
            descripcion_banco: descripcion.to_string(),
            descripcion_banco_normalizada: Some(descripcion.to_lowercase()),
            monto: dec!(100.00),
            referencia_bancaria: None,
            orden_compra_id: None,
            pago_id: None,
            matched: false,
            origen: "csv".to_string(),
            match_confidence: 0,
            match_manual: false,
            created_at: ahora,
            updated_at: ahora,
        }
    }

    // --- CSV ---

    #[test]
    fn csv_descarta_la_fila_sin_descripcion_sin_tumbar_el_lote() {
        let csv = "2026-03-01,PAGO UNO,1500.00,REF1\n\
                   2026-03-02,,900.00,REF2\n\
                   2026-03-03,PAGO TRES,200.50,";
        let filas = parsear_csv(csv);
        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].descripcion_banco, "PAGO UNO");
        assert_eq!(filas[1].descripcion_banco, "PAGO TRES");
        assert_eq!(filas[1].referencia_bancaria, None);
    }

    #[test]
    fn csv_salta_el_encabezado_que_contiene_fecha() {
        let csv = "Fecha,Descripcion,Monto,Referencia\n2026-03-01,PAGO,100.00,R1";
        let filas = parsear_csv(csv);
        assert_eq!(filas.len(), 1);
        assert_eq!(filas[0].monto, dec!(100.00));
    }

    #[test]
    fn csv_sin_encabezado_importa_todas_las_filas() {
        let csv = "01/03/2026,PAGO A,100.00,R1\n02/03/2026,PAGO B,250.00,R2";
        let filas = parsear_csv(csv);
        assert_eq!(filas.len(), 2);
        assert_eq!(filas[0].fecha, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn csv_descarta_montos_no_numericos_y_fechas_invalidas() {
        let csv = "2026-03-01,PAGO,no-es-numero,R1\nfecha-rota,PAGO,100.00,R2";
        assert!(parsear_csv(csv).is_empty());
    }

    // --- Auto-match ---

    #[test]
    fn auto_match_encuentra_el_folio_dentro_de_la_descripcion() {
        let ordenes = vec![orden_con_folio("228-A01JP-PRO"), orden_con_folio("330-B02MR-CEM")];
        let transacciones = vec![
            transaccion_con_descripcion("PAGO OC-228-A01JP-PRO TRANSFERENCIA"),
            transaccion_con_descripcion("DEPOSITO SIN FOLIO ALGUNO"),
        ];

        let parejas = buscar_auto_matches(&transacciones, &ordenes);
        assert_eq!(parejas.len(), 1);
        assert_eq!(parejas[0].0.id, transacciones[0].id);
        assert_eq!(parejas[0].1.numero_orden, "228-A01JP-PRO");
    }

    #[test]
    fn auto_match_no_distingue_mayusculas() {
        let ordenes = vec![orden_con_folio("228-A01JP-PRO")];
        let transacciones = vec![transaccion_con_descripcion("pago oc-228-a01jp-pro spei")];

        let parejas = buscar_auto_matches(&transacciones, &ordenes);
        assert_eq!(parejas.len(), 1);
    }

    #[test]
    fn auto_match_ignora_transacciones_ya_conciliadas() {
        let ordenes = vec![orden_con_folio("228-A01JP-PRO")];
        let mut transaccion = transaccion_con_descripcion("PAGO 228-A01JP-PRO");
        transaccion.matched = true;

        let transacciones = [transaccion];
        let parejas = buscar_auto_matches(&transacciones, &ordenes);
        assert!(parejas.is_empty());
    }

    #[test]
    fn gana_el_folio_mas_largo() {
        // "228" también es substring de la descripción, pero el folio
        // completo es el match correcto.
        let ordenes = vec![orden_con_folio("228"), orden_con_folio("228-A01JP-PRO")];
        let elegida = elegir_orden("PAGO 228-A01JP-PRO", &ordenes).unwrap();
        assert_eq!(elegida.numero_orden, "228-A01JP-PRO");
    }

    #[test]
    fn empate_entre_ordenes_distintas_es_ambiguo() {
        let ordenes = vec![orden_con_folio("OC-AAA"), orden_con_folio("OC-BBB")];
        assert!(elegir_orden("LIQUIDACION OC-AAA Y OC-BBB", &ordenes).is_none());
    }

    #[test]
    fn sin_folio_presente_no_hay_pareja() {
        let ordenes = vec![orden_con_folio("228-A01JP-PRO")];
        assert!(elegir_orden("TRASPASO ENTRE CUENTAS PROPIAS", &ordenes).is_none());
    }
}
