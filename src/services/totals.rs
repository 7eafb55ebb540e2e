// src/services/totals.rs
//
// La calculadora de totales de la orden de compra. Este módulo es el ÚNICO
// sitio donde se calcula subtotal / descuento / IVA / total: los handlers de
// crear y editar órdenes pasan por aquí y ningún otro código repite la
// aritmética. Todo es puro: sin I/O, sin estado, mismo resultado para las
// mismas entradas.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{common::error::AppError, models::orden_compra::DescuentoModo};

// Los cuatro campos derivados de una orden. Nunca se actualiza uno solo:
// cualquier cambio en partidas, descuento o IVA recalcula el valor completo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalesOrden {
    pub subtotal: Decimal,
    pub descuento_monto: Decimal,
    pub iva: Decimal,
    pub total: Decimal,
}

// Tasa fija del 16%. El sistema no la configura por orden.
fn tasa_iva() -> Decimal {
    Decimal::new(16, 2)
}

// Redondeo monetario a 2 decimales, mitad hacia arriba.
pub fn redondear2(valor: Decimal) -> Decimal {
    valor.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Total de una partida: round2(cantidad * precio_unitario).
///
/// Los negativos se rechazan aquí aunque el formulario ya los filtre.
pub fn linea_total(cantidad: Decimal, precio_unitario: Decimal) -> Result<Decimal, AppError> {
    if cantidad < Decimal::ZERO {
        return Err(AppError::InvalidQuantity(cantidad));
    }
    if precio_unitario < Decimal::ZERO {
        return Err(AppError::InvalidPrice(precio_unitario));
    }
    Ok(redondear2(cantidad * precio_unitario))
}

/// Calcula los cuatro totales de una orden a partir de los totales de línea
/// ya redondeados.
///
/// En modo `Monto` el descuento se recorta al subtotal: un descuento mayor
/// que la orden no produce totales negativos.
pub fn calcular_totales(
    lineas: &[Decimal],
    modo_descuento: DescuentoModo,
    descuento_valor: Decimal,
    has_iva: bool,
) -> Result<TotalesOrden, AppError> {
    if descuento_valor < Decimal::ZERO {
        return Err(AppError::InvalidDiscount(descuento_valor));
    }

    let subtotal = redondear2(lineas.iter().copied().sum());

    let descuento_monto = match modo_descuento {
        DescuentoModo::Porcentaje => {
            redondear2(subtotal * descuento_valor / Decimal::from(100))
        }
        DescuentoModo::Monto => redondear2(descuento_valor.min(subtotal)),
    };

    let base = subtotal - descuento_monto;
    let iva = if has_iva {
        redondear2(base * tasa_iva())
    } else {
        Decimal::ZERO
    };

    let total = redondear2(base + iva);

    Ok(TotalesOrden {
        subtotal,
        descuento_monto,
        iva,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn linea_total_redondea_a_dos_decimales() {
        // 3 * 1.115 = 3.345 -> mitad hacia arriba -> 3.35
        assert_eq!(linea_total(dec!(3), dec!(1.115)).unwrap(), dec!(3.35));
        assert_eq!(linea_total(dec!(10), dec!(200)).unwrap(), dec!(2000.00));
        assert_eq!(linea_total(dec!(0), dec!(99.99)).unwrap(), dec!(0.00));
    }

    #[test]
    fn linea_total_es_determinista() {
        let a = linea_total(dec!(7.25), dec!(133.33)).unwrap();
        let b = linea_total(dec!(7.25), dec!(133.33)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn linea_total_rechaza_negativos() {
        assert!(matches!(
            linea_total(dec!(-1), dec!(10)),
            Err(AppError::InvalidQuantity(_))
        ));
        assert!(matches!(
            linea_total(dec!(1), dec!(-10)),
            Err(AppError::InvalidPrice(_))
        ));
    }

    #[test]
    fn escenario_de_ejemplo_con_iva() {
        // [{10 x 200.00}, {2 x 1100.00}], 10% de descuento, con IVA
        let lineas = vec![
            linea_total(dec!(10), dec!(200.00)).unwrap(),
            linea_total(dec!(2), dec!(1100.00)).unwrap(),
        ];
        let t = calcular_totales(&lineas, DescuentoModo::Porcentaje, dec!(10), true).unwrap();
        assert_eq!(t.subtotal, dec!(4200.00));
        assert_eq!(t.descuento_monto, dec!(420.00));
        assert_eq!(t.iva, dec!(604.80));
        assert_eq!(t.total, dec!(4384.80));
    }

    #[test]
    fn subtotal_es_la_suma_de_las_lineas() {
        let lineas = vec![dec!(100.10), dec!(0.05), dec!(899.85)];
        let t = calcular_totales(&lineas, DescuentoModo::Monto, dec!(0), false).unwrap();
        assert_eq!(t.subtotal, dec!(1000.00));
    }

    #[test]
    fn sin_iva_el_iva_es_cero() {
        let lineas = vec![dec!(500.00)];
        let t = calcular_totales(&lineas, DescuentoModo::Monto, dec!(50), false).unwrap();
        assert_eq!(t.iva, dec!(0));
        assert_eq!(t.total, t.subtotal - t.descuento_monto);
    }

    #[test]
    fn descuento_cero_no_descuenta_en_ningun_modo() {
        let lineas = vec![dec!(750.00)];
        for modo in [DescuentoModo::Porcentaje, DescuentoModo::Monto] {
            let t = calcular_totales(&lineas, modo, dec!(0), true).unwrap();
            assert_eq!(t.descuento_monto, dec!(0.00));
        }
    }

    #[test]
    fn descuento_por_monto_se_recorta_al_subtotal() {
        let lineas = vec![dec!(300.00)];
        let t = calcular_totales(&lineas, DescuentoModo::Monto, dec!(500), false).unwrap();
        assert_eq!(t.descuento_monto, dec!(300.00));
        assert_eq!(t.total, dec!(0.00));
    }

    #[test]
    fn descuento_negativo_se_rechaza() {
        let lineas = vec![dec!(100.00)];
        assert!(matches!(
            calcular_totales(&lineas, DescuentoModo::Monto, dec!(-1), false),
            Err(AppError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn recalcular_con_las_mismas_entradas_da_lo_mismo() {
        let lineas = vec![dec!(123.45), dec!(67.89)];
        let a = calcular_totales(&lineas, DescuentoModo::Porcentaje, dec!(7.5), true).unwrap();
        let b = calcular_totales(&lineas, DescuentoModo::Porcentaje, dec!(7.5), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn orden_vacia_da_totales_en_cero() {
        let t = calcular_totales(&[], DescuentoModo::Porcentaje, dec!(10), true).unwrap();
        assert_eq!(t.subtotal, dec!(0));
        assert_eq!(t.total, dec!(0));
    }
}
