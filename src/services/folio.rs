// src/services/folio.rs
//
// Foliado de documentos. Los folios se regeneran de forma determinista a
// partir del código de la obra, el consecutivo por obra, las iniciales del
// comprador/residente y el prefijo del proveedor; el consecutivo lo aporta
// el repositorio (conteo por obra) dentro de la misma transacción que
// inserta el documento.

/// Folio de orden de compra:
/// `{codigo_obra}-{letra}{nn}{iniciales}-{prefijo_proveedor}`.
///
/// La letra avanza cada 100 órdenes de la obra (1..=99 -> A, 100..=199 -> B).
pub fn generar_folio_oc(
    codigo_obra: &str,
    consecutivo: i64,
    comprador_iniciales: &str,
    proveedor_nombre: &str,
) -> String {
    let letra = (b'A' + (consecutivo / 100) as u8) as char;
    let numero = consecutivo % 100;
    let prefijo: String = proveedor_nombre
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    format!(
        "{}-{}{:02}{}-{}",
        codigo_obra,
        letra,
        numero,
        comprador_iniciales.to_uppercase(),
        prefijo
    )
}

/// Folio de requisición: `REQ{codigo_obra}-{consecutivo}{iniciales}`.
pub fn generar_numero_requisicion(
    codigo_obra: &str,
    consecutivo: i64,
    residente_iniciales: &str,
) -> String {
    format!(
        "REQ{}-{}{}",
        codigo_obra,
        consecutivo,
        residente_iniciales.to_uppercase()
    )
}

/// Número de pago: `PG-{consecutivo:05}`.
pub fn generar_numero_pago(consecutivo: i64) -> String {
    format!("PG-{:05}", consecutivo)
}

/// Iniciales a partir de un nombre: "Juan Pérez" -> "JP".
pub fn iniciales_de(nombre: &str) -> String {
    nombre
        .split_whitespace()
        .filter_map(|palabra| palabra.chars().next())
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folio_oc_basico() {
        assert_eq!(generar_folio_oc("228", 1, "JP", "Aceros del Norte"), "228-A01JP-ACE");
        assert_eq!(generar_folio_oc("228", 4, "jp", "ACE"), "228-A04JP-ACE");
    }

    #[test]
    fn folio_oc_cambia_de_letra_cada_cien() {
        assert_eq!(generar_folio_oc("101", 99, "MR", "Cemex"), "101-A99MR-CEM");
        assert_eq!(generar_folio_oc("101", 100, "MR", "Cemex"), "101-B00MR-CEM");
        assert_eq!(generar_folio_oc("101", 205, "MR", "Cemex"), "101-C05MR-CEM");
    }

    #[test]
    fn folio_oc_ignora_caracteres_no_alfanumericos_del_proveedor() {
        assert_eq!(generar_folio_oc("55", 2, "AB", "J&R Maquinaria"), "55-A02AB-JRM");
    }

    #[test]
    fn numero_requisicion() {
        assert_eq!(generar_numero_requisicion("228", 4, "jp"), "REQ228-4JP");
    }

    #[test]
    fn numero_pago_con_ceros() {
        assert_eq!(generar_numero_pago(42), "PG-00042");
    }

    #[test]
    fn iniciales() {
        assert_eq!(iniciales_de("Juan Pérez"), "JP");
        assert_eq!(iniciales_de("ana"), "A");
        assert_eq!(iniciales_de(""), "");
    }
}
