// src/services/document_service.rs

use genpdf::{elements, style, Alignment, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ObrasRepository, OrdenesRepository, ProveedoresRepository},
};

#[derive(Clone)]
pub struct DocumentService {
    ordenes_repo: OrdenesRepository,
    obras_repo: ObrasRepository,
    proveedores_repo: ProveedoresRepository,
}

impl DocumentService {
    pub fn new(
        ordenes_repo: OrdenesRepository,
        obras_repo: ObrasRepository,
        proveedores_repo: ProveedoresRepository,
    ) -> Self {
        Self {
            ordenes_repo,
            obras_repo,
            proveedores_repo,
        }
    }

    /// Genera el PDF de una orden de compra, con sus partidas, el bloque de
    /// totales y un código QR del folio para verificarlo en recepción.
    pub async fn generar_orden_pdf(&self, orden_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Junta los datos
        let detalle = self
            .ordenes_repo
            .obtener_detalle(orden_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Orden de compra {}", orden_id)))?;

        let obra = self
            .obras_repo
            .obtener(detalle.header.obra_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Obra {}", detalle.header.obra_id))
            })?;

        let proveedor = self
            .proveedores_repo
            .obtener(detalle.header.proveedor_id)
            .await?
            .ok_or_else(|| {
                AppError::ResourceNotFound(format!("Proveedor {}", detalle.header.proveedor_id))
            })?;

        // 2. Configura el PDF: la fuente vive en la carpeta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None).map_err(|_| {
            AppError::FontNotFound("Fuente no encontrada en la carpeta ./fonts".to_string())
        })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Orden de compra {}", detalle.header.numero_orden));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- ENCABEZADO ---
        doc.push(
            elements::Paragraph::new("ORDEN DE COMPRA")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(format!("Folio: {}", detalle.header.numero_orden))
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(1));

        doc.push(elements::Paragraph::new(format!(
            "Obra: {} — {}",
            obra.codigo, obra.nombre
        )));
        doc.push(elements::Paragraph::new(format!(
            "Proveedor: {}",
            proveedor.razon_social
        )));
        doc.push(elements::Paragraph::new(format!("RFC: {}", proveedor.rfc)));
        doc.push(elements::Paragraph::new(format!(
            "Fecha de emisión: {}",
            detalle.header.fecha_emision.format("%d/%m/%Y")
        )));
        doc.push(elements::Paragraph::new(format!(
            "Fecha de entrega: {}",
            detalle.header.fecha_entrega.format("%d/%m/%Y")
        )));

        if let Some(comprador) = &detalle.header.comprador_nombre {
            doc.push(elements::Paragraph::new(format!("Comprador: {}", comprador)));
        }

        doc.push(elements::Break::new(2));

        // --- TABLA DE PARTIDAS ---
        // Pesos de columnas: Descripción (5), Unidad (1), Cant (1), P.U. (2), Importe (2)
        let mut table = elements::TableLayout::new(vec![5, 1, 1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Descripción").styled(style_bold))
            .element(elements::Paragraph::new("Unidad").styled(style_bold))
            .element(elements::Paragraph::new("Cant.").styled(style_bold))
            .element(elements::Paragraph::new("P. Unitario").styled(style_bold))
            .element(elements::Paragraph::new("Importe").styled(style_bold))
            .push()
            .expect("Table error");

        for item in &detalle.items {
            table
                .row()
                .element(elements::Paragraph::new(item.descripcion.clone()))
                .element(elements::Paragraph::new(item.unidad.clone()))
                .element(elements::Paragraph::new(format!("{:.2}", item.cantidad)))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.precio_unitario)))
                .element(elements::Paragraph::new(format!("$ {:.2}", item.total)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(1.5));

        // --- TOTALES ---
        let mut totales = vec![format!("Subtotal: $ {:.2}", detalle.header.subtotal)];
        if detalle.header.descuento_monto > rust_decimal::Decimal::ZERO {
            totales.push(format!("Descuento: -$ {:.2}", detalle.header.descuento_monto));
        }
        if detalle.header.has_iva {
            totales.push(format!("IVA (16%): $ {:.2}", detalle.header.iva));
        }
        totales.push(format!("TOTAL: $ {:.2}", detalle.header.total));

        for (i, linea) in totales.iter().enumerate() {
            let es_total = i == totales.len() - 1;
            let mut parrafo = elements::Paragraph::new(linea.clone());
            parrafo.set_alignment(Alignment::Right);
            let estilo = if es_total {
                style::Style::new().bold().with_font_size(12)
            } else {
                style::Style::new()
            };
            doc.push(parrafo.styled(estilo));
        }

        doc.push(elements::Break::new(2));

        // --- QR DEL FOLIO ---
        // En recepción se escanea para ubicar la orden sin teclear el folio.
        let code = QrCode::new(detalle.header.numero_orden.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        if let Some(observaciones) = &detalle.header.observaciones {
            doc.push(elements::Break::new(1));
            doc.push(
                elements::Paragraph::new(format!("Observaciones: {}", observaciones))
                    .styled(style::Style::new().italic().with_font_size(8)),
            );
        }

        // 3. Renderiza a buffer (memoria)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}
