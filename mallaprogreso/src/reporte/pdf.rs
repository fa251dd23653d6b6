//! Render de un `Reporte` a PDF con lopdf.
//!
//! Se usa la fuente estándar Helvetica con codificación WinAnsi, así que no
//! hay que incrustar fuentes. Los caracteres fuera de WinAnsi se sustituyen.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::Result;
use crate::reporte::{Pagina, Reporte};

const PT_POR_MM: f32 = 72.0 / 25.4;

fn mm_a_pt(mm: f32) -> i64 {
    (mm * PT_POR_MM).round() as i64
}

/// Codifica texto a WinAnsi (Latin-1 para los caracteres que usamos).
pub fn codificar_winansi(texto: &str) -> Vec<u8> {
    texto
        .chars()
        .map(|c| match c {
            '✓' => b'+',
            '○' => b'o',
            '–' | '—' => b'-',
            c if (c as u32) < 0x80 => c as u8,
            c if (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn contenido_pagina(pagina: &Pagina, alto_mm: f32) -> Content {
    let mut operations = Vec::with_capacity(pagina.trazos.len() * 5);
    for t in &pagina.trazos {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::Integer(i64::from(t.tamano))],
        ));
        operations.push(Operation::new(
            "Td",
            vec![
                Object::Integer(mm_a_pt(t.x)),
                Object::Integer(mm_a_pt(alto_mm - t.y)),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(codificar_winansi(&t.texto))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Genera los bytes del PDF, una página por cada página del reporte.
pub fn render_pdf(reporte: &Reporte) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(reporte.paginas.len());
    for pagina in &reporte.paginas {
        let content = contenido_pagina(pagina, reporte.alto);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(mm_a_pt(reporte.ancho)),
            Object::Integer(mm_a_pt(reporte.alto)),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
