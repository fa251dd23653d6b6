//! Exportación del progreso a un documento paginado.
//!
//! `construir_reporte` arma la disposición (texto en coordenadas x/y en mm
//! sobre una hoja A4, con tamaño de fuente) y `pdf::render_pdf` la convierte en
//! bytes PDF. La disposición no depende del motor PDF, por eso los tests la
//! revisan directamente.

pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::algorithm::resumen_semestre;
use crate::error::Result;
use crate::models::{Curso, Malla};

/// Nombre fijo del archivo exportado.
pub const NOMBRE_ARCHIVO: &str = "malla-derecho-progreso.pdf";

/// Hoja A4 en milímetros.
pub const ANCHO_PAGINA: f32 = 210.0;
pub const ALTO_PAGINA: f32 = 297.0;

const MARGEN_SECCION: f32 = 60.0;
const MARGEN_LINEA: f32 = 20.0;
const Y_INICIO_PAGINA: f32 = 20.0;

/// Un texto colocado en la página.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trazo {
    pub texto: String,
    pub x: f32,
    pub y: f32,
    pub tamano: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagina {
    pub trazos: Vec<Trazo>,
}

/// Documento paginado al estilo jsPDF: tamaño de fuente, texto en (x, y) y
/// página nueva.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reporte {
    pub ancho: f32,
    pub alto: f32,
    pub paginas: Vec<Pagina>,
    tamano_actual: u8,
}

impl Default for Reporte {
    fn default() -> Self {
        Reporte {
            ancho: ANCHO_PAGINA,
            alto: ALTO_PAGINA,
            paginas: vec![Pagina::default()],
            tamano_actual: 16,
        }
    }
}

impl Reporte {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_size(&mut self, tamano: u8) {
        self.tamano_actual = tamano;
    }

    pub fn text(&mut self, texto: &str, x: f32, y: f32) {
        let tamano = self.tamano_actual;
        if let Some(pagina) = self.paginas.last_mut() {
            pagina.trazos.push(Trazo { texto: texto.to_string(), x, y, tamano });
        }
    }

    pub fn add_page(&mut self) {
        self.paginas.push(Pagina::default());
    }

    /// Todos los textos en orden de escritura, útil para buscar contenido.
    pub fn textos(&self) -> impl Iterator<Item = &str> {
        self.paginas.iter().flat_map(|p| p.trazos.iter().map(|t| t.texto.as_str()))
    }
}

/// Línea de resumen de un curso. Los créditos salen del valor almacenado en
/// el propio curso.
pub fn linea_curso(curso: &Curso) -> String {
    format!("{} - {}", curso.nombre, curso.creditos_label())
}

/// Fecha local para el pie del reporte.
pub fn fecha_hoy() -> String {
    chrono::Local::now().format("%d-%m-%Y").to_string()
}

/// Escribe una lista de cursos bajo su encabezado, saltando de página cuando
/// el cursor pasa el margen inferior.
fn escribir_lista(doc: &mut Reporte, y: &mut f32, encabezado: &str, marca: &str, lineas: &[String]) {
    if lineas.is_empty() {
        return;
    }
    doc.set_font_size(12);
    doc.text(encabezado, 25.0, *y);
    *y += 5.0;

    for linea in lineas {
        if *y > doc.alto - MARGEN_LINEA {
            doc.add_page();
            *y = Y_INICIO_PAGINA;
        }
        doc.set_font_size(10);
        doc.text(&format!("{} {}", marca, linea), 30.0, *y);
        *y += 5.0;
    }
}

/// Arma el reporte de progreso: título, y por semestre su encabezado, cursos
/// aprobados, cursos pendientes y créditos actuales. El pie con la fecha va
/// sólo en la última página.
pub fn construir_reporte(malla: &Malla, fecha: &str) -> Reporte {
    let mut doc = Reporte::new();

    doc.set_font_size(20);
    doc.text(&malla.titulo, 20.0, 20.0);

    let mut y: f32 = 40.0;
    for semestre in &malla.semestres {
        if y > doc.alto - MARGEN_SECCION {
            doc.add_page();
            y = Y_INICIO_PAGINA;
        }

        doc.set_font_size(16);
        doc.text(&semestre.titulo, 20.0, y);
        y += 10.0;

        let (aprobados, pendientes): (Vec<&Curso>, Vec<&Curso>) =
            semestre.cursos.iter().partition(|c| c.aprobado);
        let aprobados: Vec<String> = aprobados.into_iter().map(linea_curso).collect();
        let pendientes: Vec<String> = pendientes.into_iter().map(linea_curso).collect();

        escribir_lista(&mut doc, &mut y, "Cursos Aprobados:", "✓", &aprobados);
        escribir_lista(&mut doc, &mut y, "Cursos Pendientes:", "○", &pendientes);

        doc.set_font_size(10);
        doc.text(&resumen_semestre(semestre).label_actuales(), 25.0, y);
        y += 15.0;
    }

    doc.set_font_size(8);
    let alto = doc.alto;
    doc.text(&format!("Generado el: {}", fecha), 20.0, alto - 10.0);

    tracing::debug!(paginas = doc.paginas.len(), "reporte construido");
    doc
}

/// Reporte en PDF con la fecha de hoy.
pub fn exportar(malla: &Malla) -> Result<Vec<u8>> {
    let reporte = construir_reporte(malla, &fecha_hoy());
    pdf::render_pdf(&reporte)
}

/// Escribe el PDF como `<dir>/malla-derecho-progreso.pdf`.
pub fn exportar_a<P: AsRef<Path>>(malla: &Malla, dir: P) -> Result<PathBuf> {
    let bytes = exportar(malla)?;
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let ruta = dir.join(NOMBRE_ARCHIVO);
    fs::write(&ruta, &bytes)?;
    tracing::info!(ruta = %ruta.display(), bytes = bytes.len(), "reporte exportado");
    Ok(ruta)
}
