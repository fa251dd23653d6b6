//! Tipos de error del crate.
//!
//! Las fallas "suaves" (estado guardado corrupto, créditos inválidos, ids
//! desconocidos en el almacén) no llegan aquí: se registran y se ignoran.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MallaError {
    #[error("curso no encontrado: {0}")]
    CursoNoEncontrado(String),

    #[error("semestre no encontrado: {0}")]
    SemestreNoEncontrado(usize),

    #[error("el curso {0} no es editable")]
    CursoNoEditable(String),

    #[error("curso duplicado en la malla base: {0}")]
    CursoDuplicado(String),

    #[error("se requiere confirmación: {0}")]
    ConfirmacionRequerida(&'static str),

    #[error("error del almacén: {0}")]
    Almacen(#[from] rusqlite::Error),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON inválido: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error generando PDF: {0}")]
    Pdf(#[from] lopdf::Error),
}

pub type Result<T> = std::result::Result<T, MallaError>;
