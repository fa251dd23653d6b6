// Biblioteca raíz del crate `mallaprogreso`.
// Seguimiento del avance en una malla curricular: aprobados, desbloqueos por
// requisitos, créditos por semestre, persistencia y exportación a PDF.
pub mod algorithm;
pub mod config;
pub mod editor;
pub mod error;
pub mod estado;
pub mod logging;
pub mod malla;
pub mod models;
pub mod reorden;
pub mod reporte;
pub mod server;
pub mod sesion;
pub mod vista;

pub use error::{MallaError, Result};
pub use server::run_server;
pub use sesion::Sesion;
