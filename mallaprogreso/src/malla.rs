//! Lectura de la malla base (el "marcado" inicial de la página).
//!
//! La malla base define la identidad de cada curso, su semestre inicial, sus
//! requisitos y si es editable. Se lee desde JSON; si no se indica archivo se
//! usa la malla embebida en `src/datafiles/malla_derecho.json`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::editor::coercionar_creditos;
use crate::error::{MallaError, Result};
use crate::models::{texto_o_numero, Curso, Malla, Semestre};

/// Título usado cuando la malla base no trae uno.
pub const TITULO_POR_DEFECTO: &str = "MALLA DERECHO 6.0 - Progreso Académico";

const MALLA_EMBEBIDA: &str = include_str!("datafiles/malla_derecho.json");

#[derive(Debug, Deserialize)]
struct MallaBase {
    #[serde(default)]
    titulo: Option<String>,
    semestres: Vec<SemestreBase>,
}

#[derive(Debug, Deserialize)]
struct SemestreBase {
    titulo: String,
    #[serde(default)]
    cursos: Vec<CursoBase>,
}

#[derive(Debug, Deserialize)]
struct CursoBase {
    id: String,
    nombre: String,
    #[serde(default, deserialize_with = "texto_o_numero")]
    creditos: String,
    #[serde(default)]
    requisitos: Requisitos,
    #[serde(default)]
    aprobado: bool,
    #[serde(default)]
    editable: bool,
}

/// Los requisitos pueden venir como lista o como texto separado por comas
/// (`"DER201, DER202"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Requisitos {
    Lista(Vec<String>),
    Texto(String),
}

impl Default for Requisitos {
    fn default() -> Self {
        Requisitos::Lista(Vec::new())
    }
}

impl Requisitos {
    fn normalizar(self) -> Vec<String> {
        let crudos: Vec<String> = match self {
            Requisitos::Lista(v) => v,
            Requisitos::Texto(s) => s.split(',').map(str::to_string).collect(),
        };
        crudos
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }
}

/// Parsea una malla base desde texto JSON.
pub fn parse_malla_base(json: &str) -> Result<Malla> {
    let base: MallaBase = serde_json::from_str(json)?;
    let mut vistos: HashSet<String> = HashSet::new();
    let mut semestres = Vec::with_capacity(base.semestres.len());

    for sem in base.semestres {
        let mut cursos = Vec::with_capacity(sem.cursos.len());
        for c in sem.cursos {
            if !vistos.insert(c.id.clone()) {
                return Err(MallaError::CursoDuplicado(c.id));
            }
            cursos.push(Curso {
                creditos: coercionar_creditos(&c.creditos),
                creditos_entrada: c.creditos,
                nombre_entrada: c.nombre.clone(),
                nombre: c.nombre,
                aprobado: c.aprobado,
                requisitos: c.requisitos.normalizar(),
                bloqueado: false,
                editable: c.editable,
                id: c.id,
            });
        }
        semestres.push(Semestre { titulo: sem.titulo, cursos });
    }

    Ok(Malla {
        titulo: base.titulo.unwrap_or_else(|| TITULO_POR_DEFECTO.to_string()),
        semestres,
    })
}

/// Lee la malla base desde un archivo JSON.
pub fn leer_malla_base<P: AsRef<Path>>(ruta: P) -> Result<Malla> {
    let ruta = ruta.as_ref();
    let contenido = std::fs::read_to_string(ruta)?;
    let malla = parse_malla_base(&contenido)?;
    tracing::info!(
        ruta = %ruta.display(),
        semestres = malla.semestres.len(),
        "malla base leída"
    );
    Ok(malla)
}

/// Malla embebida en el binario.
pub fn malla_por_defecto() -> Result<Malla> {
    parse_malla_base(MALLA_EMBEBIDA)
}
