// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Un curso (ramo) de la malla.
///
/// `nombre` y `creditos` son los valores mostrados/almacenados; `nombre_entrada`
/// y `creditos_entrada` guardan lo último que el usuario escribió en los campos
/// de edición (sólo tienen sentido para cursos `editable`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Curso {
    pub id: String,
    pub nombre: String,
    pub nombre_entrada: String,
    pub creditos: u32,
    pub creditos_entrada: String,
    pub aprobado: bool,
    pub requisitos: Vec<String>,
    /// Derivado por `verificar_desbloqueos`, nunca se persiste.
    pub bloqueado: bool,
    pub editable: bool,
}

impl Curso {
    pub fn new(id: &str, nombre: &str, creditos: u32) -> Self {
        Curso {
            id: id.to_string(),
            nombre: nombre.to_string(),
            nombre_entrada: nombre.to_string(),
            creditos,
            creditos_entrada: creditos.to_string(),
            aprobado: false,
            requisitos: Vec::new(),
            bloqueado: false,
            editable: false,
        }
    }

    pub fn con_requisitos(mut self, requisitos: &[&str]) -> Self {
        self.requisitos = requisitos.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Etiqueta de créditos tal como se muestra en la tarjeta del curso.
    pub fn creditos_label(&self) -> String {
        format!("{} créditos", self.creditos)
    }
}

/// Un semestre: lista ordenada de cursos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Semestre {
    pub titulo: String,
    pub cursos: Vec<Curso>,
}

impl Semestre {
    pub fn new(titulo: &str, cursos: Vec<Curso>) -> Self {
        Semestre { titulo: titulo.to_string(), cursos }
    }
}

/// La malla completa. Cada curso pertenece a exactamente un semestre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Malla {
    pub titulo: String,
    pub semestres: Vec<Semestre>,
}

impl Malla {
    pub fn cursos(&self) -> impl Iterator<Item = &Curso> {
        self.semestres.iter().flat_map(|s| s.cursos.iter())
    }

    pub fn cursos_mut(&mut self) -> impl Iterator<Item = &mut Curso> {
        self.semestres.iter_mut().flat_map(|s| s.cursos.iter_mut())
    }

    pub fn curso(&self, id: &str) -> Option<&Curso> {
        self.cursos().find(|c| c.id == id)
    }

    pub fn curso_mut(&mut self, id: &str) -> Option<&mut Curso> {
        self.cursos_mut().find(|c| c.id == id)
    }

    /// Índice (semestre, posición) del curso indicado.
    pub fn ubicar(&self, id: &str) -> Option<(usize, usize)> {
        self.semestres.iter().enumerate().find_map(|(si, s)| {
            s.cursos.iter().position(|c| c.id == id).map(|pi| (si, pi))
        })
    }
}

/// Override de un curso editable tal como se guarda en el almacén.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OverrideEditable {
    #[serde(default, deserialize_with = "texto_o_numero")]
    pub nombre: String,
    /// En el almacén puede venir como texto o como número.
    #[serde(default, deserialize_with = "texto_o_numero")]
    pub creditos: String,
}

/// Registro persistido bajo la clave fija del almacén.
///
/// ```json
/// { "cursosAprobados": ["DER101"], "cursosEditables": { "ELE1": { "nombre": "Optativo", "creditos": "4" } } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EstadoPersistido {
    #[serde(default)]
    pub cursos_aprobados: Vec<String>,
    #[serde(default)]
    pub cursos_editables: BTreeMap<String, OverrideEditable>,
}

/// Acepta `"4"`, `4`, `4.0` o `null` y lo deja como texto.
pub(crate) fn texto_o_numero<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let valor = serde_json::Value::deserialize(deserializer)?;
    Ok(match valor {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        otro => otro.to_string(),
    })
}
