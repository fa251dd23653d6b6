//! Vista derivada de la malla (estado -> vista, en un solo sentido).
//!
//! Es lo que un front-end necesita para pintar la malla: nunca se lee de
//! vuelta para mutar el estado.

use serde::Serialize;

use crate::algorithm::{requisitos_pendientes, resumen_semestre};
use crate::models::{Curso, Malla};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VistaCurso {
    pub id: String,
    pub nombre: String,
    pub creditos: u32,
    pub creditos_label: String,
    pub aprobado: bool,
    pub bloqueado: bool,
    pub editable: bool,
    pub requisitos: Vec<String>,
    /// Requisitos aún no aprobados; vacío si el curso está desbloqueado.
    pub faltan: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_entrada: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditos_entrada: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VistaSemestre {
    pub titulo: String,
    pub cursos: Vec<VistaCurso>,
    pub total: u32,
    pub actuales: String,
    pub maximos: String,
    pub excedido: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VistaMalla {
    pub titulo: String,
    pub semestres: Vec<VistaSemestre>,
}

fn vista_curso(malla: &Malla, curso: &Curso) -> VistaCurso {
    let (nombre_entrada, creditos_entrada) = if curso.editable {
        (Some(curso.nombre_entrada.clone()), Some(curso.creditos_entrada.clone()))
    } else {
        (None, None)
    };
    VistaCurso {
        id: curso.id.clone(),
        nombre: curso.nombre.clone(),
        creditos: curso.creditos,
        creditos_label: curso.creditos_label(),
        aprobado: curso.aprobado,
        bloqueado: curso.bloqueado,
        editable: curso.editable,
        requisitos: curso.requisitos.clone(),
        faltan: requisitos_pendientes(malla, &curso.id),
        nombre_entrada,
        creditos_entrada,
    }
}

impl From<&Malla> for VistaMalla {
    fn from(malla: &Malla) -> Self {
        let semestres = malla
            .semestres
            .iter()
            .map(|sem| {
                let resumen = resumen_semestre(sem);
                VistaSemestre {
                    titulo: sem.titulo.clone(),
                    cursos: sem.cursos.iter().map(|c| vista_curso(malla, c)).collect(),
                    total: resumen.total,
                    actuales: resumen.label_actuales(),
                    maximos: resumen.label_maximos(),
                    excedido: resumen.excedido,
                }
            })
            .collect();
        VistaMalla {
            titulo: malla.titulo.clone(),
            semestres,
        }
    }
}
