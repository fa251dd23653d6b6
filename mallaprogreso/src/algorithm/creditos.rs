//! Cálculo de créditos por semestre.

use serde::Serialize;

use crate::models::{Malla, Semestre};

/// Máximo de créditos por semestre. Sólo se usa para marcar visualmente el
/// total; nunca impide una acción.
pub const MAX_CREDITOS: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumenCreditos {
    pub semestre: String,
    pub total: u32,
    pub maximo: u32,
    pub excedido: bool,
}

impl ResumenCreditos {
    pub fn label_actuales(&self) -> String {
        format!("Créditos actuales: {}", self.total)
    }

    pub fn label_maximos(&self) -> String {
        format!("Máximo permitido: {}", self.maximo)
    }
}

/// Suma los créditos de los cursos que pertenecen hoy al semestre.
pub fn total_semestre(semestre: &Semestre) -> u32 {
    semestre
        .cursos
        .iter()
        .fold(0u32, |acc, c| acc.saturating_add(c.creditos))
}

pub fn resumen_semestre(semestre: &Semestre) -> ResumenCreditos {
    let total = total_semestre(semestre);
    ResumenCreditos {
        semestre: semestre.titulo.clone(),
        total,
        maximo: MAX_CREDITOS,
        excedido: total > MAX_CREDITOS,
    }
}

/// Un resumen por semestre, en el orden de la malla.
pub fn calcular_creditos(malla: &Malla) -> Vec<ResumenCreditos> {
    let resumenes: Vec<ResumenCreditos> = malla.semestres.iter().map(resumen_semestre).collect();
    for r in resumenes.iter().filter(|r| r.excedido) {
        tracing::debug!(semestre = %r.semestre, total = r.total, "semestre sobre el máximo de créditos");
    }
    resumenes
}
