//! Puente de reordenamiento (arrastrar y soltar).
//!
//! El componente de arrastre del front-end avisa cada vez que suelta un curso.
//! `mover_curso` aplica el movimiento en el acto; el recálculo de créditos y
//! el guardado se difieren con `Reordenador` para que corran después de que
//! el movimiento ya esté aplicado.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::error::{MallaError, Result};
use crate::models::Malla;

/// Espera entre soltar un curso y recalcular/guardar.
pub const DEBOUNCE: Duration = Duration::from_millis(100);

/// Un curso soltado en `destino` (índice de semestre) en la posición `indice`.
/// Sin `indice` el curso queda al final del semestre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movimiento {
    pub curso_id: String,
    pub destino: usize,
    #[serde(default)]
    pub indice: Option<usize>,
}

/// Mueve el curso dentro de su semestre o hacia otro. El curso sigue
/// perteneciendo a un único semestre; si el id o el destino no existen la
/// malla no se toca. Devuelve la ubicación anterior `(semestre, posición)`.
pub fn mover_curso(malla: &mut Malla, mov: &Movimiento) -> Result<(usize, usize)> {
    if mov.destino >= malla.semestres.len() {
        return Err(MallaError::SemestreNoEncontrado(mov.destino));
    }
    let (origen, pos) = malla
        .ubicar(&mov.curso_id)
        .ok_or_else(|| MallaError::CursoNoEncontrado(mov.curso_id.clone()))?;

    let curso = malla.semestres[origen].cursos.remove(pos);
    let destino = &mut malla.semestres[mov.destino].cursos;
    let indice = mov.indice.unwrap_or(destino.len()).min(destino.len());
    destino.insert(indice, curso);

    tracing::debug!(
        curso = %mov.curso_id,
        origen,
        destino = mov.destino,
        indice,
        "curso movido"
    );
    Ok((origen, pos))
}

/// Programa la finalización diferida de cada movimiento.
///
/// Cada soltada agenda su propia finalización; no se cancelan entre sí.
#[derive(Debug, Clone, Copy)]
pub struct Reordenador {
    retraso: Duration,
}

impl Default for Reordenador {
    fn default() -> Self {
        Reordenador { retraso: DEBOUNCE }
    }
}

impl Reordenador {
    pub fn new(retraso: Duration) -> Self {
        Reordenador { retraso }
    }

    pub fn retraso(&self) -> Duration {
        self.retraso
    }

    /// Ejecuta `finalizar` tras el retraso en el runtime de tokio actual.
    pub fn programar<F>(&self, finalizar: F) -> JoinHandle<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let retraso = self.retraso;
        tokio::spawn(async move {
            tokio::time::sleep(retraso).await;
            finalizar();
        })
    }
}
