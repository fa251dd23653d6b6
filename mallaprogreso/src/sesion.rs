//! Sesión de trabajo sobre una malla: une la malla base, el estado en memoria
//! y el almacén. Cada acción del usuario es un método con su cadena de
//! efectos explícita (p. ej. alternar -> desbloqueos -> guardar). Los totales
//! de créditos no se guardan en la sesión: se calculan cada vez que se leen.

use crate::algorithm::{calcular_creditos, verificar_desbloqueos, ResumenCreditos};
use crate::editor;
use crate::error::{MallaError, Result};
use crate::estado::{self, Almacen, ResultadoCarga};
use crate::models::{Curso, Malla};
use crate::reorden::{mover_curso, Movimiento};
use crate::reporte::{self, Reporte};
use crate::vista::VistaMalla;

/// Mensaje que debe aceptar el usuario antes de borrar todo.
pub const MENSAJE_CONFIRMACION: &str =
    "¿Estás seguro de que quieres borrar todos los datos guardados? Esta acción no se puede deshacer.";

pub struct Sesion {
    base: Malla,
    malla: Malla,
    almacen: Box<dyn Almacen + Send>,
}

impl std::fmt::Debug for Sesion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sesion")
            .field("malla", &self.malla.titulo)
            .field("semestres", &self.malla.semestres.len())
            .finish()
    }
}

impl Sesion {
    /// Arranque: parte de la malla base, aplica el estado guardado (si lo hay)
    /// y deja los desbloqueos consistentes.
    pub fn iniciar(base: Malla, almacen: Box<dyn Almacen + Send>) -> Result<Self> {
        let mut sesion = Sesion {
            malla: base.clone(),
            base,
            almacen,
        };

        match estado::cargar(&mut sesion.malla, &*sesion.almacen)? {
            ResultadoCarga::SinEstado => tracing::info!("sin estado guardado, se usa la malla base"),
            ResultadoCarga::Corrupto => tracing::warn!("estado guardado ilegible, se usa la malla base"),
            ResultadoCarga::Aplicado { .. } => {}
        }
        verificar_desbloqueos(&mut sesion.malla);
        Ok(sesion)
    }

    pub fn malla(&self) -> &Malla {
        &self.malla
    }

    /// Totales por semestre calculados sobre la malla actual.
    pub fn creditos(&self) -> Vec<ResumenCreditos> {
        calcular_creditos(&self.malla)
    }

    pub fn vista(&self) -> VistaMalla {
        VistaMalla::from(&self.malla)
    }

    fn guardar(&mut self) -> Result<()> {
        estado::guardar(&self.malla, &mut *self.almacen)
    }

    fn curso_editable(&mut self, id: &str) -> Result<&mut Curso> {
        let curso = self
            .malla
            .curso_mut(id)
            .ok_or_else(|| MallaError::CursoNoEncontrado(id.to_string()))?;
        if !curso.editable {
            return Err(MallaError::CursoNoEditable(id.to_string()));
        }
        Ok(curso)
    }

    /// Marca o desmarca el curso como aprobado. Devuelve el nuevo valor.
    pub fn alternar_aprobado(&mut self, id: &str) -> Result<bool> {
        let curso = self
            .malla
            .curso_mut(id)
            .ok_or_else(|| MallaError::CursoNoEncontrado(id.to_string()))?;
        curso.aprobado = !curso.aprobado;
        let aprobado = curso.aprobado;
        tracing::info!(curso = id, aprobado, "curso alternado");

        verificar_desbloqueos(&mut self.malla);
        self.guardar()?;
        Ok(aprobado)
    }

    pub fn editar_nombre(&mut self, id: &str, entrada: &str) -> Result<()> {
        let curso = self.curso_editable(id)?;
        editor::actualizar_nombre(curso, entrada);
        self.guardar()
    }

    pub fn editar_creditos(&mut self, id: &str, entrada: &str) -> Result<u32> {
        let curso = self.curso_editable(id)?;
        editor::actualizar_creditos(curso, entrada);
        let creditos = curso.creditos;
        self.guardar()?;
        Ok(creditos)
    }

    /// Aplica un movimiento de arrastre. El guardado va en
    /// `finalizar_reorden`, que el llamador difiere con `Reordenador`.
    pub fn mover(&mut self, mov: &Movimiento) -> Result<()> {
        mover_curso(&mut self.malla, mov)?;
        Ok(())
    }

    /// Cierre de un arrastre: un curso que cambia de semestre altera dos totales.
    pub fn finalizar_reorden(&mut self) -> Result<()> {
        for r in calcular_creditos(&self.malla).iter().filter(|r| r.excedido) {
            tracing::info!(semestre = %r.semestre, total = r.total, "semestre sobre el máximo tras reordenar");
        }
        self.guardar()
    }

    pub fn reporte(&self, fecha: &str) -> Reporte {
        reporte::construir_reporte(&self.malla, fecha)
    }

    pub fn exportar_pdf(&self) -> Result<Vec<u8>> {
        reporte::exportar(&self.malla)
    }

    /// Borra el estado guardado y vuelve a la malla base. Es irreversible, por
    /// eso exige `confirmado`.
    pub fn limpiar(&mut self, confirmado: bool) -> Result<()> {
        if !confirmado {
            return Err(MallaError::ConfirmacionRequerida(MENSAJE_CONFIRMACION));
        }
        estado::limpiar(&mut *self.almacen)?;
        self.malla = self.base.clone();
        verificar_desbloqueos(&mut self.malla);
        tracing::info!("datos borrados, malla reiniciada desde la base");
        Ok(())
    }
}
