//! Persistencia del progreso bajo una única clave del almacén.
//!
//! Submódulos:
//! - `almacen`: trait `Almacen` y la implementación en memoria
//! - `sqlite`: almacén respaldado por SQLite
//!
//! Sólo se guardan los ids aprobados y los overrides de cursos editables; los
//! campos derivados (bloqueado, totales de créditos) se recalculan siempre.

pub mod almacen;
pub mod sqlite;

pub use almacen::{Almacen, MemoriaAlmacen};
pub use sqlite::SqliteAlmacen;

use std::collections::HashSet;

use crate::algorithm::{calcular_creditos, verificar_desbloqueos, ResumenCreditos};
use crate::editor::{actualizar_creditos, actualizar_nombre};
use crate::error::Result;
use crate::models::{EstadoPersistido, Malla, OverrideEditable};

/// Clave fija bajo la que se guarda el estado.
pub const CLAVE_ESTADO: &str = "mallaDerecho";

/// Qué ocurrió al intentar cargar el estado guardado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultadoCarga {
    /// No había nada guardado; la malla queda como estaba.
    SinEstado,
    /// El contenido guardado no se pudo interpretar; la malla queda como estaba.
    Corrupto,
    Aplicado {
        aprobados: usize,
        editables: usize,
        /// Ids del estado que ya no existen (o no son editables) en la malla.
        omitidos: usize,
        creditos: Vec<ResumenCreditos>,
    },
}

/// Construye el registro persistido a partir de la malla actual.
pub fn capturar_estado(malla: &Malla) -> EstadoPersistido {
    let mut estado = EstadoPersistido::default();
    for curso in malla.cursos() {
        if curso.aprobado {
            estado.cursos_aprobados.push(curso.id.clone());
        }
        if curso.editable {
            estado.cursos_editables.insert(
                curso.id.clone(),
                OverrideEditable {
                    nombre: curso.nombre_entrada.clone(),
                    creditos: curso.creditos_entrada.clone(),
                },
            );
        }
    }
    estado
}

/// Serializa el estado de la malla bajo `CLAVE_ESTADO`.
pub fn guardar(malla: &Malla, almacen: &mut dyn Almacen) -> Result<()> {
    let estado = capturar_estado(malla);
    let texto = serde_json::to_string(&estado)?;
    almacen.set_item(CLAVE_ESTADO, &texto)?;
    tracing::debug!(
        aprobados = estado.cursos_aprobados.len(),
        editables = estado.cursos_editables.len(),
        "estado guardado"
    );
    Ok(())
}

/// Lee el estado guardado y lo aplica sobre `malla`.
///
/// Un estado ausente o corrupto no es un error: se registra y la malla queda
/// con sus valores actuales. Sólo fallas del propio almacén se propagan.
pub fn cargar(malla: &mut Malla, almacen: &dyn Almacen) -> Result<ResultadoCarga> {
    let Some(texto) = almacen.get_item(CLAVE_ESTADO)? else {
        return Ok(ResultadoCarga::SinEstado);
    };

    let estado: EstadoPersistido = match serde_json::from_str(&texto) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(error = %e, "error al cargar el estado guardado");
            return Ok(ResultadoCarga::Corrupto);
        }
    };

    Ok(aplicar_estado(malla, &estado))
}

/// Aplica un estado ya interpretado y deja los derivados sincronizados.
///
/// El conjunto de aprobados guardado es la fuente de verdad: los cursos que no
/// aparecen quedan sin aprobar.
pub fn aplicar_estado(malla: &mut Malla, estado: &EstadoPersistido) -> ResultadoCarga {
    let aprobados: HashSet<&str> = estado.cursos_aprobados.iter().map(String::as_str).collect();
    let mut omitidos = aprobados
        .iter()
        .filter(|id| malla.curso(id).is_none())
        .count();

    let mut n_aprobados = 0usize;
    for curso in malla.cursos_mut() {
        curso.aprobado = aprobados.contains(curso.id.as_str());
        if curso.aprobado {
            n_aprobados += 1;
        }
    }

    let mut n_editables = 0usize;
    for (id, datos) in &estado.cursos_editables {
        match malla.curso_mut(id) {
            Some(curso) if curso.editable => {
                actualizar_nombre(curso, &datos.nombre);
                actualizar_creditos(curso, &datos.creditos);
                n_editables += 1;
            }
            _ => {
                tracing::debug!(curso = %id, "override omitido: curso inexistente o no editable");
                omitidos += 1;
            }
        }
    }

    verificar_desbloqueos(malla);
    let creditos = calcular_creditos(malla);

    tracing::info!(
        aprobados = n_aprobados,
        editables = n_editables,
        omitidos,
        "estado guardado aplicado"
    );

    ResultadoCarga::Aplicado {
        aprobados: n_aprobados,
        editables: n_editables,
        omitidos,
        creditos,
    }
}

/// Borra el estado guardado. Volver a la malla base queda a cargo del llamador.
pub fn limpiar(almacen: &mut dyn Almacen) -> Result<()> {
    almacen.remove_item(CLAVE_ESTADO)?;
    tracing::info!(clave = CLAVE_ESTADO, "estado guardado eliminado");
    Ok(())
}
