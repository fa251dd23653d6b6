// Algoritmos sobre la malla: desbloqueo por requisitos y totales de créditos.
pub mod creditos;
pub mod desbloqueo;

pub use creditos::{calcular_creditos, resumen_semestre, total_semestre, ResumenCreditos, MAX_CREDITOS};
pub use desbloqueo::{requisitos_pendientes, verificar_desbloqueos};
