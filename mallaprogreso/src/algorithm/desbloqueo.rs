//! Motor de desbloqueo: un curso está desbloqueado sólo si TODOS sus
//! requisitos están aprobados. Sin requisitos => siempre desbloqueado.

use std::collections::HashSet;

use crate::models::Malla;

/// Recalcula `bloqueado` para cada curso de la malla.
///
/// No hay crédito parcial: basta un requisito sin aprobar (o un id que no
/// existe en la malla) para que el curso quede bloqueado.
pub fn verificar_desbloqueos(malla: &mut Malla) {
    let aprobados: HashSet<String> = malla
        .cursos()
        .filter(|c| c.aprobado)
        .map(|c| c.id.clone())
        .collect();

    let mut bloqueados = 0usize;
    for curso in malla.cursos_mut() {
        curso.bloqueado = !curso.requisitos.iter().all(|r| aprobados.contains(r));
        if curso.bloqueado {
            bloqueados += 1;
        }
    }

    tracing::debug!(aprobados = aprobados.len(), bloqueados, "desbloqueos verificados");
}

/// Requisitos del curso que aún faltan por aprobar, en el orden declarado.
pub fn requisitos_pendientes(malla: &Malla, curso_id: &str) -> Vec<String> {
    let Some(curso) = malla.curso(curso_id) else {
        return Vec::new();
    };
    curso
        .requisitos
        .iter()
        .filter(|r| !malla.curso(r).map(|c| c.aprobado).unwrap_or(false))
        .cloned()
        .collect()
}
