#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mallaprogreso::estado::Almacen;
use mallaprogreso::models::{Curso, Malla, Semestre};
use mallaprogreso::Result;

/// Almacén en memoria cuyo contenido el test puede inspeccionar mientras la
/// sesión lo usa.
#[derive(Debug, Clone, Default)]
pub struct AlmacenCompartido {
    pub datos: Arc<Mutex<HashMap<String, String>>>,
}

impl AlmacenCompartido {
    pub fn leer(&self, clave: &str) -> Option<String> {
        self.datos.lock().unwrap().get(clave).cloned()
    }
}

impl Almacen for AlmacenCompartido {
    fn get_item(&self, clave: &str) -> Result<Option<String>> {
        Ok(self.datos.lock().unwrap().get(clave).cloned())
    }

    fn set_item(&mut self, clave: &str, valor: &str) -> Result<()> {
        self.datos.lock().unwrap().insert(clave.to_string(), valor.to_string());
        Ok(())
    }

    fn remove_item(&mut self, clave: &str) -> Result<()> {
        self.datos.lock().unwrap().remove(clave);
        Ok(())
    }
}

/// Malla chica: S1 = {B(4), C(3), E editable(2)}, S2 = {A(5) <- B, D(5) <- B,C, X(2) <- NOEXISTE}
pub fn malla_prueba() -> Malla {
    Malla {
        titulo: "Malla de prueba".to_string(),
        semestres: vec![
            Semestre::new(
                "Semestre 1",
                vec![
                    Curso::new("B", "Curso B", 4),
                    Curso::new("C", "Curso C", 3),
                    Curso::new("E", "Electivo", 2).editable(),
                ],
            ),
            Semestre::new(
                "Semestre 2",
                vec![
                    Curso::new("A", "Curso A", 5).con_requisitos(&["B"]),
                    Curso::new("D", "Curso D", 5).con_requisitos(&["B", "C"]),
                    Curso::new("X", "Curso X", 2).con_requisitos(&["NOEXISTE"]),
                ],
            ),
        ],
    }
}

pub fn aprobar(malla: &mut Malla, id: &str, aprobado: bool) {
    malla.curso_mut(id).expect("curso de prueba").aprobado = aprobado;
}

pub fn bloqueado(malla: &Malla, id: &str) -> bool {
    malla.curso(id).expect("curso de prueba").bloqueado
}
