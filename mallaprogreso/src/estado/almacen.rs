use std::collections::HashMap;

use crate::error::Result;

/// Almacén clave-valor persistente, equivalente al `localStorage` del
/// navegador: valores de texto bajo claves de texto.
pub trait Almacen {
    fn get_item(&self, clave: &str) -> Result<Option<String>>;
    fn set_item(&mut self, clave: &str, valor: &str) -> Result<()>;
    fn remove_item(&mut self, clave: &str) -> Result<()>;
}

/// Almacén en memoria; se pierde al terminar el proceso.
#[derive(Debug, Default, Clone)]
pub struct MemoriaAlmacen {
    datos: HashMap<String, String>,
}

impl MemoriaAlmacen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Almacen for MemoriaAlmacen {
    fn get_item(&self, clave: &str) -> Result<Option<String>> {
        Ok(self.datos.get(clave).cloned())
    }

    fn set_item(&mut self, clave: &str, valor: &str) -> Result<()> {
        self.datos.insert(clave.to_string(), valor.to_string());
        Ok(())
    }

    fn remove_item(&mut self, clave: &str) -> Result<()> {
        self.datos.remove(clave);
        Ok(())
    }
}
