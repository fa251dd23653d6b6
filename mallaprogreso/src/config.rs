//! Configuración desde variables de entorno.
//!
//! - `MALLA_BIND`: dirección del servidor (por defecto `127.0.0.1:8080`)
//! - `MALLA_DATA_DIR`: directorio del almacén SQLite (por defecto `data`)
//! - `MALLA_BASE`: archivo JSON con la malla base (opcional; si falta se usa la embebida)
//! - `MALLA_ALMACEN`: `sqlite` (por defecto) o `memoria`

use std::env;
use std::path::PathBuf;

use crate::error::Result;
use crate::estado::{Almacen, MemoriaAlmacen, SqliteAlmacen};
use crate::malla::{leer_malla_base, malla_por_defecto};
use crate::models::Malla;

pub const BIND_POR_DEFECTO: &str = "127.0.0.1:8080";
pub const DATA_DIR_POR_DEFECTO: &str = "data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoAlmacen {
    Sqlite,
    Memoria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub data_dir: PathBuf,
    pub malla_base: Option<PathBuf>,
    pub almacen: TipoAlmacen,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: BIND_POR_DEFECTO.to_string(),
            data_dir: PathBuf::from(DATA_DIR_POR_DEFECTO),
            malla_base: None,
            almacen: TipoAlmacen::Sqlite,
        }
    }
}

impl Config {
    /// Lee la configuración del entorno. `.env` lo carga `main` antes de
    /// iniciar los logs.
    pub fn from_env() -> Self {
        Self::from_lookup(|clave| env::var(clave).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let no_vacio = |clave: &str| lookup(clave).filter(|v| !v.trim().is_empty());
        let defecto = Config::default();

        let almacen = match no_vacio("MALLA_ALMACEN").map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "memoria" => TipoAlmacen::Memoria,
            Some(v) if v != "sqlite" => {
                tracing::warn!(valor = %v, "MALLA_ALMACEN desconocido, se usa sqlite");
                TipoAlmacen::Sqlite
            }
            _ => TipoAlmacen::Sqlite,
        };

        Config {
            bind: no_vacio("MALLA_BIND").unwrap_or(defecto.bind),
            data_dir: no_vacio("MALLA_DATA_DIR").map(PathBuf::from).unwrap_or(defecto.data_dir),
            malla_base: no_vacio("MALLA_BASE").map(PathBuf::from),
            almacen,
        }
    }

    pub fn cargar_malla_base(&self) -> Result<Malla> {
        match &self.malla_base {
            Some(ruta) => leer_malla_base(ruta),
            None => malla_por_defecto(),
        }
    }

    pub fn abrir_almacen(&self) -> Result<Box<dyn Almacen + Send>> {
        Ok(match self.almacen {
            TipoAlmacen::Sqlite => Box::new(SqliteAlmacen::abrir_en_directorio(&self.data_dir)?),
            TipoAlmacen::Memoria => Box::new(MemoriaAlmacen::new()),
        })
    }
}
