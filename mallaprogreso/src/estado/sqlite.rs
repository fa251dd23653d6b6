use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::estado::almacen::Almacen;

/// Nombre del archivo SQLite dentro del directorio de datos.
pub const ARCHIVO_ALMACEN: &str = "almacen.db";

/// Almacén clave-valor respaldado por un archivo SQLite.
#[derive(Debug)]
pub struct SqliteAlmacen {
    conn: Connection,
}

impl SqliteAlmacen {
    /// Abre (o crea) `<dir>/almacen.db` y asegura la tabla.
    pub fn abrir_en_directorio<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Self::abrir(dir.join(ARCHIVO_ALMACEN))
    }

    pub fn abrir<P: AsRef<Path>>(ruta: P) -> Result<Self> {
        let ruta = ruta.as_ref();
        let conn = Connection::open(ruta)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS almacen (
                clave TEXT PRIMARY KEY,
                valor TEXT NOT NULL
            )",
            [],
        )?;
        tracing::info!(ruta = %ruta.display(), "almacén sqlite abierto");
        Ok(SqliteAlmacen { conn })
    }
}

impl Almacen for SqliteAlmacen {
    fn get_item(&self, clave: &str) -> Result<Option<String>> {
        let valor = self
            .conn
            .query_row(
                "SELECT valor FROM almacen WHERE clave = ?1",
                params![clave],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(valor)
    }

    fn set_item(&mut self, clave: &str, valor: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO almacen (clave, valor) VALUES (?1, ?2)
             ON CONFLICT(clave) DO UPDATE SET valor = excluded.valor",
            params![clave, valor],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, clave: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM almacen WHERE clave = ?1", params![clave])?;
        Ok(())
    }
}
