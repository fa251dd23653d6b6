//! Inicialización de logs con `tracing-subscriber`.
//!
//! El filtro se toma de `RUST_LOG` (p. ej. `RUST_LOG=mallaprogreso=debug`);
//! sin la variable se registra a nivel `info`.

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // try_init: los tests pueden inicializar más de una vez
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_target(false)
        .try_init();
}
