// --- Malla de progreso académico - Archivo principal ---

use mallaprogreso::config::Config;
use mallaprogreso::logging::init_logging;
use mallaprogreso::{run_server, Sesion};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // .env antes de los logs para que RUST_LOG pueda venir de ahí
    let _ = dotenv::dotenv();
    init_logging();
    let config = Config::from_env();

    let sesion = match config
        .cargar_malla_base()
        .and_then(|base| Sesion::iniciar(base, config.abrir_almacen()?))
    {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "no se pudo iniciar la sesión");
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    tracing::info!("=== Malla de progreso académico (API) ===");
    tracing::info!(bind = %config.bind, "iniciando servidor");
    tracing::info!("  GET  /malla                 - vista de la malla (semestres, cursos, créditos)");
    tracing::info!("  POST /cursos/{{id}}/aprobado  - alterna aprobado");
    tracing::info!("  POST /cursos/{{id}}/nombre    - body {{\"valor\": \"...\"}}");
    tracing::info!("  POST /cursos/{{id}}/creditos  - body {{\"valor\": \"...\"}}");
    tracing::info!("  POST /mover                 - body {{\"curso_id\", \"destino\", \"indice\"}}");
    tracing::info!("  GET  /reporte               - descarga el PDF de progreso");
    tracing::info!("  POST /limpiar               - body {{\"confirmar\": true}}");
    tracing::info!("  GET  /help                  - describe la API");

    run_server(&config.bind, sesion).await
}
