use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::error::MallaError;
use crate::reorden::{Movimiento, Reordenador};
use crate::reporte::NOMBRE_ARCHIVO;
use crate::sesion::{Sesion, MENSAJE_CONFIRMACION};

/// Estado compartido por los handlers: una sola sesión, un solo mutador a la vez.
pub struct AppState {
    sesion: Mutex<Sesion>,
    reordenador: Reordenador,
}

impl AppState {
    pub fn new(sesion: Sesion) -> Self {
        Self::with_reordenador(sesion, Reordenador::default())
    }

    pub fn with_reordenador(sesion: Sesion, reordenador: Reordenador) -> Self {
        AppState { sesion: Mutex::new(sesion), reordenador }
    }

    /// Toma la sesión; si un handler anterior entró en pánico se sigue con el
    /// último estado escrito.
    pub fn bloquear(&self) -> MutexGuard<'_, Sesion> {
        match self.sesion.lock() {
            Ok(g) => g,
            Err(envenenado) => envenenado.into_inner(),
        }
    }
}

#[derive(Deserialize)]
struct ValorRequest {
    #[serde(default, deserialize_with = "crate::models::texto_o_numero")]
    valor: String,
}

#[derive(Deserialize)]
struct LimpiarRequest {
    #[serde(default)]
    confirmar: bool,
}

fn respuesta_error(e: &MallaError) -> HttpResponse {
    let cuerpo = json!({"error": e.to_string()});
    match e {
        MallaError::CursoNoEncontrado(_) | MallaError::SemestreNoEncontrado(_) => {
            HttpResponse::NotFound().json(cuerpo)
        }
        MallaError::CursoNoEditable(_) | MallaError::CursoDuplicado(_) => {
            HttpResponse::BadRequest().json(cuerpo)
        }
        MallaError::ConfirmacionRequerida(mensaje) => {
            HttpResponse::BadRequest().json(json!({"error": e.to_string(), "confirmacion": mensaje}))
        }
        _ => {
            tracing::error!(error = %e, "error interno");
            HttpResponse::InternalServerError().json(cuerpo)
        }
    }
}

/// GET /malla
async fn malla_handler(data: web::Data<AppState>) -> impl Responder {
    let vista = data.bloquear().vista();
    HttpResponse::Ok().json(vista)
}

/// POST /cursos/{id}/aprobado
/// Alterna el curso y devuelve la malla ya recalculada.
async fn aprobado_handler(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let mut sesion = data.bloquear();
    match sesion.alternar_aprobado(&id) {
        Ok(aprobado) => HttpResponse::Ok().json(json!({"id": id, "aprobado": aprobado, "malla": sesion.vista()})),
        Err(e) => respuesta_error(&e),
    }
}

/// POST /cursos/{id}/nombre  body: {"valor": "..."}
async fn nombre_handler(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ValorRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let mut sesion = data.bloquear();
    match sesion.editar_nombre(&id, &body.valor) {
        Ok(()) => HttpResponse::Ok().json(sesion.vista()),
        Err(e) => respuesta_error(&e),
    }
}

/// POST /cursos/{id}/creditos  body: {"valor": "..."}
async fn creditos_handler(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ValorRequest>,
) -> impl Responder {
    let id = path.into_inner();
    let mut sesion = data.bloquear();
    match sesion.editar_creditos(&id, &body.valor) {
        Ok(creditos) => HttpResponse::Ok().json(json!({"id": id, "creditos": creditos, "malla": sesion.vista()})),
        Err(e) => respuesta_error(&e),
    }
}

/// POST /mover  body: {"curso_id": "...", "destino": 1, "indice": 0}
/// El movimiento se aplica de inmediato; créditos y guardado se difieren.
async fn mover_handler(data: web::Data<AppState>, body: web::Json<Movimiento>) -> impl Responder {
    let mov = body.into_inner();
    let vista = {
        let mut sesion = data.bloquear();
        if let Err(e) = sesion.mover(&mov) {
            return respuesta_error(&e);
        }
        sesion.vista()
    };

    let pendiente = data.clone();
    data.reordenador.programar(move || {
        if let Err(e) = pendiente.bloquear().finalizar_reorden() {
            tracing::error!(error = %e, "no se pudo guardar tras reordenar");
        }
    });

    HttpResponse::Ok().json(vista)
}

/// GET /reporte
async fn reporte_handler(data: web::Data<AppState>) -> impl Responder {
    let resultado = data.bloquear().exportar_pdf();
    match resultado {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", NOMBRE_ARCHIVO),
            ))
            .body(bytes),
        Err(e) => respuesta_error(&e),
    }
}

/// POST /limpiar  body: {"confirmar": true}
async fn limpiar_handler(data: web::Data<AppState>, body: web::Json<LimpiarRequest>) -> impl Responder {
    let mut sesion = data.bloquear();
    match sesion.limpiar(body.confirmar) {
        Ok(()) => HttpResponse::Ok().json(json!({"status": "ok", "malla": sesion.vista()})),
        Err(e) => respuesta_error(&e),
    }
}

async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API de seguimiento de la malla: alternar aprobados, editar cursos editables, reordenar, exportar y borrar el progreso.",
        "endpoints": {
            "GET /malla": "vista completa: semestres, cursos (bloqueado/aprobado), créditos actuales y máximo",
            "POST /cursos/{id}/aprobado": "alterna el estado aprobado del curso",
            "POST /cursos/{id}/nombre": {"valor": "Optativo de Derecho Ambiental"},
            "POST /cursos/{id}/creditos": {"valor": "4"},
            "POST /mover": {"curso_id": "DER105", "destino": 1, "indice": 0},
            "GET /reporte": format!("descarga {}", NOMBRE_ARCHIVO),
            "POST /limpiar": {"confirmar": true}
        },
        "note": MENSAJE_CONFIRMACION
    });
    HttpResponse::Ok().json(help)
}

/// Rutas de la API, separadas para poder montarlas en tests.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.route("/malla", web::get().to(malla_handler))
        .route("/cursos/{id}/aprobado", web::post().to(aprobado_handler))
        .route("/cursos/{id}/nombre", web::post().to(nombre_handler))
        .route("/cursos/{id}/creditos", web::post().to(creditos_handler))
        .route("/mover", web::post().to(mover_handler))
        .route("/reporte", web::get().to(reporte_handler))
        .route("/limpiar", web::post().to(limpiar_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, sesion: Sesion) -> std::io::Result<()> {
    let estado = web::Data::new(AppState::new(sesion));
    HttpServer::new(move || {
        App::new()
            .app_data(estado.clone())
            .wrap(Cors::permissive())
            .configure(configurar)
    })
    .bind(bind_addr)?
    .run()
    .await
}
