mod common;

use common::{malla_prueba, AlmacenCompartido};
use mallaprogreso::estado::{MemoriaAlmacen, CLAVE_ESTADO};
use mallaprogreso::malla::malla_por_defecto;
use mallaprogreso::{MallaError, Sesion};

fn sesion_con(almacen: &AlmacenCompartido) -> Sesion {
    Sesion::iniciar(malla_prueba(), Box::new(almacen.clone())).expect("iniciar sesión")
}

#[test]
fn test_arranque_sin_estado_deja_derivados_consistentes() {
    let sesion = sesion_con(&AlmacenCompartido::default());
    assert!(sesion.malla().curso("A").unwrap().bloqueado);
    assert!(!sesion.malla().curso("B").unwrap().bloqueado);
    let totales: Vec<u32> = sesion.creditos().iter().map(|r| r.total).collect();
    assert_eq!(totales, vec![9, 12]);
}

#[test]
fn test_alternar_desbloquea_y_guarda() {
    let almacen = AlmacenCompartido::default();
    let mut sesion = sesion_con(&almacen);

    assert!(sesion.alternar_aprobado("B").unwrap());
    assert!(!sesion.malla().curso("A").unwrap().bloqueado);
    let guardado = almacen.leer(CLAVE_ESTADO).expect("se guardó el estado");
    assert!(guardado.contains("\"B\""));

    assert!(!sesion.alternar_aprobado("B").unwrap());
    assert!(sesion.malla().curso("A").unwrap().bloqueado);
}

#[test]
fn test_reinicio_recupera_el_progreso() {
    let almacen = AlmacenCompartido::default();
    {
        let mut sesion = sesion_con(&almacen);
        sesion.alternar_aprobado("B").unwrap();
        sesion.alternar_aprobado("C").unwrap();
        sesion.editar_nombre("E", "Derecho Ambiental").unwrap();
        sesion.editar_creditos("E", "6").unwrap();
    }

    let sesion = sesion_con(&almacen);
    let malla = sesion.malla();
    assert!(malla.curso("B").unwrap().aprobado);
    assert!(malla.curso("C").unwrap().aprobado);
    assert!(!malla.curso("D").unwrap().bloqueado);
    assert_eq!(malla.curso("E").unwrap().nombre, "Derecho Ambiental");
    assert_eq!(sesion.creditos()[0].total, 4 + 3 + 6);
}

#[test]
fn test_editar_creditos_recalcula_total() {
    let mut sesion = sesion_con(&AlmacenCompartido::default());
    assert_eq!(sesion.editar_creditos("E", "12").unwrap(), 12);
    assert_eq!(sesion.creditos()[0].total, 19);
    assert_eq!(sesion.editar_creditos("E", "-5").unwrap(), 0);
    assert_eq!(sesion.creditos()[0].total, 7);
    assert_eq!(sesion.vista().semestres[0].cursos[2].creditos_label, "0 créditos");
}

#[test]
fn test_editar_curso_no_editable_o_inexistente() {
    let mut sesion = sesion_con(&AlmacenCompartido::default());
    assert!(matches!(
        sesion.editar_nombre("B", "Otro"),
        Err(MallaError::CursoNoEditable(_))
    ));
    assert!(matches!(
        sesion.editar_creditos("NADA", "4"),
        Err(MallaError::CursoNoEncontrado(_))
    ));
    assert!(matches!(
        sesion.alternar_aprobado("NADA"),
        Err(MallaError::CursoNoEncontrado(_))
    ));
    assert_eq!(sesion.malla().curso("B").unwrap().nombre, "Curso B");
}

#[test]
fn test_limpiar_exige_confirmacion() {
    let almacen = AlmacenCompartido::default();
    let mut sesion = sesion_con(&almacen);
    sesion.alternar_aprobado("B").unwrap();

    let err = sesion.limpiar(false).unwrap_err();
    assert!(matches!(err, MallaError::ConfirmacionRequerida(_)));
    assert!(almacen.leer(CLAVE_ESTADO).is_some());
    assert!(sesion.malla().curso("B").unwrap().aprobado);
}

#[test]
fn test_limpiar_vuelve_a_la_base() {
    let almacen = AlmacenCompartido::default();
    let mut sesion = sesion_con(&almacen);
    sesion.alternar_aprobado("B").unwrap();
    sesion.editar_nombre("E", "Cambiado").unwrap();
    sesion.mover(&mallaprogreso::reorden::Movimiento {
        curso_id: "C".to_string(),
        destino: 1,
        indice: None,
    })
    .unwrap();

    sesion.limpiar(true).unwrap();
    assert!(almacen.leer(CLAVE_ESTADO).is_none());

    let mut esperada = malla_prueba();
    mallaprogreso::algorithm::verificar_desbloqueos(&mut esperada);
    assert_eq!(sesion.malla(), &esperada);
}

#[test]
fn test_malla_por_defecto_primer_semestre_excedido() {
    let sesion = Sesion::iniciar(malla_por_defecto().unwrap(), Box::new(MemoriaAlmacen::new())).unwrap();
    let vista = sesion.vista();
    let primero = &vista.semestres[0];
    assert_eq!(primero.actuales, "Créditos actuales: 35");
    assert_eq!(primero.maximos, "Máximo permitido: 32");
    assert!(primero.excedido);
    assert!(!vista.semestres[1].excedido);
}

#[test]
fn test_reporte_desde_la_sesion() {
    let mut sesion = sesion_con(&AlmacenCompartido::default());
    sesion.alternar_aprobado("C").unwrap();
    let reporte = sesion.reporte("01-01-2026");
    assert!(reporte.textos().any(|t| t == "✓ Curso C - 3 créditos"));
    let pdf = sesion.exportar_pdf().unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}
