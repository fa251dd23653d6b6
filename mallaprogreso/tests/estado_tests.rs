mod common;

use std::collections::HashSet;

use common::{aprobar, bloqueado, malla_prueba};
use mallaprogreso::algorithm::verificar_desbloqueos;
use mallaprogreso::editor::{actualizar_creditos, actualizar_nombre};
use mallaprogreso::estado::{
    capturar_estado, cargar, guardar, limpiar, Almacen, MemoriaAlmacen, ResultadoCarga, SqliteAlmacen,
    CLAVE_ESTADO,
};

fn aprobados(malla: &mallaprogreso::models::Malla) -> HashSet<String> {
    malla.cursos().filter(|c| c.aprobado).map(|c| c.id.clone()).collect()
}

#[test]
fn test_guardar_y_cargar_reconstruye_el_estado() {
    let mut malla = malla_prueba();
    aprobar(&mut malla, "B", true);
    aprobar(&mut malla, "C", true);
    {
        let electivo = malla.curso_mut("E").unwrap();
        actualizar_nombre(electivo, "Derecho Ambiental");
        actualizar_creditos(electivo, "6");
    }

    let mut almacen = MemoriaAlmacen::new();
    guardar(&malla, &mut almacen).expect("guardar");

    let mut nueva = malla_prueba();
    let resultado = cargar(&mut nueva, &almacen).expect("cargar");
    match resultado {
        ResultadoCarga::Aplicado { aprobados, editables, omitidos, creditos } => {
            assert_eq!(aprobados, 2);
            assert_eq!(editables, 1);
            assert_eq!(omitidos, 0);
            assert_eq!(creditos[0].total, 4 + 3 + 6);
        }
        otro => panic!("se esperaba Aplicado, llegó {:?}", otro),
    }

    assert_eq!(aprobados(&nueva), aprobados(&malla));
    assert_eq!(capturar_estado(&nueva), capturar_estado(&malla));
    let electivo = nueva.curso("E").unwrap();
    assert_eq!(electivo.nombre, "Derecho Ambiental");
    assert_eq!(electivo.creditos, 6);
}

#[test]
fn test_cargar_sin_estado_no_hace_nada() {
    let mut malla = malla_prueba();
    let almacen = MemoriaAlmacen::new();
    let resultado = cargar(&mut malla, &almacen).unwrap();
    assert_eq!(resultado, ResultadoCarga::SinEstado);
    assert_eq!(malla, malla_prueba());
}

#[test]
fn test_estado_corrupto_no_rompe_la_carga() {
    let mut malla = malla_prueba();
    let mut almacen = MemoriaAlmacen::new();
    almacen.set_item(CLAVE_ESTADO, "{ esto no es json").unwrap();

    let resultado = cargar(&mut malla, &almacen).expect("un estado corrupto no es un error");
    assert_eq!(resultado, ResultadoCarga::Corrupto);
    assert_eq!(malla, malla_prueba());
}

#[test]
fn test_ids_desconocidos_se_omiten() {
    let mut malla = malla_prueba();
    let mut almacen = MemoriaAlmacen::new();
    almacen
        .set_item(
            CLAVE_ESTADO,
            r#"{
                "cursosAprobados": ["B", "ZZZ"],
                "cursosEditables": {
                    "B": { "nombre": "No editable", "creditos": "9" },
                    "E": { "nombre": "Nuevo nombre", "creditos": 7 }
                }
            }"#,
        )
        .unwrap();

    match cargar(&mut malla, &almacen).unwrap() {
        ResultadoCarga::Aplicado { aprobados, editables, omitidos, .. } => {
            assert_eq!(aprobados, 1);
            assert_eq!(editables, 1);
            assert_eq!(omitidos, 2);
        }
        otro => panic!("se esperaba Aplicado, llegó {:?}", otro),
    }

    let b = malla.curso("B").unwrap();
    assert_eq!(b.nombre, "Curso B");
    assert_eq!(b.creditos, 4);
    let e = malla.curso("E").unwrap();
    assert_eq!(e.nombre, "Nuevo nombre");
    assert_eq!(e.creditos, 7);
}

#[test]
fn test_cargar_recalcula_desbloqueos() {
    let mut malla = malla_prueba();
    verificar_desbloqueos(&mut malla);
    assert!(bloqueado(&malla, "A"));

    let mut almacen = MemoriaAlmacen::new();
    almacen
        .set_item(CLAVE_ESTADO, r#"{"cursosAprobados": ["B"], "cursosEditables": {}}"#)
        .unwrap();
    cargar(&mut malla, &almacen).unwrap();
    assert!(!bloqueado(&malla, "A"));
}

#[test]
fn test_estado_guardado_no_incluye_derivados() {
    let mut malla = malla_prueba();
    aprobar(&mut malla, "B", true);
    verificar_desbloqueos(&mut malla);

    let mut almacen = MemoriaAlmacen::new();
    guardar(&malla, &mut almacen).unwrap();
    let texto = almacen.get_item(CLAVE_ESTADO).unwrap().expect("estado guardado");
    let valor: serde_json::Value = serde_json::from_str(&texto).unwrap();

    let claves: Vec<&String> = valor.as_object().unwrap().keys().collect();
    assert_eq!(claves.len(), 2);
    assert!(valor.get("cursosAprobados").is_some());
    assert!(valor.get("cursosEditables").is_some());
    assert!(!texto.contains("bloqueado"));
    assert!(!texto.contains("total"));
    assert_eq!(valor["cursosAprobados"], serde_json::json!(["B"]));
    assert_eq!(valor["cursosEditables"]["E"]["creditos"], serde_json::json!("2"));
}

#[test]
fn test_limpiar_borra_la_clave() {
    let mut almacen = MemoriaAlmacen::new();
    guardar(&malla_prueba(), &mut almacen).unwrap();
    assert!(almacen.get_item(CLAVE_ESTADO).unwrap().is_some());

    limpiar(&mut almacen).unwrap();
    assert!(almacen.get_item(CLAVE_ESTADO).unwrap().is_none());
}

#[test]
fn test_sqlite_persiste_entre_aperturas() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut malla = malla_prueba();
    aprobar(&mut malla, "C", true);
    {
        let mut almacen = SqliteAlmacen::abrir_en_directorio(dir.path()).expect("abrir sqlite");
        guardar(&malla, &mut almacen).unwrap();
        // sobrescribir la misma clave no duplica filas
        guardar(&malla, &mut almacen).unwrap();
    }

    let almacen = SqliteAlmacen::abrir_en_directorio(dir.path()).expect("reabrir sqlite");
    let mut nueva = malla_prueba();
    cargar(&mut nueva, &almacen).unwrap();
    assert_eq!(aprobados(&nueva), HashSet::from(["C".to_string()]));
}

#[test]
fn test_sqlite_remove_item() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut almacen = SqliteAlmacen::abrir(dir.path().join("kv.db")).unwrap();
    almacen.set_item("k", "v1").unwrap();
    almacen.set_item("k", "v2").unwrap();
    assert_eq!(almacen.get_item("k").unwrap().as_deref(), Some("v2"));
    almacen.remove_item("k").unwrap();
    assert_eq!(almacen.get_item("k").unwrap(), None);
    // borrar algo inexistente no falla
    almacen.remove_item("k").unwrap();
}

#[test]
fn test_override_con_valores_nulos_no_descarta_el_estado() {
    let mut almacen = MemoriaAlmacen::new();
    almacen
        .set_item(
            CLAVE_ESTADO,
            r#"{"cursosAprobados":["B"],"cursosEditables":{"E":{"nombre":null,"creditos":true}}}"#,
        )
        .unwrap();

    let mut malla = malla_prueba();
    let resultado = cargar(&mut malla, &almacen).unwrap();
    assert!(matches!(resultado, ResultadoCarga::Aplicado { aprobados: 1, editables: 1, .. }));
    assert_eq!(aprobados(&malla), HashSet::from(["B".to_string()]));
    assert!(!bloqueado(&malla, "A"));

    let electivo = malla.curso("E").unwrap();
    assert_eq!(electivo.nombre, "Electivo");
    assert_eq!(electivo.nombre_entrada, "");
    assert_eq!(electivo.creditos, 0);
}
