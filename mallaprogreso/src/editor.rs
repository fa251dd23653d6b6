//! Edición en línea de cursos editables (nombre y créditos).
//!
//! Las funciones de este módulo sólo mutan el curso; recalcular créditos y
//! guardar el estado es responsabilidad de `Sesion`.

use crate::models::Curso;

/// Interpreta el prefijo entero de `entrada` de forma permisiva:
/// espacios iniciales, signo opcional y luego dígitos (`" 12abc"` -> 12,
/// `"3.9"` -> 3, `"abc"` -> None). Satura en vez de desbordar.
pub fn parse_int_lenient(entrada: &str) -> Option<i64> {
    let s = entrada.trim_start();
    let (negativo, resto) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digitos: &str = {
        let fin = resto
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(resto.len());
        &resto[..fin]
    };
    if digitos.is_empty() {
        return None;
    }

    let valor = digitos.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negativo { -valor } else { valor })
}

/// Créditos como entero no negativo: todo lo que no sea un entero positivo vale 0.
pub fn coercionar_creditos(entrada: &str) -> u32 {
    match parse_int_lenient(entrada) {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 0,
    }
}

/// Actualiza el nombre mostrado si la entrada no está vacía. La entrada cruda
/// se registra siempre.
pub fn actualizar_nombre(curso: &mut Curso, entrada: &str) {
    if !entrada.trim().is_empty() {
        curso.nombre = entrada.to_string();
    }
    curso.nombre_entrada = entrada.to_string();
}

/// Actualiza los créditos: un entero positivo se guarda tal cual, cualquier
/// otra cosa ("-5", "0", "abc") deja el curso en 0.
pub fn actualizar_creditos(curso: &mut Curso, entrada: &str) {
    let creditos = coercionar_creditos(entrada);
    if creditos == 0 {
        tracing::debug!(curso = %curso.id, entrada, "créditos inválidos, se guarda 0");
    }
    curso.creditos = creditos;
    curso.creditos_entrada = entrada.to_string();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefijo_entero() {
        assert_eq!(parse_int_lenient("12"), Some(12));
        assert_eq!(parse_int_lenient("  7 "), Some(7));
        assert_eq!(parse_int_lenient("3.9"), Some(3));
        assert_eq!(parse_int_lenient("12abc"), Some(12));
        assert_eq!(parse_int_lenient("-5"), Some(-5));
        assert_eq!(parse_int_lenient("+4"), Some(4));
        assert_eq!(parse_int_lenient("abc"), None);
        assert_eq!(parse_int_lenient(""), None);
        assert_eq!(parse_int_lenient("-"), None);
    }

    #[test]
    fn coercion_no_negativa() {
        assert_eq!(coercionar_creditos("4"), 4);
        assert_eq!(coercionar_creditos("0"), 0);
        assert_eq!(coercionar_creditos("-3"), 0);
        assert_eq!(coercionar_creditos("x"), 0);
        assert_eq!(coercionar_creditos("99999999999999999999"), u32::MAX);
    }
}
