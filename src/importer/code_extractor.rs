// ==========================================
// Sistema de Gestión de Asistencias - Extracción de código en texto libre
// ==========================================
// Responsabilidad: cuando el reporte no trae columna de código, buscar en la
// región de cabecera una celda rotulada ("Código: E045", "Legajo 1234") que
// identifique al único empleado de la hoja.
//
// Las heurísticas se expresan como estrategias ordenadas para mantenerlas
// auditables una por una:
//   1. rótulo exacto -> valor en la celda adyacente derecha
//   2. rótulo como prefijo con ':' -> texto tras el ':'
//   3. rótulo como prefijo sin ':' -> resto de la cadena, conservando
//      las mayúsculas del original
// Gana la primera coincidencia (orden fila, luego columna) y el escaneo se
// detiene de inmediato.
// ==========================================

use crate::domain::sheet::{CellValue, RawRow, Sheet};

/// Filas exploradas de la región de cabecera.
const SCAN_ROWS: usize = 15;
/// Columnas exploradas por fila.
const SCAN_COLS: usize = 10;

/// Rótulos reconocidos (en minúsculas, con o sin ':' final).
const LABEL_KEYWORDS: [&str; 7] = [
    "código",
    "codigo",
    "legajo",
    "trabajador",
    "dni",
    "id",
    "cod.",
];

/// Resto de `original` (recortado) tras el rótulo, comparando sin distinguir
/// mayúsculas. Los rótulos en español conservan su longitud en bytes al bajar
/// a minúsculas; `get` evita cualquier corte fuera de límite de carácter.
fn strip_label_prefix<'a>(original: &'a str, keyword: &str) -> Option<&'a str> {
    let trimmed = original.trim();
    if !trimmed.to_lowercase().starts_with(keyword) {
        return None;
    }
    trimmed.get(keyword.len()..)
}

/// Estrategia 1: la celda es exactamente el rótulo (admite ':' final);
/// el código está en la celda inmediatamente a la derecha.
fn exact_label_adjacent(row: &RawRow, col: usize, lowered: &str) -> Option<String> {
    let clean = lowered.replace(':', "");
    if !LABEL_KEYWORDS.contains(&clean.trim()) {
        return None;
    }
    if col + 1 >= SCAN_COLS {
        return None;
    }
    let value = row.get(col + 1)?.display_trimmed();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Estrategia 2: el rótulo prefija la celda y hay un ':'; el código es el
/// texto tras el primer ':'.
fn prefix_with_colon(original: &str) -> Option<String> {
    LABEL_KEYWORDS.iter().find_map(|keyword| {
        strip_label_prefix(original, keyword)?;
        let (_, after) = original.split_once(':')?;
        let value = after.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Estrategia 3: el rótulo prefija la celda sin ':'; el código es el resto
/// de la cadena original.
fn prefix_bare(original: &str) -> Option<String> {
    if original.contains(':') {
        return None;
    }
    LABEL_KEYWORDS.iter().find_map(|keyword| {
        let remainder = strip_label_prefix(original, keyword)?.trim();
        (!remainder.is_empty()).then(|| remainder.to_string())
    })
}

/// Escanea la región de cabecera y devuelve el código del empleado, si
/// alguna estrategia lo encuentra. Solo se consideran celdas de texto.
pub fn extract(sheet: &Sheet) -> Option<String> {
    for row in sheet.rows.iter().take(SCAN_ROWS) {
        for (col, cell) in row.iter().take(SCAN_COLS).enumerate() {
            let CellValue::Text(original) = cell else {
                continue;
            };
            let lowered = original.to_lowercase();

            if let Some(code) = exact_label_adjacent(row, col, lowered.trim())
                .or_else(|| prefix_with_colon(original))
                .or_else(|| prefix_bare(original))
            {
                return Some(code);
            }
        }
    }
    None
}
