// ==========================================
// Sistema de Gestión de Asistencias - Detección de encabezados
// ==========================================
// Responsabilidad: ubicar la fila de cabecera dentro de una ventana acotada
// y mapear roles semánticos a índices de columna; con fallback posicional
// para reportes tipo kardex sin cabecera reconocible
// ==========================================

use crate::domain::sheet::Sheet;

/// Filas iniciales exploradas en busca de la cabecera.
const HEADER_SCAN_ROWS: usize = 20;

// Conjuntos de palabras clave por rol (coincidencia por subcadena,
// insensible a mayúsculas).
const KEYS_DATE: [&str; 2] = ["fecha", "date"];
const KEYS_SHIFT: [&str; 2] = ["turno", "horario"];
const KEYS_CLOCK_IN: [&str; 4] = ["entrada", "ingreso", "inicio", "in"];
const KEYS_CLOCK_OUT: [&str; 4] = ["salida", "fin", "out", "retiro"];
const KEYS_EMPLOYEE_CODE: [&str; 4] = ["codigo", "legajo", "dni", "trabajador"];

/// Mapa de roles semánticos a índices de columna (0-indexados).
///
/// Se construye una vez al inicio de la corrida y no se muta después.
/// `date` es obligatoria para importar; el resto es opcional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: Option<usize>,
    pub shift: Option<usize>,
    pub clock_in: Option<usize>,
    pub clock_out: Option<usize>,
    pub employee_code: Option<usize>,
}

/// Resultado de la detección: mapa de columnas y primera fila de datos
/// (1-indexada, como se reporta al usuario).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    pub columns: ColumnMap,
    pub first_data_row: usize,
}

fn matches_any(cell: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| cell.contains(k))
}

/// Busca la fila de cabecera en las primeras [`HEADER_SCAN_ROWS`] filas.
///
/// Una fila califica si alguna celda coincide con el conjunto "fecha" y
/// alguna otra con "entrada" o "salida"; gana la primera fila que califica,
/// sin puntuación. Dentro de la fila ganadora cada columna se liga al primer
/// rol aún libre que coincida (primer ajuste, sin solapamiento).
///
/// Si ninguna fila califica se asume un kardex sin cabecera: columnas
/// posicionales (fecha=0, turno=1, entrada=2, salida=3) y datos desde la
/// fila 2.
pub fn detect(sheet: &Sheet) -> HeaderSchema {
    for (row_idx, row) in sheet.rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let lowered: Vec<String> = row
            .iter()
            .map(|c| c.display_trimmed().to_lowercase())
            .collect();

        let has_date = lowered.iter().any(|c| matches_any(c, &KEYS_DATE));
        let has_in = lowered.iter().any(|c| matches_any(c, &KEYS_CLOCK_IN));
        let has_out = lowered.iter().any(|c| matches_any(c, &KEYS_CLOCK_OUT));

        if !(has_date && (has_in || has_out)) {
            continue;
        }

        let mut columns = ColumnMap::default();
        for (col_idx, cell) in lowered.iter().enumerate() {
            if columns.date.is_none() && matches_any(cell, &KEYS_DATE) {
                columns.date = Some(col_idx);
            } else if columns.shift.is_none() && matches_any(cell, &KEYS_SHIFT) {
                columns.shift = Some(col_idx);
            } else if columns.clock_in.is_none() && matches_any(cell, &KEYS_CLOCK_IN) {
                columns.clock_in = Some(col_idx);
            } else if columns.clock_out.is_none() && matches_any(cell, &KEYS_CLOCK_OUT) {
                columns.clock_out = Some(col_idx);
            } else if columns.employee_code.is_none() && matches_any(cell, &KEYS_EMPLOYEE_CODE) {
                columns.employee_code = Some(col_idx);
            }
        }

        return HeaderSchema {
            columns,
            first_data_row: row_idx + 2,
        };
    }

    // Fallback posicional de kardex común: A=Fecha, B=Turno, C=Entrada, D=Salida.
    HeaderSchema {
        columns: ColumnMap {
            date: Some(0),
            shift: Some(1),
            clock_in: Some(2),
            clock_out: Some(3),
            employee_code: None,
        },
        first_data_row: 2,
    }
}
