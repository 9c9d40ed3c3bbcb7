// ==========================================
// Sistema de Gestión de Asistencias - Coerción de celdas
// ==========================================
// Responsabilidad: convertir celdas crudas en fecha/hora normalizadas.
// Ningún fallo de parseo escapa de este módulo: todo degrada a None,
// porque los reportes vienen de humanos y las filas parciales son normales.
// ==========================================

use crate::domain::sheet::CellValue;
use chrono::{Datelike, NaiveDate};

/// Tabla de días de la semana, lunes primero.
const WEEKDAYS: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

/// Formatos de fecha aceptados en celdas de texto, probados en este orden.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

/// Valores centinela que normalizan a "sin marca".
const TIME_SENTINELS: [&str; 4] = ["", "-", "None", "nan"];

/// Convierte una celda en fecha `YYYY-MM-DD` con su nombre de día.
///
/// Acepta fechas nativas directamente; para texto prueba los formatos de
/// [`DATE_FORMATS`] en orden. Devuelve `None` si nada parsea.
pub fn coerce_date(cell: &CellValue) -> Option<(String, &'static str)> {
    let date = match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(s) => parse_date_text(s.trim()),
        _ => None,
    }?;
    Some((date.format("%Y-%m-%d").to_string(), weekday_name(date)))
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Nombre en español del día de la semana.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_monday() as usize]
}

/// Convierte una celda en marca horaria `HH:MM:SS`.
///
/// Vacíos y centinelas (`"-"`, `"None"`, `"nan"`) normalizan a `None`;
/// horas y fechas nativas se formatean; cualquier otro valor no vacío pasa
/// como texto recortado sin validar. La tolerancia es deliberada: el
/// procedimiento de inserción es quien rechaza marcas malformadas.
pub fn coerce_time(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Empty => None,
        CellValue::DateTime(dt) => Some(dt.format("%H:%M:%S").to_string()),
        CellValue::Time(t) => Some(t.format("%H:%M:%S").to_string()),
        other => {
            let text = other.display_trimmed();
            if TIME_SENTINELS.contains(&text.as_str()) {
                None
            } else {
                Some(text)
            }
        }
    }
}
