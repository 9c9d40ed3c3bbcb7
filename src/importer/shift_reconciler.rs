// ==========================================
// Sistema de Gestión de Asistencias - Conciliación de turnos
// ==========================================
// Responsabilidad: mantener el conjunto de turnos conocidos durante una
// corrida y dar de alta, de forma perezosa, los turnos que el reporte
// referencia y la base aún no tiene.
//
// El conjunto se construye explícitamente al inicio de la corrida y vive
// solo durante ella; la caché se alimenta únicamente con altas exitosas,
// así un alta fallida se reintenta en la próxima aparición del código.
// ==========================================

use crate::domain::attendance::ShiftDescriptor;
use crate::repository::attendance_repo::AttendanceRepository;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Código de turno por defecto cuando el reporte no trae columna de turno.
pub const DEFAULT_SHIFT_CODE: &str = "GEN";

/// Largo máximo de un código de turno.
const SHIFT_CODE_MAX_LEN: usize = 10;

/// Hora por defecto cuando la etiqueta no trae rango horario parseable.
const DEFAULT_TIME: &str = "00:00:00";

/// Conjunto de turnos conocidos de una corrida de importación.
pub struct ShiftReconciler {
    known: HashSet<String>,
}

impl ShiftReconciler {
    /// Construye el conciliador con los códigos ya existentes en la base.
    pub fn new(known: HashSet<String>) -> Self {
        Self { known }
    }

    /// Deriva el código de turno de la etiqueta cruda: primer token separado
    /// por espacios, truncado a 10 caracteres. Sin etiqueta (o etiqueta en
    /// blanco) se usa el código por defecto `GEN`.
    pub fn derive_code(raw_label: Option<&str>) -> String {
        match raw_label.map(str::split_whitespace).and_then(|mut t| t.next()) {
            Some(token) => token.chars().take(SHIFT_CODE_MAX_LEN).collect(),
            None => DEFAULT_SHIFT_CODE.to_string(),
        }
    }

    /// Garantiza que el código exista: no hace nada si ya es conocido; si no,
    /// intenta darlo de alta con el rango horario extraído de la etiqueta.
    ///
    /// El alta es de mejor esfuerzo: un fallo se registra y el código queda
    /// fuera de la caché (la próxima fila con el mismo código reintenta).
    /// La inserción de la asistencia es quien termina reflejando un turno
    /// irresoluble como error contable de la fila.
    pub fn ensure_exists<R: AttendanceRepository>(
        &mut self,
        repo: &R,
        code: &str,
        raw_label: Option<&str>,
    ) {
        if self.known.contains(code) {
            return;
        }

        let (start_time, end_time) = parse_time_range(raw_label);
        let shift = ShiftDescriptor {
            code: code.to_string(),
            start_time,
            end_time,
        };

        match repo.create_shift(&shift) {
            Ok(()) => {
                debug!(code = %shift.code, start = %shift.start_time, end = %shift.end_time, "Turno creado");
                self.known.insert(shift.code);
            }
            Err(e) => {
                warn!(code = %shift.code, error = %e, "No se pudo crear el turno");
            }
        }
    }

    #[cfg(test)]
    fn is_known(&self, code: &str) -> bool {
        self.known.contains(code)
    }
}

/// Extrae un rango `(HH:MM-HH:MM)` de la etiqueta cruda, normalizando a
/// `HH:MM:SS`. Ausencia o fallo de parseo degradan a `00:00:00`.
fn parse_time_range(raw_label: Option<&str>) -> (String, String) {
    let default = || (DEFAULT_TIME.to_string(), DEFAULT_TIME.to_string());

    let Some(raw) = raw_label else {
        return default();
    };
    let Some(inner) = raw
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(inner, _)| inner)
    else {
        return default();
    };
    let Some((start, end)) = inner.split_once('-') else {
        return default();
    };
    (normalize_time(start.trim()), normalize_time(end.trim()))
}

/// `HH:MM` -> `HH:MM:SS`; cualquier otro largo pasa tal cual.
fn normalize_time(value: &str) -> String {
    if value.len() == 5 {
        format!("{value}:00")
    } else {
        value.to_string()
    }
}
