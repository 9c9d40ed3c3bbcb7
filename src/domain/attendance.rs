// ==========================================
// Sistema de Gestión de Asistencias - Entidades de asistencia
// ==========================================
// Responsabilidad: registros candidatos de asistencia, turnos derivados y
// el resumen contable de una corrida de importación
// ==========================================

use serde::Serialize;
use std::collections::BTreeSet;

/// Máximo de mensajes de error retenidos en el resumen.
pub const MAX_ERROR_SAMPLES: usize = 5;

/// Turno derivado de una etiqueta cruda como `"A10 (07:00-15:00)"`.
///
/// Horarios ausentes o no parseables quedan en `"00:00:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftDescriptor {
    pub code: String,
    pub start_time: String,
    pub end_time: String,
}

/// Registro candidato de asistencia, efímero: se construye y consume por fila.
///
/// Invariante: al menos una de las marcas (entrada/salida) está presente;
/// una fila sin marcas se clasifica como omitida y nunca llega a candidato.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceCandidate {
    /// Fecha en formato `YYYY-MM-DD`.
    pub date: String,
    /// Nombre del día en español (Lunes..Domingo).
    pub weekday: String,
    pub employee_code: String,
    pub shift_code: String,
    /// Marca de entrada `HH:MM:SS`, si existe.
    pub clock_in: Option<String>,
    /// Marca de salida `HH:MM:SS`, si existe.
    pub clock_out: Option<String>,
}

/// Resumen de una corrida de importación de asistencias.
///
/// Se acumula monótonamente y se entrega una sola vez al final; no hay
/// rollback de corrida completa (atomicidad solo a nivel de fila).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    /// Registros insertados con éxito.
    pub created: usize,
    /// Filas con fecha y empleado válidos pero sin ninguna marca.
    pub skipped: usize,
    /// Filas descartadas por código de empleado ausente o fecha ilegible.
    pub ignored: usize,
    /// Fallos de persistencia y fallos inesperados por fila.
    pub errors: usize,
    /// Muestra acotada de mensajes de error (máximo 5).
    pub error_samples: Vec<String>,
    /// Códigos de empleado distintos observados durante la corrida.
    pub distinct_employee_codes: BTreeSet<String>,
}

impl ImportSummary {
    /// Registra un error con su mensaje; la muestra se corta en
    /// [`MAX_ERROR_SAMPLES`] pero el contador sigue creciendo.
    pub fn record_error(&mut self, sample: String) {
        self.errors += 1;
        if self.error_samples.len() < MAX_ERROR_SAMPLES {
            self.error_samples.push(sample);
        }
    }

    /// Línea legible sobre los empleados detectados: plural con el conteo si
    /// hubo más de un código, singular con el código si hubo exactamente uno.
    pub fn employees_line(&self) -> String {
        if self.distinct_employee_codes.len() > 1 {
            format!("{} empleados detectados", self.distinct_employee_codes.len())
        } else {
            match self.distinct_employee_codes.iter().next() {
                Some(code) => format!("Empleado: {code}"),
                None => "Empleado: ?".to_string(),
            }
        }
    }
}
