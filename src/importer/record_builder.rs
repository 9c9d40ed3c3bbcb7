// ==========================================
// Sistema de Gestión de Asistencias - Armado de registros por fila
// ==========================================
// Responsabilidad: combinar el esquema detectado, la coerción de celdas y
// el conciliador de turnos para clasificar cada fila en descartada, omitida
// o candidata a inserción
// ==========================================

use crate::domain::attendance::AttendanceCandidate;
use crate::domain::sheet::{CellValue, RawRow};
use crate::importer::coercion;
use crate::importer::header_detector::ColumnMap;
use crate::importer::shift_reconciler::ShiftReconciler;
use crate::repository::attendance_repo::AttendanceRepository;

/// Estrategia de resolución del código de empleado de una corrida.
/// Exactamente una está activa por corrida; se decide al inicio y no cambia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeCodeStrategy {
    /// El código viene en una columna del propio reporte.
    PerRow(usize),
    /// Toda la hoja pertenece a un único empleado.
    FixedForSheet(String),
}

impl EmployeeCodeStrategy {
    /// Código de empleado de la fila, si lo hay. Con estrategia por columna,
    /// una celda vacía deja la fila sin código.
    fn resolve(&self, row: &RawRow) -> Option<String> {
        match self {
            EmployeeCodeStrategy::PerRow(col) => {
                let value = row.get(*col)?.display_trimmed();
                (!value.is_empty()).then_some(value)
            }
            EmployeeCodeStrategy::FixedForSheet(code) => Some(code.clone()),
        }
    }
}

/// Motivo por el que una fila se descarta sin llegar a validación.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    MissingEmployeeCode,
    MissingDate,
}

/// Clasificación de una fila del reporte.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Fila descartada antes de validar (sin código o sin fecha legible).
    /// El código, si alcanzó a resolverse, cuenta para los empleados
    /// detectados de la corrida.
    Ignored {
        reason: IgnoreReason,
        employee_code: Option<String>,
    },
    /// Fecha, empleado y turno válidos, pero ninguna marca: se omite.
    Skipped { employee_code: String },
    /// Fila completa, lista para el puerto de persistencia.
    Candidate(AttendanceCandidate),
}

/// Armador de registros de una corrida. Inmutable tras su construcción;
/// la única mutación por fila pasa por el conciliador de turnos.
pub struct RecordBuilder {
    columns: ColumnMap,
    strategy: EmployeeCodeStrategy,
}

impl RecordBuilder {
    pub fn new(columns: ColumnMap, strategy: EmployeeCodeStrategy) -> Self {
        Self { columns, strategy }
    }

    fn cell<'a>(&self, row: &'a RawRow, col: Option<usize>) -> &'a CellValue {
        col.and_then(|c| row.get(c)).unwrap_or(&CellValue::Empty)
    }

    /// Clasifica una fila. Criterio de importación: al menos una marca.
    pub fn build<R: AttendanceRepository>(
        &self,
        row: &RawRow,
        shifts: &mut ShiftReconciler,
        repo: &R,
    ) -> RowOutcome {
        // 1. Código de empleado según la estrategia activa.
        let Some(employee_code) = self.strategy.resolve(row) else {
            return RowOutcome::Ignored {
                reason: IgnoreReason::MissingEmployeeCode,
                employee_code: None,
            };
        };

        // 2. Fecha: sin fecha legible la fila se descarta.
        let Some((date, weekday)) = coercion::coerce_date(self.cell(row, self.columns.date))
        else {
            return RowOutcome::Ignored {
                reason: IgnoreReason::MissingDate,
                employee_code: Some(employee_code),
            };
        };

        // 3. Turno: derivar el código y garantizar que exista.
        let shift_cell = self.cell(row, self.columns.shift);
        let raw_label = (!shift_cell.is_empty()).then(|| shift_cell.display());
        let shift_code = ShiftReconciler::derive_code(raw_label.as_deref());
        shifts.ensure_exists(repo, &shift_code, raw_label.as_deref());

        // 4. Marcas de entrada y salida.
        let clock_in = coercion::coerce_time(self.cell(row, self.columns.clock_in));
        let clock_out = coercion::coerce_time(self.cell(row, self.columns.clock_out));

        // Criterio: solo importar si hay al menos una marca.
        if clock_in.is_none() && clock_out.is_none() {
            return RowOutcome::Skipped { employee_code };
        }

        RowOutcome::Candidate(AttendanceCandidate {
            date,
            weekday: weekday.to_string(),
            employee_code,
            shift_code,
            clock_in,
            clock_out,
        })
    }
}
