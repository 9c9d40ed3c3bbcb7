// ==========================================
// Sistema de Gestión de Asistencias - Importador de asistencias
// ==========================================
// Responsabilidad: orquestar una corrida de importación completa
// Flujo: detectar esquema -> resolver estrategia de código -> sembrar
//        conciliador de turnos -> procesar filas en orden -> resumen
// ==========================================

use crate::domain::attendance::ImportSummary;
use crate::domain::sheet::Sheet;
use crate::importer::attendance_importer_trait::{OperatorPrompt, SheetReader};
use crate::importer::code_extractor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_detector::{self, HeaderSchema};
use crate::importer::record_builder::{EmployeeCodeStrategy, RecordBuilder, RowOutcome};
use crate::importer::sheet_reader::UniversalSheetReader;
use crate::importer::shift_reconciler::ShiftReconciler;
use crate::repository::attendance_repo::AttendanceRepository;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Importador de reportes de asistencia.
///
/// La corrida es estrictamente secuencial y bloqueante: las filas tardías
/// dependen del estado que el conciliador de turnos acumula con las
/// tempranas. No hay cancelación; iniciada la corrida, termina o aborta
/// entera por un error fatal previo a las filas.
pub struct AttendanceImporter<R>
where
    R: AttendanceRepository,
{
    repo: R,
    prompt: Box<dyn OperatorPrompt>,
}

impl<R> AttendanceImporter<R>
where
    R: AttendanceRepository,
{
    pub fn new(repo: R, prompt: Box<dyn OperatorPrompt>) -> Self {
        Self { repo, prompt }
    }

    /// Importa un reporte desde archivo (.xlsx/.xls/.csv).
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportSummary> {
        let sheet = UniversalSheetReader.read(path.as_ref())?;
        self.import_sheet(&sheet)
    }

    /// Importa una hoja ya parseada.
    #[instrument(skip(self, sheet), fields(run_id = %Uuid::new_v4(), sheet = %sheet.name))]
    pub fn import_sheet(&self, sheet: &Sheet) -> ImportResult<ImportSummary> {
        info!(rows = sheet.rows.len(), "Inicio de importación de asistencias");

        // === Paso 1: detectar la estructura del reporte ===
        let HeaderSchema {
            columns,
            first_data_row,
        } = header_detector::detect(sheet);
        if columns.date.is_none() {
            return Err(ImportError::DateColumnNotFound);
        }
        debug!(?columns, first_data_row, "Esquema de columnas detectado");

        // === Paso 2: estrategia de código de empleado ===
        let strategy = self.resolve_strategy(sheet, &columns)?;
        debug!(?strategy, "Estrategia de código resuelta");

        // === Paso 3: sembrar el conciliador de turnos ===
        // Un fallo aquí no aborta: se parte de caché vacía y cada turno
        // desconocido intentará su alta al aparecer.
        let known_shifts = self.repo.list_shift_codes().unwrap_or_else(|e| {
            warn!(error = %e, "No se pudieron listar los turnos existentes");
            Default::default()
        });
        let mut shifts = ShiftReconciler::new(known_shifts);

        // === Paso 4: procesar filas en orden ===
        let builder = RecordBuilder::new(columns, strategy);
        let mut summary = ImportSummary::default();

        for (idx, row) in sheet.rows.iter().enumerate().skip(first_data_row - 1) {
            let row_number = idx + 1;
            match builder.build(row, &mut shifts, &self.repo) {
                RowOutcome::Ignored { employee_code, .. } => {
                    summary.ignored += 1;
                    if let Some(code) = employee_code {
                        summary.distinct_employee_codes.insert(code);
                    }
                }
                RowOutcome::Skipped { employee_code } => {
                    summary.skipped += 1;
                    summary.distinct_employee_codes.insert(employee_code);
                }
                RowOutcome::Candidate(candidate) => {
                    summary
                        .distinct_employee_codes
                        .insert(candidate.employee_code.clone());

                    // Atomicidad a nivel de fila: cada alta es independiente
                    // y un fallo no revierte lo ya insertado.
                    match self.repo.create_attendance(&candidate) {
                        Ok(outcome) if outcome.ok() => summary.created += 1,
                        Ok(outcome) => {
                            summary.record_error(format!(
                                "Fila {row_number} ({}): {}",
                                candidate.employee_code, outcome.message
                            ));
                        }
                        Err(e) => {
                            summary
                                .record_error(format!("Fila {row_number}: Error inesperado - {e}"));
                        }
                    }
                }
            }
        }

        info!(
            created = summary.created,
            skipped = summary.skipped,
            ignored = summary.ignored,
            errors = summary.errors,
            employees = summary.distinct_employee_codes.len(),
            "Importación finalizada"
        );
        Ok(summary)
    }

    /// Decide cómo se obtiene el código de empleado: columna del reporte,
    /// rótulo en la cabecera de la hoja, o el operador como último recurso.
    fn resolve_strategy(
        &self,
        sheet: &Sheet,
        columns: &header_detector::ColumnMap,
    ) -> ImportResult<EmployeeCodeStrategy> {
        if let Some(col) = columns.employee_code {
            return Ok(EmployeeCodeStrategy::PerRow(col));
        }

        if let Some(code) = code_extractor::extract(sheet) {
            info!(code = %code, "Código de empleado extraído de la cabecera");
            return Ok(EmployeeCodeStrategy::FixedForSheet(code));
        }

        match self.prompt.resolve_employee_code() {
            Some(code) if !code.trim().is_empty() => {
                info!(code = %code, "Código de empleado provisto por el operador");
                Ok(EmployeeCodeStrategy::FixedForSheet(code.trim().to_string()))
            }
            _ => Err(ImportError::EmployeeCodeUnresolved),
        }
    }
}
