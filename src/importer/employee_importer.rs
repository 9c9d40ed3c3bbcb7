// ==========================================
// Sistema de Gestión de Asistencias - Importador de empleados
// ==========================================
// Responsabilidad: importar el listado de empleados desde una hoja de
// layout fijo (Código, Nombre, DNI, Puesto, Centro Coste, Subdivisión),
// con datos desde la fila 2
// ==========================================

use crate::domain::employee::{EmployeeImportSummary, NewEmployee};
use crate::domain::sheet::{RawRow, Sheet};
use crate::importer::attendance_importer_trait::SheetReader;
use crate::importer::error::ImportResult;
use crate::importer::sheet_reader::UniversalSheetReader;
use crate::repository::employee_repo::EmployeeRepository;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

// Columnas del listado estándar.
const COL_CODE: usize = 0;
const COL_NAME: usize = 1;
const COL_DNI: usize = 2;
const COL_POSITION: usize = 3;
const COL_COST_CENTER: usize = 4;
const COL_SUBDIVISION: usize = 5;

/// Importador del listado de empleados.
pub struct EmployeeImporter<R>
where
    R: EmployeeRepository,
{
    repo: R,
}

impl<R> EmployeeImporter<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Importa un listado desde archivo (.xlsx/.xls/.csv).
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> ImportResult<EmployeeImportSummary> {
        let sheet = UniversalSheetReader.read(path.as_ref())?;
        self.import_sheet(&sheet)
    }

    /// Importa una hoja ya parseada. La fila 1 es cabecera; las filas con
    /// celda de código vacía se pasan por alto.
    #[instrument(skip(self, sheet), fields(run_id = %Uuid::new_v4(), sheet = %sheet.name))]
    pub fn import_sheet(&self, sheet: &Sheet) -> ImportResult<EmployeeImportSummary> {
        info!(rows = sheet.rows.len(), "Inicio de importación de empleados");

        let mut summary = EmployeeImportSummary::default();

        for (idx, row) in sheet.rows.iter().enumerate().skip(1) {
            let row_number = idx + 1;

            let Some(employee) = build_employee(row) else {
                continue;
            };

            match self.repo.create_employee(&employee) {
                Ok(outcome) if outcome.ok() => summary.created += 1,
                Ok(outcome) => {
                    summary.record_error(format!(
                        "Fila {row_number} ({}): {}",
                        employee.code, outcome.message
                    ));
                }
                Err(e) => {
                    summary.record_error(format!("Fila {row_number}: Error inesperado - {e}"));
                }
            }
        }

        info!(
            created = summary.created,
            errors = summary.errors,
            "Importación de empleados finalizada"
        );
        Ok(summary)
    }
}

/// Arma el registro de alta con los valores por defecto documentados para
/// las celdas opcionales ausentes. Sin código no hay registro.
fn build_employee(row: &RawRow) -> Option<NewEmployee> {
    let text_at = |col: usize| -> Option<String> {
        let value = row.get(col)?.display_trimmed();
        (!value.is_empty()).then_some(value)
    };

    let code = text_at(COL_CODE)?;
    Some(NewEmployee {
        name: text_at(COL_NAME).unwrap_or_else(|| format!("Empleado {code}")),
        dni: text_at(COL_DNI).unwrap_or_else(|| "00000000".to_string()),
        position: text_at(COL_POSITION).unwrap_or_else(|| "Sin Asignar".to_string()),
        cost_center: text_at(COL_COST_CENTER).unwrap_or_else(|| "1".to_string()),
        subdivision: text_at(COL_SUBDIVISION),
        code,
    })
}
