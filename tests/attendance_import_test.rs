// ==========================================
// Sistema de Gestión de Asistencias - Tests del importador de asistencias
// ==========================================
// Escenarios de punta a punta sobre hojas construidas en memoria y sobre
// la base SQLite real
// ==========================================


use asistencias::importer::attendance_importer_trait::OperatorPrompt;
use asistencias::importer::AttendanceImporter;
use asistencias::repository::error::RepositoryResult;
use asistencias::repository::{AttendanceRepository, AttendanceRepositoryImpl};
use asistencias::{
    AttendanceCandidate, CellValue, OperationOutcome, OperationStatus, Sheet, ShiftDescriptor,
};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

// ==========================================
// Dobles de prueba
// ==========================================

/// Estado observable del repositorio en memoria.
#[derive(Default)]
struct RepoState {
    known_shifts: RefCell<HashSet<String>>,
    created_shifts: RefCell<Vec<ShiftDescriptor>>,
    attendances: RefCell<Vec<AttendanceCandidate>>,
    create_calls: Cell<usize>,
}

/// Repositorio en memoria con semántica de duplicados por (fecha, empleado),
/// como la clave primaria real. Puede fallar el alta N-ésima a pedido.
struct MemoryRepo {
    state: Rc<RepoState>,
    fail_on_call: Option<usize>,
}

impl MemoryRepo {
    fn new() -> (Self, Rc<RepoState>) {
        let state = Rc::new(RepoState::default());
        (
            Self {
                state: Rc::clone(&state),
                fail_on_call: None,
            },
            state,
        )
    }

    fn failing_on(call: usize) -> (Self, Rc<RepoState>) {
        let (mut repo, state) = Self::new();
        repo.fail_on_call = Some(call);
        (repo, state)
    }
}

impl AttendanceRepository for MemoryRepo {
    fn list_shift_codes(&self) -> RepositoryResult<HashSet<String>> {
        Ok(self.state.known_shifts.borrow().clone())
    }

    fn create_shift(&self, shift: &ShiftDescriptor) -> RepositoryResult<()> {
        self.state.created_shifts.borrow_mut().push(shift.clone());
        Ok(())
    }

    fn create_attendance(
        &self,
        candidate: &AttendanceCandidate,
    ) -> RepositoryResult<OperationOutcome> {
        let call = self.state.create_calls.get() + 1;
        self.state.create_calls.set(call);

        if self.fail_on_call == Some(call) {
            return Ok(OperationOutcome::failure(
                OperationStatus::Error,
                "fallo simulado de base de datos",
            ));
        }

        let duplicate = self.state.attendances.borrow().iter().any(|a| {
            a.date == candidate.date && a.employee_code == candidate.employee_code
        });
        if duplicate {
            return Ok(OperationOutcome::failure(
                OperationStatus::Duplicate,
                "Ya existe una asistencia con la misma fecha para este empleado.",
            ));
        }

        self.state.attendances.borrow_mut().push(candidate.clone());
        Ok(OperationOutcome::success(
            "Asistencia registrada correctamente",
        ))
    }
}

/// Operador de prueba: respuesta fija y conteo de invocaciones.
struct PromptStub {
    response: Option<String>,
    calls: Rc<Cell<usize>>,
}

impl PromptStub {
    fn with_response(response: Option<&str>) -> (Self, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Self {
                response: response.map(str::to_string),
                calls: Rc::clone(&calls),
            },
            calls,
        )
    }
}

impl OperatorPrompt for PromptStub {
    fn resolve_employee_code(&self) -> Option<String> {
        self.calls.set(self.calls.get() + 1);
        self.response.clone()
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|s| text(s)).collect()
}

// ==========================================
// Escenarios sobre hojas en memoria
// ==========================================

#[test]
fn test_kardex_without_header_creates_record_and_shift() {
    asistencias::logging::init_test();

    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "M01 (08:00-17:00)", "08:05", "17:10"]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, prompt_calls) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.ignored, 0);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.employees_line(), "Empleado: E001");
    // El código salió de la cabecera; el operador nunca fue consultado.
    assert_eq!(prompt_calls.get(), 0);

    // El turno referenciado se creó con el rango horario de la etiqueta.
    let shifts = state.created_shifts.borrow();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].code, "M01");
    assert_eq!(shifts[0].start_time, "08:00:00");
    assert_eq!(shifts[0].end_time, "17:00:00");

    let attendances = state.attendances.borrow();
    assert_eq!(attendances.len(), 1);
    assert_eq!(attendances[0].date, "2025-01-06");
    assert_eq!(attendances[0].weekday, "Lunes");
    assert_eq!(attendances[0].clock_in.as_deref(), Some("08:05"));
    assert_eq!(attendances[0].clock_out.as_deref(), Some("17:10"));
}

#[test]
fn test_known_shift_issues_no_creation() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "M01 (08:00-17:00)", "08:05", "17:10"]),
            text_row(&["07/01/2025", "M01 (08:00-17:00)", "08:01", "17:02"]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    state.known_shifts.borrow_mut().insert("M01".to_string());

    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 2);
    // M01 ya era conocido: ninguna alta de turno.
    assert!(state.created_shifts.borrow().is_empty());
}

#[test]
fn test_repeated_shift_created_once_per_run() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "N01 (22:00-06:00)", "22:00", ""]),
            text_row(&["07/01/2025", "N01 (22:00-06:00)", "22:01", ""]),
            text_row(&["08/01/2025", "N01 (22:00-06:00)", "21:58", ""]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 3);
    assert_eq!(state.created_shifts.borrow().len(), 1);
}

#[test]
fn test_row_without_marks_is_skipped() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "M01", "-", ""]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 0);
    assert!(state.attendances.borrow().is_empty());
}

#[test]
fn test_detailed_report_with_header_and_code_column() {
    let sheet = Sheet::new(
        "Resumen Detallado",
        vec![
            text_row(&["Codigo", "Fecha", "Turno", "Ingreso", "Salida"]),
            text_row(&["E001", "06/01/2025", "M01", "08:05", "17:10"]),
            text_row(&["E002", "06/01/2025", "T01", "14:00", "22:00"]),
            text_row(&["E001", "07/01/2025", "M01", "08:00", ""]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, prompt_calls) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 3);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.distinct_employee_codes.len(), 2);
    assert_eq!(summary.employees_line(), "2 empleados detectados");
    assert_eq!(prompt_calls.get(), 0);

    // La fila de cabecera no se procesó como datos.
    assert_eq!(state.attendances.borrow().len(), 3);
}

#[test]
fn test_header_code_applies_to_every_row() {
    // Sin columna de código: el rótulo de la fila 3 gobierna toda la hoja.
    let sheet = Sheet::new(
        "Reporte Individual",
        vec![
            text_row(&["Reporte de Asistencia"]),
            text_row(&[]),
            text_row(&["Código: E045"]),
            text_row(&["Fecha", "Turno", "Ingreso", "Salida"]),
            text_row(&["06/01/2025", "M01", "08:05", "17:10"]),
            text_row(&["07/01/2025", "M01", "08:02", "17:11"]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 2);
    assert_eq!(summary.employees_line(), "Empleado: E045");
    assert!(state
        .attendances
        .borrow()
        .iter()
        .all(|a| a.employee_code == "E045"));
}

#[test]
fn test_unreadable_dates_are_counted_as_ignored() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["sin fecha", "M01", "08:05", "17:10"]),
            text_row(&["06/01/2025", "M01", "08:05", "17:10"]),
            text_row(&[]),
        ],
    );

    let (repo, _state) = MemoryRepo::new();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.ignored, 2);
    assert_eq!(summary.errors, 0);
}

#[test]
fn test_failure_mid_run_does_not_stop_later_rows() {
    // Diez filas de datos; la quinta alta falla. Las cinco siguientes deben
    // procesarse igual.
    let mut rows = vec![text_row(&["Kardex Individual"])];
    for day in 1..=10 {
        rows.push(text_row(&[
            &format!("{day:02}/01/2025"),
            "M01",
            "08:00",
            "17:00",
        ]));
    }
    let sheet = Sheet::new("Kardex", rows);

    let (repo, state) = MemoryRepo::failing_on(5);
    let (prompt, _) = PromptStub::with_response(Some("E010"));
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 9);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.skipped, 0);
    // La quinta fila de datos es la fila 6 de la hoja (la 1 es preámbulo).
    assert!(summary.error_samples[0].starts_with("Fila 6 (E010):"));
    // Las diez filas llegaron al puerto de persistencia.
    assert_eq!(state.create_calls.get(), 10);
}

#[test]
fn test_error_samples_capped_at_five() {
    // Siete duplicados de la misma fecha: siete errores, cinco muestras.
    let mut rows = vec![text_row(&["Código: E001"])];
    for _ in 0..8 {
        rows.push(text_row(&["06/01/2025", "M01", "08:00", "17:00"]));
    }
    let sheet = Sheet::new("Kardex", rows);

    let (repo, _state) = MemoryRepo::new();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.errors, 7);
    assert_eq!(summary.error_samples.len(), 5);
    assert!(summary.error_samples[0].contains("Ya existe"));
}

// ==========================================
// Resolución del código por el operador
// ==========================================

#[test]
fn test_prompt_used_once_when_nothing_detected() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Kardex Individual"]),
            text_row(&["06/01/2025", "M01", "08:05", "17:10"]),
            text_row(&["07/01/2025", "M01", "08:00", "17:00"]),
        ],
    );

    let (repo, _state) = MemoryRepo::new();
    let (prompt, prompt_calls) = PromptStub::with_response(Some("E099"));
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(prompt_calls.get(), 1);
    assert_eq!(summary.created, 2);
    assert_eq!(summary.employees_line(), "Empleado: E099");
}

#[test]
fn test_run_aborts_without_code_and_processes_nothing() {
    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Kardex Individual"]),
            text_row(&["06/01/2025", "M01", "08:05", "17:10"]),
        ],
    );

    let (repo, state) = MemoryRepo::new();
    let (prompt, prompt_calls) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let result = importer.import_sheet(&sheet);

    assert!(result.is_err());
    assert_eq!(prompt_calls.get(), 1);
    assert_eq!(state.create_calls.get(), 0);
}

// ==========================================
// Punta a punta sobre SQLite
// ==========================================

#[test]
fn test_end_to_end_sqlite_creates_shift_and_attendance() {
    let (_file, db_path) = test_helpers::create_test_db();
    test_helpers::seed_employees(&db_path, &["E001"]);

    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "M01 (08:00-17:00)", "08:05", "17:10"]),
        ],
    );

    let repo = AttendanceRepositoryImpl::new(&db_path).unwrap();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.errors, 0);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let (start, end): (String, String) = conn
        .query_row(
            "SELECT hora_entrada, hora_salida FROM turnos WHERE codigo_turno = 'M01'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(start, "08:00:00");
    assert_eq!(end, "17:00:00");

    let (dia, entrada): (String, Option<String>) = conn
        .query_row(
            "SELECT dia, marca_entrada FROM asistencias \
             WHERE fecha = '2025-01-06' AND codigo_empleado = 'E001'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(dia, "Lunes");
    assert_eq!(entrada.as_deref(), Some("08:05"));
}

#[test]
fn test_end_to_end_sqlite_duplicate_counts_as_error() {
    let (_file, db_path) = test_helpers::create_test_db();
    test_helpers::seed_employees(&db_path, &["E001"]);

    let sheet = Sheet::new(
        "Kardex",
        vec![
            text_row(&["Código: E001"]),
            text_row(&["06/01/2025", "M01", "08:05", "17:10"]),
            text_row(&["06/01/2025", "M01", "08:06", "17:11"]),
        ],
    );

    let repo = AttendanceRepositoryImpl::new(&db_path).unwrap();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_sheet(&sheet).unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.errors, 1);
    assert!(summary.error_samples[0].contains("Fila 3 (E001)"));
    assert!(summary.error_samples[0].contains("Ya existe"));
}

#[test]
fn test_end_to_end_csv_file_import() {
    use std::io::Write;

    let (_file, db_path) = test_helpers::create_test_db();
    test_helpers::seed_employees(&db_path, &["E001", "E002"]);

    let mut csv = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(csv, "Codigo,Fecha,Turno,Ingreso,Salida").unwrap();
    writeln!(csv, "E001,06/01/2025,M01 (08:00-17:00),08:05,17:10").unwrap();
    writeln!(csv, "E002,06/01/2025,M01 (08:00-17:00),,17:05").unwrap();
    writeln!(csv, "E001,07/01/2025,M01 (08:00-17:00),-,-").unwrap();

    let repo = AttendanceRepositoryImpl::new(&db_path).unwrap();
    let (prompt, _) = PromptStub::with_response(None);
    let importer = AttendanceImporter::new(repo, Box::new(prompt));
    let summary = importer.import_file(csv.path()).unwrap();

    assert_eq!(summary.created, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 0);
    assert_eq!(summary.distinct_employee_codes.len(), 2);

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM asistencias", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
