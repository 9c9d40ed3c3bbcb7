// ==========================================
// Sistema de Gestión de Asistencias - Capa de importación
// ==========================================
// Responsabilidad: ingesta de reportes externos (Excel/CSV) hacia
// registros de asistencia y empleados validados
// ==========================================

// Declaración de módulos
pub mod attendance_importer;
pub mod attendance_importer_trait;
pub mod code_extractor;
pub mod coercion;
pub mod employee_importer;
pub mod error;
pub mod header_detector;
pub mod record_builder;
pub mod sheet_reader;
pub mod shift_reconciler;

// Reexportación de tipos centrales
pub use attendance_importer::AttendanceImporter;
pub use employee_importer::EmployeeImporter;
pub use error::{ImportError, ImportResult};
pub use header_detector::{ColumnMap, HeaderSchema};
pub use record_builder::{EmployeeCodeStrategy, RecordBuilder, RowOutcome};
pub use sheet_reader::{CsvSheetReader, ExcelSheetReader, UniversalSheetReader};
pub use shift_reconciler::{ShiftReconciler, DEFAULT_SHIFT_CODE};

// Reexportación de interfaces
pub use attendance_importer_trait::{OperatorPrompt, SheetReader};
