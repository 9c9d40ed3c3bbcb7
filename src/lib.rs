// ==========================================
// Sistema de Gestión de Asistencias - Biblioteca principal
// ==========================================
// Stack: Rust + SQLite
// Núcleo: motor de importación de reportes de asistencia (Excel/CSV)
// ==========================================

// ==========================================
// Declaración de módulos
// ==========================================

// Capa de dominio - entidades y tipos
pub mod domain;

// Capa de repositorios - acceso a datos
pub mod repository;

// Capa de importación - ingesta de reportes externos
pub mod importer;

// Capa de configuración
pub mod config;

// Infraestructura de base de datos (inicialización de conexión / PRAGMA)
pub mod db;

// Sistema de logging
pub mod logging;

// ==========================================
// Reexportación de tipos centrales
// ==========================================

// Dominio
pub use domain::attendance::{AttendanceCandidate, ImportSummary, ShiftDescriptor};
pub use domain::employee::{EmployeeImportSummary, NewEmployee};
pub use domain::operation::{OperationOutcome, OperationStatus};
pub use domain::sheet::{CellValue, RawRow, Sheet};

// Importador
pub use importer::attendance_importer::AttendanceImporter;
pub use importer::attendance_importer_trait::{OperatorPrompt, SheetReader};
pub use importer::employee_importer::EmployeeImporter;
pub use importer::error::{ImportError, ImportResult};
pub use importer::sheet_reader::{CsvSheetReader, ExcelSheetReader, UniversalSheetReader};

// Repositorios
pub use repository::attendance_repo::AttendanceRepository;
pub use repository::attendance_repo_impl::AttendanceRepositoryImpl;
pub use repository::employee_repo::EmployeeRepository;
pub use repository::employee_repo_impl::EmployeeRepositoryImpl;
pub use repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// Constantes del sistema
// ==========================================

// Versión del sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nombre del sistema
pub const APP_NAME: &str = "Sistema de Gestión de Asistencias";
