// ==========================================
// Sistema de Gestión de Asistencias - Capa de dominio
// ==========================================

pub mod attendance;
pub mod employee;
pub mod operation;
pub mod sheet;

pub use attendance::{AttendanceCandidate, ImportSummary, ShiftDescriptor, MAX_ERROR_SAMPLES};
pub use employee::{EmployeeImportSummary, NewEmployee};
pub use operation::{OperationOutcome, OperationStatus};
pub use sheet::{CellValue, RawRow, Sheet};
