// ==========================================
// Sistema de Gestión de Asistencias - Puerto de asistencias
// ==========================================
// Responsabilidad: definir el acceso a datos que consume el importador
// (sin lógica de negocio; las reglas viven del lado de la base de datos)
// ==========================================

use crate::domain::attendance::{AttendanceCandidate, ShiftDescriptor};
use crate::domain::operation::OperationOutcome;
use crate::repository::error::RepositoryResult;
use std::collections::HashSet;

/// Acceso a datos de asistencias y turnos.
///
/// Implementado sobre SQLite en [`crate::repository::attendance_repo_impl`];
/// los tests usan dobles en memoria.
pub trait AttendanceRepository {
    /// Códigos de turno existentes. Se consulta una vez al inicio de cada
    /// corrida para sembrar el conciliador de turnos.
    fn list_shift_codes(&self) -> RepositoryResult<HashSet<String>>;

    /// Alta de un turno nuevo. Nunca actualiza ni elimina turnos existentes.
    fn create_shift(&self, shift: &ShiftDescriptor) -> RepositoryResult<()>;

    /// Alta de un registro de asistencia.
    ///
    /// Los fallos esperables (duplicado de fecha+empleado, integridad
    /// referencial) se reportan en el [`OperationOutcome`], no como `Err`:
    /// el importador los cuenta como errores de fila con mensaje. Las horas
    /// extras las calcula la base de datos; aquí nunca se computan.
    fn create_attendance(&self, candidate: &AttendanceCandidate)
        -> RepositoryResult<OperationOutcome>;
}
