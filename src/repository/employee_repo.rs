// ==========================================
// Sistema de Gestión de Asistencias - Puerto de empleados
// ==========================================

use crate::domain::employee::NewEmployee;
use crate::domain::operation::OperationOutcome;
use crate::repository::error::RepositoryResult;

/// Acceso a datos de empleados.
pub trait EmployeeRepository {
    /// Alta de un empleado. Duplicados y violaciones de integridad llegan
    /// como [`OperationOutcome`] fallido, no como `Err`.
    fn create_employee(&self, employee: &NewEmployee) -> RepositoryResult<OperationOutcome>;
}
