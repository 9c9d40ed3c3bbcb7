// ==========================================
// Sistema de Gestión de Asistencias - Repositorio de empleados (SQLite)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::employee::NewEmployee;
use crate::domain::operation::{OperationOutcome, OperationStatus};
use crate::repository::employee_repo::EmployeeRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

/// Implementación SQLite del puerto de empleados.
pub struct EmployeeRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepositoryImpl {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl EmployeeRepository for EmployeeRepositoryImpl {
    fn create_employee(&self, employee: &NewEmployee) -> RepositoryResult<OperationOutcome> {
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO empleados \
             (codigo, nombre, dni, puesto, codigo_centro_coste, subdivision) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                employee.code,
                employee.name,
                employee.dni,
                employee.position,
                employee.cost_center,
                employee.subdivision,
            ],
        );

        match result.map_err(RepositoryError::from) {
            Ok(_) => Ok(OperationOutcome::success("Empleado creado correctamente")),
            Err(RepositoryError::UniqueConstraintViolation(_)) => Ok(OperationOutcome::failure(
                OperationStatus::Duplicate,
                format!("Ya existe un empleado con el código {}.", employee.code),
            )),
            Err(RepositoryError::DatabaseQueryError(msg)) => {
                Ok(OperationOutcome::failure(OperationStatus::Error, msg))
            }
            Err(other) => Err(other),
        }
    }
}
