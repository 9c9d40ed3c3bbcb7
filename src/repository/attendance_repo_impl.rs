// ==========================================
// Sistema de Gestión de Asistencias - Repositorio de asistencias (SQLite)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::attendance::{AttendanceCandidate, ShiftDescriptor};
use crate::domain::operation::{OperationOutcome, OperationStatus};
use crate::repository::attendance_repo::AttendanceRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Implementación SQLite del puerto de asistencias.
pub struct AttendanceRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl AttendanceRepositoryImpl {
    /// Abre (o crea) la base en `db_path` con la configuración unificada.
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

impl AttendanceRepository for AttendanceRepositoryImpl {
    fn list_shift_codes(&self) -> RepositoryResult<HashSet<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT codigo_turno FROM turnos")?;
        let codes = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(codes)
    }

    fn create_shift(&self, shift: &ShiftDescriptor) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO turnos (codigo_turno, hora_entrada, hora_salida) VALUES (?1, ?2, ?3)",
            params![shift.code, shift.start_time, shift.end_time],
        )?;
        Ok(())
    }

    fn create_attendance(
        &self,
        candidate: &AttendanceCandidate,
    ) -> RepositoryResult<OperationOutcome> {
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO asistencias \
             (fecha, codigo_empleado, codigo_turno, dia, marca_entrada, marca_salida) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                candidate.date,
                candidate.employee_code,
                candidate.shift_code,
                candidate.weekday,
                candidate.clock_in,
                candidate.clock_out,
            ],
        );

        // Los fallos esperables se traducen a resultado, no a Err: el
        // importador los cuenta fila por fila con su mensaje.
        match result.map_err(RepositoryError::from) {
            Ok(_) => Ok(OperationOutcome::success(
                "Asistencia registrada correctamente",
            )),
            Err(RepositoryError::UniqueConstraintViolation(_)) => {
                Ok(OperationOutcome::failure(
                    OperationStatus::Duplicate,
                    "Ya existe una asistencia con la misma fecha para este empleado.",
                ))
            }
            Err(RepositoryError::ForeignKeyViolation(msg)) => Ok(OperationOutcome::failure(
                OperationStatus::ValidationError,
                format!("Referencia inválida: {msg}"),
            )),
            Err(RepositoryError::DatabaseQueryError(msg)) => {
                Ok(OperationOutcome::failure(OperationStatus::Error, msg))
            }
            Err(other) => Err(other),
        }
    }
}
