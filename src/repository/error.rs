// ==========================================
// Sistema de Gestión de Asistencias - Errores de la capa de repositorios
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use thiserror::Error;

/// Errores de acceso a datos.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Error de conexión a la base de datos: {0}")]
    DatabaseConnectionError(String),

    #[error("Error al obtener el candado de la conexión: {0}")]
    LockError(String),

    #[error("Error de consulta a la base de datos: {0}")]
    DatabaseQueryError(String),

    #[error("Violación de unicidad: {0}")]
    UniqueConstraintViolation(String),

    #[error("Violación de clave foránea: {0}")]
    ForeignKeyViolation(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result para la capa de repositorios.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
