// ==========================================
// Sistema de Gestión de Asistencias - Errores del módulo de importación
// ==========================================
// Herramienta: macro derive de thiserror
// ==========================================

use thiserror::Error;

/// Errores fatales de importación.
///
/// Solo los fallos previos a la corrida (archivo, formato, estructura del
/// reporte) llegan al llamador como error; los fallos por fila se recuperan
/// localmente y se contabilizan en el resumen.
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Errores de archivo =====
    #[error("El archivo no existe: {0}")]
    FileNotFound(String),

    #[error("Formato de archivo no soportado: {0} (solo .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Error al leer el archivo: {0}")]
    FileReadError(String),

    #[error("Error al parsear Excel: {0}")]
    ExcelParseError(String),

    #[error("Error al parsear CSV: {0}")]
    CsvParseError(String),

    // ===== Errores de estructura del reporte =====
    #[error("No se encontró la columna 'Fecha' en el archivo")]
    DateColumnNotFound,

    #[error("No se detectó columna 'Código' ni cabecera, y no se obtuvo un código del operador")]
    EmployeeCodeUnresolved,
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Alias de Result para el módulo de importación.
pub type ImportResult<T> = Result<T, ImportError>;
