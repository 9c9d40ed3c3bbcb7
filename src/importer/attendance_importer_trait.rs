// ==========================================
// Sistema de Gestión de Asistencias - Interfaces del importador
// ==========================================
// Responsabilidad: definir las costuras del importador con el exterior
// (lectura de archivos y operador humano); sin implementación
// ==========================================

use crate::domain::sheet::Sheet;
use crate::importer::error::ImportResult;
use std::path::Path;

/// Lectura de un archivo tabular hacia el modelo neutral de hoja.
///
/// Implementadores: lectores Excel y CSV en
/// [`crate::importer::sheet_reader`].
pub trait SheetReader {
    /// Parsea el archivo a una [`Sheet`] de celdas tipadas.
    ///
    /// Falla solo por errores fatales previos a la corrida: archivo
    /// inexistente, formato no soportado, libro sin hojas.
    fn read(&self, path: &Path) -> ImportResult<Sheet>;
}

/// Interacción con el operador cuando la hoja no permite deducir el código
/// de empleado. Se invoca a lo sumo una vez por corrida.
pub trait OperatorPrompt {
    /// Pide al operador el código único del archivo; `None` si no lo provee
    /// (la corrida aborta sin procesar filas).
    fn resolve_employee_code(&self) -> Option<String>;
}
