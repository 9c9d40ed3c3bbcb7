// ==========================================
// Sistema de Gestión de Asistencias - Configuración
// ==========================================
// Responsabilidad: parámetros de la aplicación persistidos en un archivo
// JSON del directorio de configuración del usuario. Si el archivo falta se
// crea con los valores por defecto; si está corrupto se usan los valores
// por defecto sin abortar.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Nombre del directorio de la aplicación bajo los directorios del sistema.
const APP_DIR: &str = "asistencias";
/// Nombre del archivo de configuración.
const CONFIG_FILE: &str = "config.json";
/// Nombre del archivo de base de datos por defecto.
const DB_FILE: &str = "asistencias.db";

/// Configuración de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ruta del archivo de base de datos SQLite.
    pub db_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        Self {
            db_path: data_dir.join(DB_FILE),
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde la ubicación estándar del sistema,
    /// creando el archivo con los valores por defecto si no existe.
    pub fn load() -> Self {
        let Some(config_dir) = dirs::config_dir() else {
            return Self::default();
        };
        Self::load_from(&config_dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Carga desde una ruta concreta. Un archivo ilegible o malformado
    /// degrada a los valores por defecto; las claves desconocidas se
    /// ignoran.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(config) => return config,
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Configuración malformada, se usan valores por defecto");
                        return Self::default();
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "No se pudo leer la configuración");
                    return Self::default();
                }
            }
        }

        // Primer arranque: dejar el archivo con los valores por defecto
        // para que el operador lo pueda editar.
        let config = Self::default();
        if let Err(e) = config.write_to(path) {
            warn!(path = %path.display(), error = %e, "No se pudo escribir la configuración por defecto");
        }
        config
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)
    }
}
