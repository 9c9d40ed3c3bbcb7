// ==========================================
// Sistema de Gestión de Asistencias - Inicialización de SQLite
// ==========================================
// Objetivo:
// - Unificar los PRAGMA de toda Connection::open (claves foráneas siempre
//   activas, mismo busy_timeout en todos los módulos)
// - Arranque idempotente del esquema
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout por defecto (milisegundos).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Esquema del sistema. Las columnas de horas extras (25%/35%/100%) las
/// completa la base de datos en producción; este código nunca las calcula.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS empleados (
    codigo              TEXT PRIMARY KEY,
    nombre              TEXT NOT NULL,
    dni                 TEXT NOT NULL,
    puesto              TEXT NOT NULL,
    codigo_centro_coste TEXT NOT NULL,
    subdivision         TEXT
);

CREATE TABLE IF NOT EXISTS turnos (
    codigo_turno TEXT PRIMARY KEY,
    hora_entrada TEXT NOT NULL,
    hora_salida  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS asistencias (
    fecha           TEXT NOT NULL,
    codigo_empleado TEXT NOT NULL,
    codigo_turno    TEXT NOT NULL,
    dia             TEXT NOT NULL,
    marca_entrada   TEXT,
    marca_salida    TEXT,
    horas_25        REAL NOT NULL DEFAULT 0,
    horas_35        REAL NOT NULL DEFAULT 0,
    horas_100       REAL NOT NULL DEFAULT 0,
    PRIMARY KEY (fecha, codigo_empleado),
    FOREIGN KEY (codigo_empleado) REFERENCES empleados (codigo),
    FOREIGN KEY (codigo_turno)   REFERENCES turnos (codigo_turno)
);
"#;

/// Aplica los PRAGMA unificados a una conexión.
///
/// foreign_keys y busy_timeout se configuran por conexión, no por base.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre una conexión con la configuración unificada y el esquema asegurado.
/// Crea el directorio del archivo si todavía no existe (primer arranque).
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("no se pudo crear {}: {e}", parent.display())),
                )
            })?;
        }
    }
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Crea las tablas si no existen. Idempotente.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
