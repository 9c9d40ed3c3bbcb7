// ==========================================
// Inicialización del sistema de logging
// ==========================================
// tracing + tracing-subscriber, nivel configurable por entorno
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Inicializa el logging del binario.
///
/// # Variables de entorno
/// - RUST_LOG: filtro de nivel (por defecto: info)
///   Ejemplo: RUST_LOG=debug o RUST_LOG=asistencias=trace
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Inicializa el logging para tests, con salida capturada por el runner.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
