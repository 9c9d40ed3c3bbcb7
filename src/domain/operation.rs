// ==========================================
// Sistema de Gestión de Asistencias - Resultado de operaciones
// ==========================================
// Responsabilidad: envolver el resultado de cada operación de persistencia
// con un estado normalizado y un mensaje legible
// ==========================================

use serde::{Deserialize, Serialize};

/// Estado normalizado de una operación de base de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Success,
    NotFound,
    Duplicate,
    ValidationError,
    Error,
}

/// Resultado de una operación por registro.
///
/// Los fallos esperables (duplicados, violaciones de integridad) llegan como
/// resultado con `ok() == false`, nunca como error de Rust: el importador los
/// contabiliza fila por fila sin abortar la corrida.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub status: OperationStatus,
    pub message: String,
}

impl OperationOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Success,
            message: message.into(),
        }
    }

    pub fn failure(status: OperationStatus, message: impl Into<String>) -> Self {
        debug_assert!(status != OperationStatus::Success);
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn ok(&self) -> bool {
        self.status == OperationStatus::Success
    }
}
