// ==========================================
// Sistema de Gestión de Asistencias - Modelo tabular neutral
// ==========================================
// Responsabilidad: representar una hoja ya parseada (filas de celdas
// tipadas) independiente de la librería de origen (calamine/csv)
// ==========================================

use chrono::{NaiveDateTime, NaiveTime};

/// Valor crudo de una celda de hoja de cálculo.
///
/// Los reportes de asistencia traen celdas de tipo inconsistente: la misma
/// columna puede contener texto, seriales numéricos, fechas nativas o vacíos.
/// El motor de coerción decide qué hacer con cada variante.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    /// Celda de solo-hora (los reportes suelen marcar entrada/salida así).
    Time(NaiveTime),
    Empty,
}

impl CellValue {
    /// Representación textual de la celda, usada por la detección de
    /// encabezados y por las columnas de código (que pueden venir numéricas).
    ///
    /// Los números enteros se muestran sin parte decimal ("1001", no "1001.0").
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Time(t) => t.format("%H:%M:%S").to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Representación textual recortada; vacía para celdas sin contenido.
    pub fn display_trimmed(&self) -> String {
        self.display().trim().to_string()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Fila cruda: secuencia ordenada de celdas heterogéneas.
pub type RawRow = Vec<CellValue>;

/// Hoja ya parseada. Las filas conservan el orden del archivo de origen;
/// los números de fila reportados al usuario son 1-indexados.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<RawRow>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Celda en (fila 0-indexada, columna 0-indexada); `Empty` si la fila es
    /// más corta que la columna pedida.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&CellValue::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_number_integral() {
        assert_eq!(CellValue::Number(1001.0).display(), "1001");
        assert_eq!(CellValue::Number(2.5).display(), "2.5");
    }

    #[test]
    fn test_display_datetime() {
        let dt = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap();
        assert_eq!(CellValue::DateTime(dt).display(), "2025-03-14 08:05:00");
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text("   ".to_string()).is_empty());
        assert!(!CellValue::Text("x".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let sheet = Sheet::new("Hoja1", vec![vec![CellValue::Text("a".into())]]);
        assert_eq!(*sheet.cell(0, 5), CellValue::Empty);
        assert_eq!(*sheet.cell(9, 0), CellValue::Empty);
    }
}
