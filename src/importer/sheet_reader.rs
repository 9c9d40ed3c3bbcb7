// ==========================================
// Sistema de Gestión de Asistencias - Lectores de archivo
// ==========================================
// Responsabilidad: cargar .xlsx/.xls/.csv al modelo neutral de hoja
// Excel conserva los tipos nativos (fechas/horas); CSV entrega texto plano
// ==========================================

use crate::domain::sheet::{CellValue, RawRow, Sheet};
use crate::importer::attendance_importer_trait::SheetReader;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

// ==========================================
// Lector Excel
// ==========================================
pub struct ExcelSheetReader;

impl SheetReader for ExcelSheetReader {
    fn read(&self, path: &Path) -> ImportResult<Sheet> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;

        // Se usa la primera hoja (la "hoja activa" del reporte).
        let sheet_names = workbook.sheet_names();
        let Some(sheet_name) = sheet_names.first().cloned() else {
            return Err(ImportError::ExcelParseError(
                "el archivo no tiene hojas".to_string(),
            ));
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect::<RawRow>())
            .collect();

        Ok(Sheet::new(sheet_name, rows))
    }
}

/// Convierte una celda de calamine al modelo neutral.
///
/// Los seriales con formato de fecha llegan como fecha nativa; un serial
/// menor a un día es una celda de solo-hora (así marcan entrada/salida los
/// reportes de reloj).
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if dt.as_f64() < 1.0 => CellValue::Time(naive.time()),
            Some(naive) => CellValue::DateTime(naive),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_cell(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

fn parse_iso_cell(s: &str) -> CellValue {
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return CellValue::DateTime(d.and_hms_opt(0, 0, 0).unwrap_or_default());
    }
    if let Ok(t) = chrono::NaiveTime::parse_from_str(s, "%H:%M:%S") {
        return CellValue::Time(t);
    }
    CellValue::Text(s.to_string())
}

// ==========================================
// Lector CSV
// ==========================================
pub struct CsvSheetReader;

impl SheetReader for CsvSheetReader {
    fn read(&self, path: &Path) -> ImportResult<Sheet> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // las filas pueden variar de largo
            .from_reader(file);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let row: RawRow = record
                .iter()
                .map(|field| {
                    if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect();
            rows.push(row);
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("csv")
            .to_string();
        Ok(Sheet::new(name, rows))
    }
}

// ==========================================
// Lector universal (despacha por extensión)
// ==========================================
pub struct UniversalSheetReader;

impl SheetReader for UniversalSheetReader {
    fn read(&self, path: &Path) -> ImportResult<Sheet> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "xlsx" | "xls" => ExcelSheetReader.read(path),
            "csv" => CsvSheetReader.read(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_csv_reader_basic() {
        let file = csv_file("Fecha,Turno,Ingreso,Salida\n06/01/2025,M01,08:05,17:10\n");
        let sheet = CsvSheetReader.read(file.path()).unwrap();

        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0][0],
            CellValue::Text("Fecha".to_string())
        );
        assert_eq!(
            sheet.rows[1][3],
            CellValue::Text("17:10".to_string())
        );
    }

    #[test]
    fn test_csv_reader_empty_fields_become_empty_cells() {
        let file = csv_file("Fecha,Ingreso,Salida\n06/01/2025,,   \n");
        let sheet = CsvSheetReader.read(file.path()).unwrap();

        assert_eq!(sheet.rows[1][1], CellValue::Empty);
        assert_eq!(sheet.rows[1][2], CellValue::Empty);
    }

    #[test]
    fn test_missing_file() {
        let err = CsvSheetReader
            .read(Path::new("no_existe.csv"))
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = UniversalSheetReader
            .read(Path::new("reporte.pdf"))
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(e) if e == "pdf"));
    }

    #[test]
    fn test_universal_dispatches_csv() {
        let file = csv_file("a,b\n1,2\n");
        let sheet = UniversalSheetReader.read(file.path()).unwrap();
        assert_eq!(sheet.rows.len(), 2);
    }
}
