// ==========================================
// Sistema de Gestión de Asistencias - Entrada de línea de comandos
// ==========================================
// Importa reportes de asistencia y listados de empleados hacia la base
// SQLite. La interfaz gráfica del sistema queda fuera de este binario.
// ==========================================

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use asistencias::config::AppConfig;
use asistencias::importer::attendance_importer_trait::OperatorPrompt;
use asistencias::importer::{AttendanceImporter, EmployeeImporter};
use asistencias::repository::{AttendanceRepositoryImpl, EmployeeRepositoryImpl};
use asistencias::{EmployeeImportSummary, ImportSummary};

/// Sistema de gestión de asistencias - importación de reportes
#[derive(Parser, Debug)]
#[command(name = "asistencias")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ruta de la base de datos (por defecto, la de la configuración)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Imprimir el resumen como JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Importa un reporte de asistencia (.xlsx/.xls/.csv)
    ImportAttendance {
        /// Archivo del reporte
        file: PathBuf,

        /// Código de empleado a usar si el reporte no permite deducirlo
        /// (evita la pregunta interactiva)
        #[arg(long)]
        employee_code: Option<String>,
    },
    /// Importa un listado de empleados (.xlsx/.xls/.csv)
    ImportEmployees {
        /// Archivo del listado
        file: PathBuf,
    },
}

/// Pregunta interactiva por el código de empleado; con `--employee-code`
/// responde sin tocar la terminal.
struct CliPrompt {
    preset: Option<String>,
}

impl OperatorPrompt for CliPrompt {
    fn resolve_employee_code(&self) -> Option<String> {
        if let Some(code) = &self.preset {
            return Some(code.clone());
        }

        eprint!("No se detectó columna 'Código' ni cabecera. Ingrese el código único para este archivo: ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        let code = line.trim();
        (!code.is_empty()).then(|| code.to_string())
    }
}

fn main() -> Result<()> {
    asistencias::logging::init();

    tracing::info!("{} v{}", asistencias::APP_NAME, asistencias::VERSION);

    let cli = Cli::parse();

    let db_path = cli
        .db
        .unwrap_or_else(|| AppConfig::load().db_path)
        .display()
        .to_string();
    tracing::info!(db = %db_path, "Base de datos");

    match cli.command {
        Command::ImportAttendance {
            file,
            employee_code,
        } => {
            let repo = AttendanceRepositoryImpl::new(&db_path)
                .context("No se pudo abrir la base de datos")?;
            let importer = AttendanceImporter::new(
                repo,
                Box::new(CliPrompt {
                    preset: employee_code,
                }),
            );

            let summary = importer
                .import_file(&file)
                .with_context(|| format!("Error procesando el archivo {}", file.display()))?;
            print_attendance_summary(&summary, cli.json)?;
        }
        Command::ImportEmployees { file } => {
            let repo = EmployeeRepositoryImpl::new(&db_path)
                .context("No se pudo abrir la base de datos")?;
            let importer = EmployeeImporter::new(repo);

            let summary = importer
                .import_file(&file)
                .with_context(|| format!("Error procesando el archivo {}", file.display()))?;
            print_employee_summary(&summary, cli.json)?;
        }
    }

    Ok(())
}

fn print_attendance_summary(summary: &ImportSummary, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("Importación Finalizada");
    println!("{}", summary.employees_line());
    println!();
    println!("Registros creados: {}", summary.created);
    println!("Omitidos (sin marcas): {}", summary.skipped);
    println!("Descartados (sin código/fecha): {}", summary.ignored);
    println!("Errores: {}", summary.errors);
    print_error_samples(&summary.error_samples);
    Ok(())
}

fn print_employee_summary(summary: &EmployeeImportSummary, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("Proceso completado.");
    println!();
    println!("Importados: {}", summary.created);
    println!("Errores: {}", summary.errors);
    print_error_samples(&summary.error_samples);
    Ok(())
}

fn print_error_samples(samples: &[String]) {
    if !samples.is_empty() {
        println!();
        println!("Detalle de errores (primeros {}):", samples.len());
        for sample in samples {
            println!("  {sample}");
        }
    }
}
