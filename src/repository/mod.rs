// ==========================================
// Sistema de Gestión de Asistencias - Capa de repositorios
// ==========================================
// Responsabilidad: acceso a datos; sin reglas de negocio
// ==========================================

pub mod attendance_repo;
pub mod attendance_repo_impl;
pub mod employee_repo;
pub mod employee_repo_impl;
pub mod error;

pub use attendance_repo::AttendanceRepository;
pub use attendance_repo_impl::AttendanceRepositoryImpl;
pub use employee_repo::EmployeeRepository;
pub use employee_repo_impl::EmployeeRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
