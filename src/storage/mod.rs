//! Persistencia de programas y cursos.
//!
//! - `memory`: almacenamiento en memoria (default)
//! - `sqlite`: almacenamiento en un fichero SQLite vía `rusqlite`
//!
//! Ambos asignan ids UUID v4 y devuelven los registros en orden de inserción.

mod memory;
mod sqlite;

pub use memory::MemStorage;
pub use sqlite::SqliteStorage;

use crate::error::Result;
use crate::models::{Course, CourseRecord, Program, ProgramRecord};

pub trait Storage: Send + Sync {
    fn get_program(&self, id: &str) -> Result<Option<Program>>;
    fn all_programs(&self) -> Result<Vec<Program>>;
    fn create_program(&self, record: ProgramRecord) -> Result<Program>;

    fn get_course(&self, id: &str) -> Result<Option<Course>>;
    fn courses_by_program(&self, program_id: &str) -> Result<Vec<Course>>;
    fn create_course(&self, record: CourseRecord) -> Result<Course>;

    fn create_courses(&self, records: Vec<CourseRecord>) -> Result<Vec<Course>> {
        records.into_iter().map(|r| self.create_course(r)).collect()
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
