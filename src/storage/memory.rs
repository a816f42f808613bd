use std::sync::RwLock;

use crate::error::{Error, Result};
use crate::models::{Course, CourseRecord, Program, ProgramRecord};
use crate::storage::{new_id, Storage};

/// Almacenamiento en memoria. Los `Vec` conservan el orden de inserción,
/// que es el orden del documento de entrada.
#[derive(Debug, Default)]
pub struct MemStorage {
    programs: RwLock<Vec<Program>>,
    courses: RwLock<Vec<Course>>,
}

impl MemStorage {
    pub fn new() -> MemStorage {
        MemStorage::default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Internal("memory storage lock poisoned".to_string())
}

impl Storage for MemStorage {
    fn get_program(&self, id: &str) -> Result<Option<Program>> {
        let programs = self.programs.read().map_err(poisoned)?;
        Ok(programs.iter().find(|p| p.id == id).cloned())
    }

    fn all_programs(&self) -> Result<Vec<Program>> {
        let programs = self.programs.read().map_err(poisoned)?;
        Ok(programs.clone())
    }

    fn create_program(&self, record: ProgramRecord) -> Result<Program> {
        let program = Program::from_record(new_id(), record);
        self.programs.write().map_err(poisoned)?.push(program.clone());
        Ok(program)
    }

    fn get_course(&self, id: &str) -> Result<Option<Course>> {
        let courses = self.courses.read().map_err(poisoned)?;
        Ok(courses.iter().find(|c| c.id == id).cloned())
    }

    fn courses_by_program(&self, program_id: &str) -> Result<Vec<Course>> {
        let courses = self.courses.read().map_err(poisoned)?;
        Ok(courses.iter().filter(|c| c.program_id == program_id).cloned().collect())
    }

    fn create_course(&self, record: CourseRecord) -> Result<Course> {
        let course = Course::from_record(new_id(), record);
        self.courses.write().map_err(poisoned)?.push(course.clone());
        Ok(course)
    }
}
