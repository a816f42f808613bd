use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Course, CourseRecord, Program, ProgramRecord};
use crate::storage::{new_id, Storage};

/// Almacenamiento en SQLite. `rusqlite::Connection` no es `Sync`, así que
/// se comparte detrás de un `Mutex`.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteStorage(..)")
    }
}

const PROGRAM_COLUMNS: &str = "id, name, description, total_units";
const COURSE_COLUMNS: &str = "id, program_id, code, title, units, description, prerequisites_json, \
     semester, semester_order, requirement_type, is_choice, choice_description";

impl SqliteStorage {
    /// Abre (o crea) la base en `path`, creando el directorio padre si falta
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SqliteStorage> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "storage SQLite abierto");
        SqliteStorage::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<SqliteStorage> {
        SqliteStorage::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<SqliteStorage> {
        init_schema(&conn)?;
        Ok(SqliteStorage { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Internal("sqlite connection lock poisoned".to_string()))
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS programs (
            id TEXT PRIMARY KEY,
            ts TEXT NOT NULL,
            name TEXT NOT NULL,
            description TEXT,
            total_units INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses (
            id TEXT PRIMARY KEY,
            ts TEXT NOT NULL,
            program_id TEXT NOT NULL REFERENCES programs(id),
            code TEXT NOT NULL,
            title TEXT NOT NULL,
            units INTEGER NOT NULL,
            description TEXT,
            prerequisites_json TEXT,
            semester TEXT NOT NULL,
            semester_order INTEGER NOT NULL,
            requirement_type TEXT NOT NULL,
            is_choice INTEGER NOT NULL DEFAULT 0,
            choice_description TEXT
        )",
        [],
    )?;
    Ok(())
}

fn program_from_row(row: &Row<'_>) -> rusqlite::Result<Program> {
    Ok(Program {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        total_units: row.get(3)?,
    })
}

/// Fila cruda: los prerequisitos quedan como JSON hasta decodificarlos fuera
/// del closure de rusqlite
struct CourseRow {
    course: Course,
    prerequisites_json: Option<String>,
}

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<CourseRow> {
    Ok(CourseRow {
        course: Course {
            id: row.get(0)?,
            program_id: row.get(1)?,
            code: row.get(2)?,
            title: row.get(3)?,
            units: row.get(4)?,
            description: row.get(5)?,
            prerequisites: None,
            semester: row.get(7)?,
            semester_order: row.get(8)?,
            requirement_type: row.get(9)?,
            is_choice: row.get::<_, i64>(10)? != 0,
            choice_description: row.get(11)?,
        },
        prerequisites_json: row.get(6)?,
    })
}

impl CourseRow {
    fn decode(self) -> Result<Course> {
        let mut course = self.course;
        course.prerequisites = match self.prerequisites_json {
            Some(text) => serde_json::from_str::<Option<Vec<String>>>(&text)?,
            None => None,
        };
        Ok(course)
    }
}

impl Storage for SqliteStorage {
    fn get_program(&self, id: &str) -> Result<Option<Program>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM programs WHERE id = ?1", PROGRAM_COLUMNS);
        let program = conn.query_row(&sql, params![id], program_from_row).optional()?;
        Ok(program)
    }

    fn all_programs(&self) -> Result<Vec<Program>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM programs ORDER BY rowid", PROGRAM_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], program_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn create_program(&self, record: ProgramRecord) -> Result<Program> {
        let program = Program::from_record(new_id(), record);
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO programs (id, ts, name, description, total_units) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                program.id,
                Utc::now().to_rfc3339(),
                program.name,
                program.description,
                program.total_units,
            ],
        )?;
        Ok(program)
    }

    fn get_course(&self, id: &str) -> Result<Option<Course>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM courses WHERE id = ?1", COURSE_COLUMNS);
        let row = conn.query_row(&sql, params![id], course_from_row).optional()?;
        row.map(CourseRow::decode).transpose()
    }

    fn courses_by_program(&self, program_id: &str) -> Result<Vec<Course>> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM courses WHERE program_id = ?1 ORDER BY rowid", COURSE_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![program_id], course_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?.decode()?);
        }
        Ok(out)
    }

    fn create_course(&self, record: CourseRecord) -> Result<Course> {
        let course = Course::from_record(new_id(), record);
        let prerequisites_json = match &course.prerequisites {
            Some(list) => Some(serde_json::to_string(list)?),
            None => None,
        };
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO courses (
                id, ts, program_id, code, title, units, description, prerequisites_json,
                semester, semester_order, requirement_type, is_choice, choice_description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                course.id,
                Utc::now().to_rfc3339(),
                course.program_id,
                course.code,
                course.title,
                course.units,
                course.description,
                prerequisites_json,
                course.semester,
                course.semester_order,
                course.requirement_type,
                course.is_choice as i64,
                course.choice_description,
            ],
        )?;
        Ok(course)
    }
}
