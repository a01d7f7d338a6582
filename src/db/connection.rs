use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::{params, Connection};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Student;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-roster";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "students.sqlite";

/// Bump this when the table layout changes. The upgrade path is destructive:
/// a version mismatch drops the table and reseeds it, so callers must not
/// expect existing rows to survive.
const SCHEMA_VERSION: i64 = 1;

/// Errors surfaced by the student store. `get_by_id` models a missing row as
/// `Ok(None)` and `update`/`delete` report zero rows affected, so "not found"
/// never appears here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An insert collided with the unique index on the roster code.
    #[error("student id {0} is already enrolled")]
    DuplicateStudentId(String),

    /// Failure reported by the underlying SQLite engine.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The data directory could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No home directory to anchor the default database path.
    #[error("could not locate home directory")]
    HomeDirUnavailable,
}

/// Resolve the absolute path to the SQLite database inside the user's home.
pub(crate) fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::HomeDirUnavailable)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Open a connection to the database file, creating the data directory and
/// the table (with its sample roster) when they do not exist yet. Every store
/// operation calls this and drops the returned connection before returning,
/// so no handle outlives a single call.
pub(crate) fn connect(db_path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the students table if absent and run the destructive version
/// upgrade when the stored schema version does not match ours.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    let version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version != 0 && version != SCHEMA_VERSION {
        warn!(
            from = version,
            to = SCHEMA_VERSION,
            "schema version changed, dropping students table"
        );
        conn.execute("DROP TABLE IF EXISTS students", [])?;
    }

    if !table_exists(conn)? {
        conn.execute(
            "CREATE TABLE students (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                student_id TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                course TEXT NOT NULL,
                year INTEGER NOT NULL,
                gpa REAL NOT NULL,
                enrollment_date TEXT NOT NULL,
                status TEXT DEFAULT 'Active'
            )",
            [],
        )?;
        seed_sample_students(conn)?;
        debug!("created and seeded students table");
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

/// Whether the students table already exists in this database file. Seeding
/// keys off this so reopening a populated store never duplicates the samples.
fn table_exists(conn: &Connection) -> Result<bool, StoreError> {
    let result = conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'students'",
        [],
        |row| row.get::<_, i64>(0),
    );

    match result {
        Ok(_) => Ok(true),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Fixed sample roster inserted exactly once, when the table is first
/// created, so a fresh install has something to show.
fn seed_sample_students(conn: &Connection) -> Result<(), StoreError> {
    let samples = [
        Student::new(
            "STU001",
            "John",
            "Doe",
            "john.doe@university.edu",
            "Computer Science",
            2,
            3.75,
        ),
        Student::new(
            "STU002",
            "Jane",
            "Smith",
            "jane.smith@university.edu",
            "Engineering",
            3,
            3.92,
        ),
        Student::new(
            "STU003",
            "Michael",
            "Johnson",
            "michael.j@university.edu",
            "Business",
            1,
            3.45,
        ),
    ];

    for student in &samples {
        conn.execute(
            "INSERT INTO students (student_id, first_name, last_name, email, course,
                                   year, gpa, enrollment_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                student.student_id,
                student.first_name,
                student.last_name,
                student.email,
                student.course,
                student.year,
                student.gpa,
                student.enrollment_date,
                student.status,
            ],
        )?;
    }

    Ok(())
}
