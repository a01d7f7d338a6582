use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, Error as SqlError, ErrorCode, Row};
use tracing::debug;

use super::connection::{self, StoreError};
use crate::models::Student;

/// Columns selected by every query that hydrates a [`Student`], in the order
/// [`student_from_row`] reads them.
const STUDENT_COLUMNS: &str = "id, student_id, first_name, last_name, email, course, \
                               year, gpa, enrollment_date, status";

/// Handle to the on-disk roster. Construct one at process start and pass it
/// by reference to anything that needs student data.
///
/// The handle owns only the database path. Every operation opens its own
/// connection and releases it before returning, so sequential calls are
/// independent and nothing keeps the file open between them.
pub struct StudentStore {
    db_path: PathBuf,
}

impl StudentStore {
    /// Store backed by the given SQLite file. The file, its parent directory,
    /// and the table itself are created lazily on the first operation.
    pub fn open(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Store backed by the default database file inside the user's home.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self {
            db_path: connection::default_db_path()?,
        })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        connection::connect(&self.db_path)
    }

    /// Insert a new student and return the identifier the database assigned.
    /// The draft's `id` field is ignored; a roster-code collision surfaces as
    /// [`StoreError::DuplicateStudentId`].
    pub fn add(&self, student: &Student) -> Result<i64, StoreError> {
        let conn = self.connect()?;
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
        )
        .map_err(|err| map_duplicate_student_id(err, &student.student_id))?;

        let id = conn.last_insert_rowid();
        debug!(id, student_id = %student.student_id, "added student");
        Ok(id)
    }

    /// Every student on the roster, most recently added first.
    pub fn get_all(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id DESC"
        ))?;

        let students = stmt
            .query_map([], student_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    /// Look up one student by internal identifier, `None` when no row matches.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Student>, StoreError> {
        let conn = self.connect()?;
        let result = conn.query_row(
            &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?1"),
            params![id],
            student_from_row,
        );

        match result {
            Ok(student) => Ok(Some(student)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace every field of the row whose `id` matches `student.id` and
    /// return the number of rows touched. Zero means no such row; that is a
    /// no-op, not an error. Unlike `add`, the roster-code unique index is not
    /// mapped to a typed error here, so a collision surfaces as a raw SQLite
    /// failure.
    pub fn update(&self, student: &Student) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let updated = conn.execute(
            "UPDATE students
             SET student_id = ?1, first_name = ?2, last_name = ?3, email = ?4,
                 course = ?5, year = ?6, gpa = ?7, enrollment_date = ?8, status = ?9
             WHERE id = ?10",
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
                student.id,
            ],
        )?;

        debug!(id = student.id, updated, "updated student");
        Ok(updated)
    }

    /// Remove the student with that internal identifier and return the number
    /// of rows touched. Zero means the row was already gone.
    pub fn delete(&self, id: i64) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let deleted = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;

        debug!(id, deleted, "deleted student");
        Ok(deleted)
    }

    /// Substring search over first name, last name, roster code, and course,
    /// sorted by last name. Matching follows SQLite's `LIKE` semantics, so
    /// ASCII case differences are ignored. An empty query matches every row;
    /// callers wanting "empty input shows the full roster" get that for free.
    pub fn search(&self, query: &str) -> Result<Vec<Student>, StoreError> {
        let conn = self.connect()?;
        let pattern = format!("%{query}%");
        let mut stmt = conn.prepare(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE first_name LIKE ?1
                OR last_name LIKE ?1
                OR student_id LIKE ?1
                OR course LIKE ?1
             ORDER BY last_name"
        ))?;

        let students = stmt
            .query_map([&pattern], student_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(students)
    }

    /// Number of students on the roster.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Arithmetic mean of the GPA column across the whole roster. An empty
    /// roster reports 0.0 because the aggregate has no rows to average, which
    /// is indistinguishable from a genuine zero mean; callers that care should
    /// check [`StudentStore::count`] first.
    pub fn average_gpa(&self) -> Result<f64, StoreError> {
        let conn = self.connect()?;
        let avg: Option<f64> =
            conn.query_row("SELECT AVG(gpa) FROM students", [], |row| row.get(0))?;
        Ok(avg.unwrap_or(0.0))
    }
}

/// Hydrate a [`Student`] from a row selected with [`STUDENT_COLUMNS`].
fn student_from_row(row: &Row<'_>) -> Result<Student, SqlError> {
    Ok(Student {
        id: row.get(0)?,
        student_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        email: row.get(4)?,
        course: row.get(5)?,
        year: row.get(6)?,
        gpa: row.get(7)?,
        enrollment_date: row.get(8)?,
        status: row.get(9)?,
    })
}

/// Coerce the unique-index violation on the roster code into a typed error.
/// Only the insert path routes through this; `update` lets the raw error
/// through.
fn map_duplicate_student_id(err: SqlError, student_id: &str) -> StoreError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        StoreError::DuplicateStudentId(student_id.to_string())
    } else {
        err.into()
    }
}
