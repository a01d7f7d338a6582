//! Domain model that mirrors the SQLite schema and gets passed between the
//! store and whatever front end drives it. The intent is that the type stays a
//! light-weight data holder so callers can build rows directly and the
//! persistence layer can hydrate them without conversion glue.

use std::fmt;

use chrono::Local;

/// Roster statuses the rest of the application recognizes. The store itself
/// accepts any string; this list exists for form layers that render a fixed
/// choice of values.
pub const STATUSES: [&str; 4] = ["Active", "Inactive", "Graduated", "Suspended"];

/// Study years offered on enrollment forms. Like [`STATUSES`], the store does
/// not check membership.
pub const YEARS: [i64; 4] = [1, 2, 3, 4];

#[derive(Debug, Clone, PartialEq)]
/// One row of the roster. The `student_id` roster code is what users see and
/// must stay unique; `id` is the storage-assigned key that edit/delete flows
/// bubble back to the persistence layer.
pub struct Student {
    /// Primary key from the database. Zero on a freshly built draft until the
    /// store assigns the real value on insert.
    pub id: i64,
    /// User-facing roster code (e.g. "STU001"). Unique across the table.
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Contact address. Shape checks live in form validation, not here.
    pub email: String,
    /// Course of study shown in listings and matched by search.
    pub course: String,
    /// Study year, conventionally 1 through 4.
    pub year: i64,
    /// Grade point average on the 0.0 to 4.0 scale.
    pub gpa: f64,
    /// Enrollment date in `YYYY-MM-DD` form.
    pub enrollment_date: String,
    /// Free-form status string; see [`STATUSES`] for the recognized values.
    pub status: String,
}

impl Student {
    /// Build a draft record enrolled today with `Active` status. The store
    /// ignores `id` on insert, so leaving it at zero is fine.
    pub fn new(
        student_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        course: &str,
        year: i64,
        gpa: f64,
    ) -> Self {
        Self {
            id: 0,
            student_id: student_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
            year,
            gpa,
            enrollment_date: today(),
            status: "Active".to_string(),
        }
    }

    /// Compose the `First Last` string that listings and delete confirmations
    /// display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Student {
    /// Write the roster code and full name to any formatter so the type plays
    /// nicely with widgets that consume strings implicitly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.student_id, self.full_name())
    }
}

/// Current local date in the `YYYY-MM-DD` form the `enrollment_date` column
/// stores.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
