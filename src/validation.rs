//! Form-level checks applied before a record reaches the store. The store
//! only enforces roster-code uniqueness, so front ends call
//! [`validate_student`] to reject bad input before attempting a write.

use thiserror::Error;

use crate::models::{Student, STATUSES, YEARS};

/// Reasons an enrollment form should refuse to save.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required text field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address does not look like `local@domain.tld`.
    #[error("email address {0:?} looks malformed")]
    InvalidEmail(String),

    /// GPA outside the 0.0 to 4.0 scale.
    #[error("GPA {0} must be between 0.0 and 4.0")]
    GpaOutOfRange(f64),

    /// Study year outside 1 through 4.
    #[error("year {0} must be between 1 and 4")]
    YearOutOfRange(i64),

    /// Status not among the recognized roster values.
    #[error("unrecognized status {0:?}")]
    UnknownStatus(String),
}

/// Check every field the enrollment form collects, reporting the first
/// problem in the order the fields appear on the form. Passing this makes a
/// record safe to hand to the store, short of a roster-code collision the
/// database itself rejects.
pub fn validate_student(student: &Student) -> Result<(), ValidationError> {
    required(&student.student_id, "student id")?;
    required(&student.first_name, "first name")?;
    required(&student.last_name, "last name")?;
    required(&student.email, "email")?;
    required(&student.course, "course")?;

    if !is_basic_email(&student.email) {
        return Err(ValidationError::InvalidEmail(student.email.clone()));
    }
    if !YEARS.contains(&student.year) {
        return Err(ValidationError::YearOutOfRange(student.year));
    }
    if !(0.0..=4.0).contains(&student.gpa) {
        return Err(ValidationError::GpaOutOfRange(student.gpa));
    }
    if !STATUSES.contains(&student.status.as_str()) {
        return Err(ValidationError::UnknownStatus(student.status.clone()));
    }

    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Loose shape check: exactly one `@`, text on both sides, and a dot
/// somewhere inside the domain. The form only guards against obvious typos.
fn is_basic_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_student() -> Student {
        Student::new(
            "STU010",
            "Grace",
            "Hopper",
            "grace.hopper@university.edu",
            "Computer Science",
            3,
            3.8,
        )
    }

    #[test]
    fn accepts_a_well_formed_record() {
        assert_eq!(validate_student(&valid_student()), Ok(()));
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut student = valid_student();
        student.first_name = "   ".to_string();
        assert_eq!(
            validate_student(&student),
            Err(ValidationError::MissingField("first name"))
        );
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["no-at-sign", "@university.edu", "grace@", "grace@edu", "a b@c.d"] {
            let mut student = valid_student();
            student.email = bad.to_string();
            assert_eq!(
                validate_student(&student),
                Err(ValidationError::InvalidEmail(bad.to_string())),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_gpa_and_year() {
        let mut student = valid_student();
        student.gpa = 4.2;
        assert_eq!(
            validate_student(&student),
            Err(ValidationError::GpaOutOfRange(4.2))
        );

        let mut student = valid_student();
        student.year = 5;
        assert_eq!(
            validate_student(&student),
            Err(ValidationError::YearOutOfRange(5))
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let mut student = valid_student();
        student.status = "Enrolled".to_string();
        assert_eq!(
            validate_student(&student),
            Err(ValidationError::UnknownStatus("Enrolled".to_string()))
        );
    }
}
