//! SQLite-backed storage for a student roster.
//!
//! The crate exposes a single [`StudentStore`] handle plus the [`Student`]
//! model it reads and writes. A front end constructs the store once at
//! startup and calls its operations; every call opens and releases its own
//! connection, so the handle can be shared by reference for the lifetime of
//! the process without holding the database file open.
pub mod db;
pub mod models;
pub mod validation;

/// The storage handle and its error type, used by `main`-style bootstrap code
/// to initialize the embedded SQLite store.
pub use db::{StoreError, StudentStore};

/// The entity other layers manipulate.
pub use models::Student;

/// Pre-write form checks for front ends; the store never applies these.
pub use validation::{validate_student, ValidationError};
