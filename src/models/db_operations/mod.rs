use chrono::{DateTime, Utc};
use rusqlite::ffi;
use thiserror::Error;
use uuid::Uuid;

pub mod blog_db_operations;
pub mod countries_db_operations;
pub mod faqs_db_operations;
pub mod leads_db_operations;
pub mod pages_db_operations;
pub mod users_db_operations;
pub mod visas_db_operations;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("R2D2 Pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("Item not found in database: {0}")]
    NotFound(String),
    #[error("Value already in use: {0}")]
    Conflict(String),
    #[error("Referenced record does not exist: {0}")]
    MissingReference(String),
    #[error("Value rejected by a constraint: {0}")]
    InvalidValue(String),
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Translates SQLite constraint failures into the domain errors the HTTP
/// layer knows how to report. `what` names the value that was being written.
pub(crate) fn constraint_error(e: rusqlite::Error, what: &str) -> DbError {
    if let rusqlite::Error::SqliteFailure(ref err, _) = e {
        match err.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return DbError::Conflict(what.to_string())
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return DbError::MissingReference(what.to_string()),
            ffi::SQLITE_CONSTRAINT_CHECK => return DbError::InvalidValue(what.to_string()),
            _ => {}
        }
    }
    DbError::Rusqlite(e)
}

/// Maps an UPDATE/DELETE row count of zero to `NotFound`.
pub(crate) fn expect_row(affected: usize, what: &str, id: &str) -> Result<(), DbError> {
    if affected == 0 {
        Err(DbError::NotFound(format!("{} {}", what, id)))
    } else {
        Ok(())
    }
}
