use crate::setup::db_setup::{self, SetupError};
use crate::DbPool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

fn setup_to_rusqlite_error(e: SetupError) -> rusqlite::Error {
    match e {
        SetupError::Rusqlite(inner) => inner,
        other => rusqlite::Error::ToSqlConversionFailure(Box::new(other)),
    }
}

/// Opens the site database. Every pooled connection enforces foreign keys.
pub fn build_pool(db_path: &Path) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| db_setup::configure_connection(conn));
    r2d2::Pool::builder().build(manager)
}

/// An in-memory database with the full schema behind a single-connection
/// pool. The connection never expires, so the data lives as long as the pool.
pub fn build_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| db_setup::setup_site_db(conn).map_err(setup_to_rusqlite_error));
    r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)
}
