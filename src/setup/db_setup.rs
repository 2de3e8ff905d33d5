use rusqlite::Connection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Rusqlite error: {0}")]
    Rusqlite(#[from] rusqlite::Error),
    #[error("Database error: {0}")]
    Db(#[from] crate::models::db_operations::DbError),
    #[error("Setup error: {0}")]
    Message(String),
}

/// Per-connection settings. Must run outside a transaction.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn setup_site_db(conn: &mut Connection) -> Result<(), SetupError> {
    configure_connection(conn)?;
    let tx = conn.transaction()?;

    log::info!("Creating 'users' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            role TEXT NOT NULL DEFAULT 'admin' CHECK(role IN ('admin', 'editor')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'countries' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS countries (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            name_tr TEXT NOT NULL,
            name_en TEXT NOT NULL,
            description_tr TEXT NOT NULL DEFAULT '',
            description_en TEXT NOT NULL DEFAULT '',
            content_tr TEXT NOT NULL DEFAULT '',
            content_en TEXT NOT NULL DEFAULT '',
            flag_image TEXT,
            featured INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'visa_programs' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS visa_programs (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title_tr TEXT NOT NULL,
            title_en TEXT NOT NULL,
            excerpt_tr TEXT NOT NULL DEFAULT '',
            excerpt_en TEXT NOT NULL DEFAULT '',
            content_tr TEXT NOT NULL DEFAULT '',
            content_en TEXT NOT NULL DEFAULT '',
            visa_type TEXT NOT NULL,
            country_id TEXT REFERENCES countries(id) ON DELETE SET NULL,
            featured INTEGER NOT NULL DEFAULT 0,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'blog_posts' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS blog_posts (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title_tr TEXT NOT NULL,
            title_en TEXT NOT NULL,
            excerpt_tr TEXT NOT NULL DEFAULT '',
            excerpt_en TEXT NOT NULL DEFAULT '',
            content_tr TEXT NOT NULL DEFAULT '',
            content_en TEXT NOT NULL DEFAULT '',
            author TEXT NOT NULL DEFAULT '',
            category TEXT NOT NULL DEFAULT '',
            published INTEGER NOT NULL DEFAULT 1,
            published_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;
    tx.execute(
        "CREATE INDEX IF NOT EXISTS idx_blog_posts_published ON blog_posts (published, published_at)",
        [],
    )?;

    log::info!("Creating 'faqs' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS faqs (
            id TEXT PRIMARY KEY,
            question_tr TEXT NOT NULL,
            question_en TEXT NOT NULL,
            answer_tr TEXT NOT NULL,
            answer_en TEXT NOT NULL,
            sort_order INTEGER NOT NULL DEFAULT 0,
            published INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'pages' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS pages (
            id TEXT PRIMARY KEY,
            slug TEXT NOT NULL UNIQUE,
            title_tr TEXT NOT NULL,
            title_en TEXT NOT NULL,
            content_tr TEXT NOT NULL DEFAULT '',
            content_en TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'applications' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS applications (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            country_id TEXT REFERENCES countries(id) ON DELETE SET NULL,
            visa_type TEXT NOT NULL,
            program_id TEXT REFERENCES visa_programs(id) ON DELETE SET NULL,
            message TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT 'new'
                CHECK(status IN ('new', 'contacted', 'processing', 'completed')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    log::info!("Creating 'contact_messages' table...");
    tx.execute(
        "CREATE TABLE IF NOT EXISTS contact_messages (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            subject TEXT NOT NULL DEFAULT '',
            message TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'new' CHECK(status IN ('new', 'read', 'replied')),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_setup_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_site_db(&mut conn).unwrap();
        setup_site_db(&mut conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN
                 ('users','countries','visa_programs','blog_posts','faqs','pages','applications','contact_messages')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 8);
    }

    #[test]
    fn storage_rejects_unknown_lead_status() {
        let mut conn = Connection::open_in_memory().unwrap();
        setup_site_db(&mut conn).unwrap();
        let result = conn.execute(
            "INSERT INTO contact_messages (id, name, email, message, status, created_at, updated_at)
             VALUES ('m1', 'Ali', 'ali@example.com', 'Merhaba dünya', 'archived', '2024-01-01', '2024-01-01')",
            [],
        );
        assert!(result.is_err());
    }
}
