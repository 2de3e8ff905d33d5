use crate::models::db_operations::countries_db_operations::{self, row_to_optional_country};
use crate::models::db_operations::visas_db_operations::{self, row_to_optional_program};
use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::{
    Application, ApplicationStatus, ApplicationWithRelations, ContactMessage, MessageStatus,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// A validated application ready to be stored.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country_id: Option<String>,
    pub visa_type: String,
    pub program_id: Option<String>,
    pub message: String,
}

/// A validated contact message ready to be stored.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

const APPLICATION_COLUMNS: &str = "a.id, a.name, a.email, a.phone, a.country_id, a.visa_type, a.program_id, a.message, a.status, a.created_at, a.updated_at";
const APPLICATION_COLUMN_COUNT: usize = 11;

const MESSAGE_COLUMNS: &str = "id, name, email, subject, message, status, created_at, updated_at";

fn row_to_application(row: &Row) -> rusqlite::Result<Application> {
    Ok(Application {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        country_id: row.get(4)?,
        visa_type: row.get(5)?,
        program_id: row.get(6)?,
        message: row.get(7)?,
        status: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn row_to_application_with_relations(row: &Row) -> rusqlite::Result<ApplicationWithRelations> {
    let program_base = APPLICATION_COLUMN_COUNT + countries_db_operations::COLUMN_COUNT;
    Ok(ApplicationWithRelations {
        application: row_to_application(row)?,
        country: row_to_optional_country(row, APPLICATION_COLUMN_COUNT)?,
        program: row_to_optional_program(row, program_base)?,
    })
}

fn row_to_message(row: &Row) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn applications_select(tail: &str) -> String {
    format!(
        "SELECT {}, {}, {} FROM applications a
         LEFT JOIN countries c ON c.id = a.country_id
         LEFT JOIN visa_programs p ON p.id = a.program_id {}",
        APPLICATION_COLUMNS,
        countries_db_operations::JOIN_COLUMNS,
        visas_db_operations::JOIN_COLUMNS,
        tail
    )
}

// ====================================================================
// ========================= APPLICATIONS =============================
// ====================================================================

/// Stores a new lead with status `new`.
pub fn create_application(conn: &Connection, new: &NewApplication) -> Result<Application, DbError> {
    let id = new_id();
    conn.execute(
        "INSERT INTO applications (id, name, email, phone, country_id, visa_type, program_id, message, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
        params![
            id,
            new.name,
            new.email,
            new.phone,
            new.country_id,
            new.visa_type,
            new.program_id,
            new.message,
            ApplicationStatus::New,
            now(),
        ],
    )
    .map_err(|e| constraint_error(e, "application country or program"))?;
    read_application_by_id(conn, &id)
}

pub fn read_application_by_id(conn: &Connection, id: &str) -> Result<Application, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM applications a WHERE a.id = ?1", APPLICATION_COLUMNS),
        [id],
        row_to_application,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("application {}", id)))
}

pub fn read_application_with_relations(conn: &Connection, id: &str) -> Result<ApplicationWithRelations, DbError> {
    conn.query_row(&applications_select("WHERE a.id = ?1"), [id], row_to_application_with_relations)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("application {}", id)))
}

/// Newest first. `limit` of `None` returns every application.
pub fn read_applications(conn: &Connection, limit: Option<u32>) -> Result<Vec<ApplicationWithRelations>, DbError> {
    let mut stmt = conn.prepare(&applications_select("ORDER BY a.created_at DESC LIMIT ?1"))?;
    let limit = limit.map(i64::from).unwrap_or(-1);
    let rows = stmt.query_map([limit], row_to_application_with_relations)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_application_status(
    conn: &Connection,
    id: &str,
    status: ApplicationStatus,
) -> Result<Application, DbError> {
    let affected = conn
        .execute(
            "UPDATE applications SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status, now(), id],
        )
        .map_err(|e| constraint_error(e, status.as_str()))?;
    expect_row(affected, "application", id)?;
    read_application_by_id(conn, id)
}

pub fn delete_application(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM applications WHERE id = ?1", [id])?;
    expect_row(affected, "application", id)
}

pub fn count_applications(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM applications", [], |row| row.get(0))?)
}

// ====================================================================
// ======================= CONTACT MESSAGES ===========================
// ====================================================================

pub fn create_message(conn: &Connection, new: &NewContactMessage) -> Result<ContactMessage, DbError> {
    let id = new_id();
    conn.execute(
        &format!("INSERT INTO contact_messages ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)", MESSAGE_COLUMNS),
        params![id, new.name, new.email, new.subject, new.message, MessageStatus::New, now()],
    )?;
    read_message_by_id(conn, &id)
}

pub fn read_message_by_id(conn: &Connection, id: &str) -> Result<ContactMessage, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM contact_messages WHERE id = ?1", MESSAGE_COLUMNS),
        [id],
        row_to_message,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("contact message {}", id)))
}

/// Newest first. `limit` of `None` returns every message.
pub fn read_messages(conn: &Connection, limit: Option<u32>) -> Result<Vec<ContactMessage>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM contact_messages ORDER BY created_at DESC LIMIT ?1",
        MESSAGE_COLUMNS
    ))?;
    let limit = limit.map(i64::from).unwrap_or(-1);
    let rows = stmt.query_map([limit], row_to_message)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_message_status(conn: &Connection, id: &str, status: MessageStatus) -> Result<ContactMessage, DbError> {
    let affected = conn
        .execute(
            "UPDATE contact_messages SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status, now(), id],
        )
        .map_err(|e| constraint_error(e, status.as_str()))?;
    expect_row(affected, "contact message", id)?;
    read_message_by_id(conn, id)
}

pub fn delete_message(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM contact_messages WHERE id = ?1", [id])?;
    expect_row(affected, "contact message", id)
}

pub fn count_messages(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM contact_messages", [], |row| row.get(0))?)
}
