use crate::models::db_operations::{expect_row, new_id, now, DbError};
use crate::models::payloads::FaqInput;
use crate::models::Faq;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, question_tr, question_en, answer_tr, answer_en, sort_order, published, created_at, updated_at";

fn row_to_faq(row: &Row) -> rusqlite::Result<Faq> {
    Ok(Faq {
        id: row.get(0)?,
        question_tr: row.get(1)?,
        question_en: row.get(2)?,
        answer_tr: row.get(3)?,
        answer_en: row.get(4)?,
        order: row.get(5)?,
        published: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_faq(conn: &Connection, input: &FaqInput) -> Result<Faq, DbError> {
    let id = new_id();
    conn.execute(
        &format!("INSERT INTO faqs ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)", COLUMNS),
        params![
            id,
            input.question_tr,
            input.question_en,
            input.answer_tr,
            input.answer_en,
            input.order,
            input.published,
            now(),
        ],
    )?;
    read_faq_by_id(conn, &id)
}

pub fn read_faq_by_id(conn: &Connection, id: &str) -> Result<Faq, DbError> {
    conn.query_row(&format!("SELECT {} FROM faqs WHERE id = ?1", COLUMNS), [id], row_to_faq)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("faq {}", id)))
}

pub fn read_published_faqs(conn: &Connection) -> Result<Vec<Faq>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM faqs WHERE published = 1 ORDER BY sort_order ASC",
        COLUMNS
    ))?;
    let rows = stmt.query_map([], row_to_faq)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_all_faqs(conn: &Connection) -> Result<Vec<Faq>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM faqs ORDER BY sort_order ASC", COLUMNS))?;
    let rows = stmt.query_map([], row_to_faq)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_faq(conn: &Connection, id: &str, input: &FaqInput) -> Result<Faq, DbError> {
    let affected = conn.execute(
        "UPDATE faqs SET question_tr = ?1, question_en = ?2, answer_tr = ?3, answer_en = ?4, sort_order = ?5,
         published = ?6, updated_at = ?7 WHERE id = ?8",
        params![
            input.question_tr,
            input.question_en,
            input.answer_tr,
            input.answer_en,
            input.order,
            input.published,
            now(),
            id,
        ],
    )?;
    expect_row(affected, "faq", id)?;
    read_faq_by_id(conn, id)
}

pub fn delete_faq(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM faqs WHERE id = ?1", [id])?;
    expect_row(affected, "faq", id)
}

pub fn count_faqs(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM faqs", [], |row| row.get(0))?)
}
