use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::payloads::CountryInput;
use crate::models::{Country, CountryWithPrograms, CountryWithProgramCount};
use crate::models::db_operations::visas_db_operations;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const COLUMNS: &str = "id, slug, name_tr, name_en, description_tr, description_en, content_tr, content_en, flag_image, featured, sort_order, created_at, updated_at";

/// Same columns as `COLUMNS`, qualified with the `c.` alias for joins.
pub(crate) const JOIN_COLUMNS: &str = "c.id, c.slug, c.name_tr, c.name_en, c.description_tr, c.description_en, c.content_tr, c.content_en, c.flag_image, c.featured, c.sort_order, c.created_at, c.updated_at";

pub(crate) const COLUMN_COUNT: usize = 13;

pub(crate) fn row_to_country(row: &Row, base: usize) -> rusqlite::Result<Country> {
    Ok(Country {
        id: row.get(base)?,
        slug: row.get(base + 1)?,
        name_tr: row.get(base + 2)?,
        name_en: row.get(base + 3)?,
        description_tr: row.get(base + 4)?,
        description_en: row.get(base + 5)?,
        content_tr: row.get(base + 6)?,
        content_en: row.get(base + 7)?,
        flag_image: row.get(base + 8)?,
        featured: row.get(base + 9)?,
        order: row.get(base + 10)?,
        created_at: row.get(base + 11)?,
        updated_at: row.get(base + 12)?,
    })
}

/// Reads a LEFT JOINed country, which is entirely NULL when absent.
pub(crate) fn row_to_optional_country(row: &Row, base: usize) -> rusqlite::Result<Option<Country>> {
    let id: Option<String> = row.get(base)?;
    match id {
        Some(_) => row_to_country(row, base).map(Some),
        None => Ok(None),
    }
}

pub fn create_country(conn: &Connection, input: &CountryInput) -> Result<Country, DbError> {
    let id = new_id();
    let created_at = now();
    conn.execute(
        &format!("INSERT INTO countries ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)", COLUMNS),
        params![
            id,
            input.slug,
            input.name_tr,
            input.name_en,
            input.description_tr,
            input.description_en,
            input.content_tr,
            input.content_en,
            input.flag_image,
            input.featured,
            input.order,
            created_at,
        ],
    )
    .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    read_country_by_id(conn, &id)
}

pub fn read_country_by_id(conn: &Connection, id: &str) -> Result<Country, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM countries WHERE id = ?1", COLUMNS),
        [id],
        |row| row_to_country(row, 0),
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("country {}", id)))
}

pub fn read_country_by_slug(conn: &Connection, slug: &str) -> Result<Country, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM countries WHERE slug = ?1", COLUMNS),
        [slug],
        |row| row_to_country(row, 0),
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("country '{}'", slug)))
}

pub fn country_exists(conn: &Connection, id: &str) -> Result<bool, DbError> {
    Ok(conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM countries WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?)
}

/// A country together with its programs in display order.
pub fn read_country_with_programs(conn: &Connection, slug: &str) -> Result<CountryWithPrograms, DbError> {
    let country = read_country_by_slug(conn, slug)?;
    let visa_programs = visas_db_operations::read_programs_for_country(conn, &country.id)?;
    Ok(CountryWithPrograms { country, visa_programs })
}

pub fn read_all_countries(conn: &Connection) -> Result<Vec<Country>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM countries ORDER BY sort_order ASC, name_tr ASC", COLUMNS))?;
    let rows = stmt.query_map([], |row| row_to_country(row, 0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Countries for the application form drop-down, alphabetical by Turkish name.
pub fn read_countries_by_name(conn: &Connection) -> Result<Vec<Country>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM countries ORDER BY name_tr ASC", COLUMNS))?;
    let rows = stmt.query_map([], |row| row_to_country(row, 0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_featured_countries(conn: &Connection, limit: u32) -> Result<Vec<Country>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM countries WHERE featured = 1 ORDER BY sort_order ASC LIMIT ?1",
        COLUMNS
    ))?;
    let rows = stmt.query_map([limit], |row| row_to_country(row, 0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_countries_with_program_counts(conn: &Connection) -> Result<Vec<CountryWithProgramCount>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}, (SELECT COUNT(*) FROM visa_programs p WHERE p.country_id = c.id)
         FROM countries c ORDER BY c.sort_order ASC, c.name_tr ASC",
        JOIN_COLUMNS
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(CountryWithProgramCount {
            country: row_to_country(row, 0)?,
            program_count: row.get(COLUMN_COUNT)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_country(conn: &Connection, id: &str, input: &CountryInput) -> Result<Country, DbError> {
    let affected = conn
        .execute(
            "UPDATE countries SET slug = ?1, name_tr = ?2, name_en = ?3, description_tr = ?4, description_en = ?5,
             content_tr = ?6, content_en = ?7, flag_image = ?8, featured = ?9, sort_order = ?10, updated_at = ?11
             WHERE id = ?12",
            params![
                input.slug,
                input.name_tr,
                input.name_en,
                input.description_tr,
                input.description_en,
                input.content_tr,
                input.content_en,
                input.flag_image,
                input.featured,
                input.order,
                now(),
                id,
            ],
        )
        .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    expect_row(affected, "country", id)?;
    read_country_by_id(conn, id)
}

pub fn delete_country(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM countries WHERE id = ?1", [id])?;
    expect_row(affected, "country", id)
}

pub fn count_countries(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM countries", [], |row| row.get(0))?)
}
