use crate::models::db_operations::countries_db_operations::{self, row_to_optional_country};
use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::payloads::VisaProgramInput;
use crate::models::{VisaProgram, VisaProgramWithCountry};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const COLUMNS: &str = "id, slug, title_tr, title_en, excerpt_tr, excerpt_en, content_tr, content_en, visa_type, country_id, featured, sort_order, created_at, updated_at";

pub(crate) const JOIN_COLUMNS: &str = "p.id, p.slug, p.title_tr, p.title_en, p.excerpt_tr, p.excerpt_en, p.content_tr, p.content_en, p.visa_type, p.country_id, p.featured, p.sort_order, p.created_at, p.updated_at";

pub(crate) const COLUMN_COUNT: usize = 14;

pub(crate) fn row_to_program(row: &Row, base: usize) -> rusqlite::Result<VisaProgram> {
    Ok(VisaProgram {
        id: row.get(base)?,
        slug: row.get(base + 1)?,
        title_tr: row.get(base + 2)?,
        title_en: row.get(base + 3)?,
        excerpt_tr: row.get(base + 4)?,
        excerpt_en: row.get(base + 5)?,
        content_tr: row.get(base + 6)?,
        content_en: row.get(base + 7)?,
        visa_type: row.get(base + 8)?,
        country_id: row.get(base + 9)?,
        featured: row.get(base + 10)?,
        order: row.get(base + 11)?,
        created_at: row.get(base + 12)?,
        updated_at: row.get(base + 13)?,
    })
}

pub(crate) fn row_to_optional_program(row: &Row, base: usize) -> rusqlite::Result<Option<VisaProgram>> {
    let id: Option<String> = row.get(base)?;
    match id {
        Some(_) => row_to_program(row, base).map(Some),
        None => Ok(None),
    }
}

fn joined_select(filter: &str, order: &str) -> String {
    format!(
        "SELECT {}, {} FROM visa_programs p LEFT JOIN countries c ON c.id = p.country_id {} {}",
        JOIN_COLUMNS,
        countries_db_operations::JOIN_COLUMNS,
        filter,
        order
    )
}

fn row_to_joined(row: &Row) -> rusqlite::Result<VisaProgramWithCountry> {
    Ok(VisaProgramWithCountry {
        program: row_to_program(row, 0)?,
        country: row_to_optional_country(row, COLUMN_COUNT)?,
        application_count: None,
    })
}

fn check_country(conn: &Connection, input: &VisaProgramInput) -> Result<(), DbError> {
    if let Some(country_id) = input.country_id.as_deref() {
        if !countries_db_operations::country_exists(conn, country_id)? {
            return Err(DbError::MissingReference(format!("country {}", country_id)));
        }
    }
    Ok(())
}

pub fn create_program(conn: &Connection, input: &VisaProgramInput) -> Result<VisaProgram, DbError> {
    check_country(conn, input)?;
    let id = new_id();
    conn.execute(
        &format!(
            "INSERT INTO visa_programs ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
            COLUMNS
        ),
        params![
            id,
            input.slug,
            input.title_tr,
            input.title_en,
            input.excerpt_tr,
            input.excerpt_en,
            input.content_tr,
            input.content_en,
            input.visa_type,
            input.country_id,
            input.featured,
            input.order,
            now(),
        ],
    )
    .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    read_program_by_id(conn, &id)
}

pub fn read_program_by_id(conn: &Connection, id: &str) -> Result<VisaProgram, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM visa_programs WHERE id = ?1", COLUMNS),
        [id],
        |row| row_to_program(row, 0),
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("visa program {}", id)))
}

pub fn read_program_by_slug(conn: &Connection, slug: &str) -> Result<VisaProgramWithCountry, DbError> {
    conn.query_row(&joined_select("WHERE p.slug = ?1", ""), [slug], row_to_joined)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("visa program '{}'", slug)))
}

pub fn read_all_programs(conn: &Connection) -> Result<Vec<VisaProgramWithCountry>, DbError> {
    let mut stmt = conn.prepare(&joined_select("", "ORDER BY p.sort_order ASC, p.title_tr ASC"))?;
    let rows = stmt.query_map([], row_to_joined)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Admin listing: programs with their country and how many applications named them.
pub fn read_programs_with_application_counts(conn: &Connection) -> Result<Vec<VisaProgramWithCountry>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {}, {}, (SELECT COUNT(*) FROM applications a WHERE a.program_id = p.id)
         FROM visa_programs p LEFT JOIN countries c ON c.id = p.country_id
         ORDER BY p.sort_order ASC, p.title_tr ASC",
        JOIN_COLUMNS,
        countries_db_operations::JOIN_COLUMNS,
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(VisaProgramWithCountry {
            program: row_to_program(row, 0)?,
            country: row_to_optional_country(row, COLUMN_COUNT)?,
            application_count: Some(row.get(COLUMN_COUNT + countries_db_operations::COLUMN_COUNT)?),
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_featured_programs(conn: &Connection, limit: u32) -> Result<Vec<VisaProgramWithCountry>, DbError> {
    let mut stmt = conn.prepare(&joined_select("WHERE p.featured = 1", "ORDER BY p.sort_order ASC LIMIT ?1"))?;
    let rows = stmt.query_map([limit], row_to_joined)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_programs_by_type(conn: &Connection, visa_type: &str) -> Result<Vec<VisaProgramWithCountry>, DbError> {
    let mut stmt = conn.prepare(&joined_select("WHERE p.visa_type = ?1", "ORDER BY p.sort_order ASC"))?;
    let rows = stmt.query_map([visa_type], row_to_joined)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn read_programs_for_country(conn: &Connection, country_id: &str) -> Result<Vec<VisaProgram>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM visa_programs WHERE country_id = ?1 ORDER BY sort_order ASC",
        COLUMNS
    ))?;
    let rows = stmt.query_map([country_id], |row| row_to_program(row, 0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_program(conn: &Connection, id: &str, input: &VisaProgramInput) -> Result<VisaProgram, DbError> {
    check_country(conn, input)?;
    let affected = conn
        .execute(
            "UPDATE visa_programs SET slug = ?1, title_tr = ?2, title_en = ?3, excerpt_tr = ?4, excerpt_en = ?5,
             content_tr = ?6, content_en = ?7, visa_type = ?8, country_id = ?9, featured = ?10, sort_order = ?11,
             updated_at = ?12 WHERE id = ?13",
            params![
                input.slug,
                input.title_tr,
                input.title_en,
                input.excerpt_tr,
                input.excerpt_en,
                input.content_tr,
                input.content_en,
                input.visa_type,
                input.country_id,
                input.featured,
                input.order,
                now(),
                id,
            ],
        )
        .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    expect_row(affected, "visa program", id)?;
    read_program_by_id(conn, id)
}

pub fn delete_program(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM visa_programs WHERE id = ?1", [id])?;
    expect_row(affected, "visa program", id)
}

pub fn count_programs(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM visa_programs", [], |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::countries_db_operations::{create_country, delete_country};
    use crate::models::db_operations::test_support::{self, blue_card, germany};

    #[test]
    fn program_round_trips_with_its_country() {
        let conn = test_support::conn();
        let country = create_country(&conn, &germany()).unwrap();
        let created = create_program(&conn, &blue_card(Some(country.id.clone()))).unwrap();

        let fetched = read_program_by_slug(&conn, "germany-eu-blue-card").unwrap();
        assert_eq!(fetched.program, created);
        assert_eq!(fetched.country.as_ref().map(|c| c.slug.as_str()), Some("germany"));
    }

    #[test]
    fn unknown_country_reference_is_rejected() {
        let conn = test_support::conn();
        let err = create_program(&conn, &blue_card(Some("nope".into()))).unwrap_err();
        assert!(matches!(err, DbError::MissingReference(_)));
        assert_eq!(count_programs(&conn).unwrap(), 0);
    }

    #[test]
    fn program_without_country_is_allowed() {
        let conn = test_support::conn();
        create_program(&conn, &blue_card(None)).unwrap();
        let all = read_all_programs(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].country.is_none());
    }

    #[test]
    fn deleting_country_detaches_programs() {
        let conn = test_support::conn();
        let country = create_country(&conn, &germany()).unwrap();
        let program = create_program(&conn, &blue_card(Some(country.id.clone()))).unwrap();
        delete_country(&conn, &country.id).unwrap();
        let reread = read_program_by_id(&conn, &program.id).unwrap();
        assert!(reread.country_id.is_none());
    }

    #[test]
    fn listings_follow_display_order_and_type() {
        let conn = test_support::conn();
        for (slug, order, visa_type) in [("b", 2, "work"), ("a", 1, "education"), ("c", 3, "work")] {
            let mut input = blue_card(None);
            input.slug = slug.into();
            input.order = order;
            input.visa_type = visa_type.into();
            create_program(&conn, &input).unwrap();
        }
        let slugs: Vec<_> = read_all_programs(&conn).unwrap().into_iter().map(|p| p.program.slug).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);

        let work: Vec<_> = read_programs_by_type(&conn, "work").unwrap().into_iter().map(|p| p.program.slug).collect();
        assert_eq!(work, vec!["b", "c"]);

        let counted = read_programs_with_application_counts(&conn).unwrap();
        assert!(counted.iter().all(|p| p.application_count == Some(0)));
    }
}
