use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::payloads::PageInput;
use crate::models::Page;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, slug, title_tr, title_en, content_tr, content_en, created_at, updated_at";

fn row_to_page(row: &Row) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        slug: row.get(1)?,
        title_tr: row.get(2)?,
        title_en: row.get(3)?,
        content_tr: row.get(4)?,
        content_en: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub fn create_page(conn: &Connection, input: &PageInput) -> Result<Page, DbError> {
    let id = new_id();
    conn.execute(
        &format!("INSERT INTO pages ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)", COLUMNS),
        params![id, input.slug, input.title_tr, input.title_en, input.content_tr, input.content_en, now()],
    )
    .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    read_page_by_id(conn, &id)
}

pub fn read_page_by_id(conn: &Connection, id: &str) -> Result<Page, DbError> {
    conn.query_row(&format!("SELECT {} FROM pages WHERE id = ?1", COLUMNS), [id], row_to_page)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("page {}", id)))
}

pub fn read_page_by_slug(conn: &Connection, slug: &str) -> Result<Page, DbError> {
    conn.query_row(&format!("SELECT {} FROM pages WHERE slug = ?1", COLUMNS), [slug], row_to_page)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("page '{}'", slug)))
}

pub fn read_all_pages(conn: &Connection) -> Result<Vec<Page>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM pages ORDER BY slug ASC", COLUMNS))?;
    let rows = stmt.query_map([], row_to_page)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_page(conn: &Connection, id: &str, input: &PageInput) -> Result<Page, DbError> {
    let affected = conn
        .execute(
            "UPDATE pages SET slug = ?1, title_tr = ?2, title_en = ?3, content_tr = ?4, content_en = ?5, updated_at = ?6
             WHERE id = ?7",
            params![input.slug, input.title_tr, input.title_en, input.content_tr, input.content_en, now(), id],
        )
        .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    expect_row(affected, "page", id)?;
    read_page_by_id(conn, id)
}

pub fn delete_page(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM pages WHERE id = ?1", [id])?;
    expect_row(affected, "page", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::test_support;

    fn page(slug: &str) -> PageInput {
        PageInput {
            slug: slug.into(),
            title_tr: "Hakkımızda".into(),
            title_en: "About us".into(),
            content_tr: "<p>Biz kimiz</p>".into(),
            content_en: "<p>Who we are</p>".into(),
        }
    }

    #[test]
    fn page_round_trips_by_slug_and_lists_alphabetically() {
        let conn = test_support::conn();
        let about = create_page(&conn, &page("about")).unwrap();
        create_page(&conn, &page("work")).unwrap();
        create_page(&conn, &page("education")).unwrap();

        assert_eq!(read_page_by_slug(&conn, "about").unwrap(), about);
        let slugs: Vec<_> = read_all_pages(&conn).unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["about", "education", "work"]);
    }

    #[test]
    fn renaming_onto_existing_slug_conflicts() {
        let conn = test_support::conn();
        create_page(&conn, &page("about")).unwrap();
        let work = create_page(&conn, &page("work")).unwrap();
        let err = update_page(&conn, &work.id, &page("about")).unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[test]
    fn deleted_page_is_not_found() {
        let conn = test_support::conn();
        let about = create_page(&conn, &page("about")).unwrap();
        delete_page(&conn, &about.id).unwrap();
        assert!(matches!(read_page_by_slug(&conn, "about"), Err(DbError::NotFound(_))));
    }
}
