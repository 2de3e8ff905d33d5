use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::payloads::BlogPostInput;
use crate::models::BlogPost;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, slug, title_tr, title_en, excerpt_tr, excerpt_en, content_tr, content_en, author, category, published, published_at, created_at, updated_at";

fn row_to_post(row: &Row) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        slug: row.get(1)?,
        title_tr: row.get(2)?,
        title_en: row.get(3)?,
        excerpt_tr: row.get(4)?,
        excerpt_en: row.get(5)?,
        content_tr: row.get(6)?,
        content_en: row.get(7)?,
        author: row.get(8)?,
        category: row.get(9)?,
        published: row.get(10)?,
        published_at: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub fn create_post(conn: &Connection, input: &BlogPostInput) -> Result<BlogPost, DbError> {
    let id = new_id();
    let created_at = now();
    let published_at = input.published_at.unwrap_or(created_at);
    conn.execute(
        &format!(
            "INSERT INTO blog_posts ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
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
            input.author,
            input.category,
            input.published,
            published_at,
            created_at,
        ],
    )
    .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    read_post_by_id(conn, &id)
}

pub fn read_post_by_id(conn: &Connection, id: &str) -> Result<BlogPost, DbError> {
    conn.query_row(&format!("SELECT {} FROM blog_posts WHERE id = ?1", COLUMNS), [id], row_to_post)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("blog post {}", id)))
}

/// Public lookup. Drafts are invisible, the same as a missing slug.
pub fn read_published_post_by_slug(conn: &Connection, slug: &str) -> Result<BlogPost, DbError> {
    conn.query_row(
        &format!("SELECT {} FROM blog_posts WHERE slug = ?1 AND published = 1", COLUMNS),
        [slug],
        row_to_post,
    )
    .optional()?
    .ok_or_else(|| DbError::NotFound(format!("blog post '{}'", slug)))
}

/// Published posts, newest `published_at` first.
pub fn read_published_posts(conn: &Connection, limit: u32, offset: u32) -> Result<Vec<BlogPost>, DbError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM blog_posts WHERE published = 1 ORDER BY published_at DESC LIMIT ?1 OFFSET ?2",
        COLUMNS
    ))?;
    let rows = stmt.query_map(params![limit, offset], row_to_post)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Every post including drafts, for the admin panel.
pub fn read_all_posts(conn: &Connection) -> Result<Vec<BlogPost>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM blog_posts ORDER BY published_at DESC", COLUMNS))?;
    let rows = stmt.query_map([], row_to_post)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub fn update_post(conn: &Connection, id: &str, input: &BlogPostInput) -> Result<BlogPost, DbError> {
    let current = read_post_by_id(conn, id)?;
    let published_at = input.published_at.unwrap_or(current.published_at);
    let affected = conn
        .execute(
            "UPDATE blog_posts SET slug = ?1, title_tr = ?2, title_en = ?3, excerpt_tr = ?4, excerpt_en = ?5,
             content_tr = ?6, content_en = ?7, author = ?8, category = ?9, published = ?10, published_at = ?11,
             updated_at = ?12 WHERE id = ?13",
            params![
                input.slug,
                input.title_tr,
                input.title_en,
                input.excerpt_tr,
                input.excerpt_en,
                input.content_tr,
                input.content_en,
                input.author,
                input.category,
                input.published,
                published_at,
                now(),
                id,
            ],
        )
        .map_err(|e| constraint_error(e, &format!("slug '{}'", input.slug)))?;
    expect_row(affected, "blog post", id)?;
    read_post_by_id(conn, id)
}

pub fn delete_post(conn: &Connection, id: &str) -> Result<(), DbError> {
    let affected = conn.execute("DELETE FROM blog_posts WHERE id = ?1", [id])?;
    expect_row(affected, "blog post", id)
}

pub fn count_posts(conn: &Connection) -> Result<i64, DbError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM blog_posts", [], |row| row.get(0))?)
}
