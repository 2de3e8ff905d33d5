use crate::models::db_operations::{constraint_error, expect_row, new_id, now, DbError};
use crate::models::{User, UserRole};
use bcrypt::{hash, verify};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "id, email, name, role, created_at";

fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Hashing cost. Lowered under test so suites stay fast.
#[cfg(not(test))]
pub(crate) const HASH_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
pub(crate) const HASH_COST: u32 = 4;

pub fn create_user(
    conn: &Connection,
    email: &str,
    password: &str,
    name: &str,
    role: UserRole,
) -> Result<User, DbError> {
    let hashed_password = hash(password, HASH_COST)?;
    let id = new_id();
    let created_at = now();
    conn.execute(
        "INSERT INTO users (id, email, password_hash, name, role, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![id, email, hashed_password, name, role, created_at],
    )
    .map_err(|e| constraint_error(e, &format!("email '{}'", email)))?;
    read_user_by_id(conn, &id)
}

pub fn read_user_by_id(conn: &Connection, id: &str) -> Result<User, DbError> {
    conn.query_row(&format!("SELECT {} FROM users WHERE id = ?1", COLUMNS), [id], row_to_user)
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("user {}", id)))
}

pub fn read_user_by_email(conn: &Connection, email: &str) -> Option<User> {
    conn.query_row(&format!("SELECT {} FROM users WHERE email = ?1", COLUMNS), [email], row_to_user)
        .optional()
        .unwrap_or_else(|e| {
            log::error!("Failed to look up user '{}': {}", email, e);
            None
        })
}

pub fn read_users_by_role(conn: &Connection, role: UserRole) -> Result<Vec<User>, DbError> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM users WHERE role = ?1 ORDER BY email", COLUMNS))?;
    let rows = stmt.query_map([role], row_to_user)?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Returns the user when the email exists and the password matches its hash.
pub fn verify_credentials(conn: &Connection, email: &str, password: &str) -> Option<User> {
    let res: rusqlite::Result<(String, String)> = conn.query_row(
        "SELECT id, password_hash FROM users WHERE email = ?1",
        [email],
        |row| Ok((row.get(0)?, row.get(1)?)),
    );

    if let Ok((id, hash)) = res {
        if verify(password, &hash).unwrap_or(false) {
            return read_user_by_id(conn, &id).ok();
        }
    }
    None
}

pub fn update_email(conn: &Connection, user_id: &str, email: &str) -> Result<User, DbError> {
    let affected = conn
        .execute(
            "UPDATE users SET email = ?1, updated_at = ?2 WHERE id = ?3",
            params![email, now(), user_id],
        )
        .map_err(|e| constraint_error(e, &format!("email '{}'", email)))?;
    expect_row(affected, "user", user_id)?;
    read_user_by_id(conn, user_id)
}

pub fn update_password(conn: &Connection, user_id: &str, new_password: &str) -> Result<(), DbError> {
    let hashed_password = hash(new_password, HASH_COST)?;
    let affected = conn.execute(
        "UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
        params![hashed_password, now(), user_id],
    )?;
    expect_row(affected, "user", user_id)
}

/// Checks `current_password` for the user with this id.
pub fn password_matches(conn: &Connection, user_id: &str, current_password: &str) -> Result<bool, DbError> {
    let hash: String = conn
        .query_row("SELECT password_hash FROM users WHERE id = ?1", [user_id], |row| row.get(0))
        .optional()?
        .ok_or_else(|| DbError::NotFound(format!("user {}", user_id)))?;
    Ok(verify(current_password, &hash).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::test_support;

    #[test]
    fn credentials_verify_only_with_the_right_password() {
        let conn = test_support::conn();
        let admin = create_user(&conn, "admin@elmavize.com", "admin123", "Admin", UserRole::Admin).unwrap();

        let verified = verify_credentials(&conn, "admin@elmavize.com", "admin123").unwrap();
        assert_eq!(verified, admin);
        assert!(verify_credentials(&conn, "admin@elmavize.com", "wrong").is_none());
        assert!(verify_credentials(&conn, "nobody@elmavize.com", "admin123").is_none());
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let conn = test_support::conn();
        create_user(&conn, "a@b.co", "secret1", "A", UserRole::Admin).unwrap();
        let err = create_user(&conn, "a@b.co", "secret2", "B", UserRole::Editor).unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));
    }

    #[test]
    fn password_change_replaces_the_hash() {
        let conn = test_support::conn();
        let user = create_user(&conn, "a@b.co", "old-secret", "A", UserRole::Admin).unwrap();
        update_password(&conn, &user.id, "new-secret").unwrap();
        assert!(!password_matches(&conn, &user.id, "old-secret").unwrap());
        assert!(password_matches(&conn, &user.id, "new-secret").unwrap());
    }

    #[test]
    fn email_change_and_role_listing() {
        let conn = test_support::conn();
        let user = create_user(&conn, "a@b.co", "secret", "A", UserRole::Admin).unwrap();
        create_user(&conn, "e@b.co", "secret", "E", UserRole::Editor).unwrap();

        let updated = update_email(&conn, &user.id, "new@b.co").unwrap();
        assert_eq!(updated.email, "new@b.co");
        assert!(read_user_by_email(&conn, "a@b.co").is_none());

        let admins = read_users_by_role(&conn, UserRole::Admin).unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "new@b.co");
    }
}
