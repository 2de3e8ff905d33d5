use crate::models::db_operations::users_db_operations;
use crate::models::User;
use crate::DbPool;
use actix_web::web;

pub fn verify_admin_credentials(pool: &web::Data<DbPool>, email: &str, password: &str) -> Option<User> {
    match pool.get() {
        Ok(conn) => users_db_operations::verify_credentials(&conn, email.trim(), password),
        Err(e) => {
            log::error!("Could not get DB connection from pool for login: {}", e);
            None
        }
    }
}

/// Clamps a page size from a query string to something sensible.
pub fn page_limit(limit: Option<u32>, default: u32) -> u32 {
    limit.unwrap_or(default).clamp(1, 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_limit_is_clamped() {
        assert_eq!(page_limit(None, 10), 10);
        assert_eq!(page_limit(Some(0), 10), 1);
        assert_eq!(page_limit(Some(1000), 10), 100);
    }
}
