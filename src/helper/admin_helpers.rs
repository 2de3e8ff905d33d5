use crate::error::ApiError;
use crate::helper::form_helpers;
use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, leads_db_operations,
    users_db_operations, visas_db_operations, DbError,
};
use crate::models::payloads::{EmailUpdate, PasswordUpdate};
use crate::models::{Dashboard, DashboardStats, User};
use rusqlite::Connection;

/// Number of recent applications and messages shown on the dashboard.
pub const RECENT_LEADS: u32 = 5;

pub fn read_stats(conn: &Connection) -> Result<DashboardStats, DbError> {
    Ok(DashboardStats {
        countries_count: countries_db_operations::count_countries(conn)?,
        visas_count: visas_db_operations::count_programs(conn)?,
        blog_posts_count: blog_db_operations::count_posts(conn)?,
        faqs_count: faqs_db_operations::count_faqs(conn)?,
        applications_count: leads_db_operations::count_applications(conn)?,
        messages_count: leads_db_operations::count_messages(conn)?,
    })
}

pub fn build_dashboard(conn: &Connection, user_name: &str) -> Result<Dashboard, DbError> {
    Ok(Dashboard {
        stats: read_stats(conn)?,
        recent_applications: leads_db_operations::read_applications(conn, Some(RECENT_LEADS))?,
        recent_messages: leads_db_operations::read_messages(conn, Some(RECENT_LEADS))?,
        user_name: user_name.to_string(),
    })
}

/// Changes the signed-in user's email. An address held by another user is a 400.
pub fn change_email(conn: &Connection, user_id: &str, body: &EmailUpdate) -> Result<User, ApiError> {
    let email = form_helpers::validate_new_email(&body.email)?;
    match users_db_operations::update_email(conn, user_id, &email) {
        Ok(user) => Ok(user),
        Err(DbError::Conflict(_)) => Err(ApiError::Validation("This email is already in use".to_string())),
        Err(e) => Err(e.into()),
    }
}

pub fn change_password(conn: &Connection, user_id: &str, body: &PasswordUpdate) -> Result<(), ApiError> {
    form_helpers::validate_new_password(&body.current_password, &body.new_password)?;
    if !users_db_operations::password_matches(conn, user_id, &body.current_password)? {
        return Err(ApiError::Validation("Current password is incorrect".to_string()));
    }
    users_db_operations::update_password(conn, user_id, &body.new_password)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::test_support::{self, germany};
    use crate::models::UserRole;

    #[test]
    fn dashboard_counts_everything() {
        let conn = test_support::conn();
        countries_db_operations::create_country(&conn, &germany()).unwrap();
        let dashboard = build_dashboard(&conn, "Admin").unwrap();
        assert_eq!(dashboard.stats.countries_count, 1);
        assert_eq!(dashboard.stats.applications_count, 0);
        assert!(dashboard.recent_messages.is_empty());
        assert_eq!(dashboard.user_name, "Admin");
    }

    #[test]
    fn email_change_rejects_taken_and_invalid_addresses() {
        let conn = test_support::conn();
        let me = users_db_operations::create_user(&conn, "me@elmavize.com", "secret1", "Me", UserRole::Admin).unwrap();
        users_db_operations::create_user(&conn, "other@elmavize.com", "secret1", "Other", UserRole::Admin).unwrap();

        let taken = EmailUpdate { email: "other@elmavize.com".into() };
        assert!(matches!(change_email(&conn, &me.id, &taken), Err(ApiError::Validation(_))));

        let invalid = EmailUpdate { email: "nope".into() };
        assert!(matches!(change_email(&conn, &me.id, &invalid), Err(ApiError::Validation(_))));

        let fresh = EmailUpdate { email: "new@elmavize.com".into() };
        assert_eq!(change_email(&conn, &me.id, &fresh).unwrap().email, "new@elmavize.com");
    }

    #[test]
    fn password_change_requires_the_current_password() {
        let conn = test_support::conn();
        let me = users_db_operations::create_user(&conn, "me@elmavize.com", "admin123", "Me", UserRole::Admin).unwrap();

        let wrong = PasswordUpdate { current_password: "nope".into(), new_password: "newsecret".into() };
        assert!(matches!(change_password(&conn, &me.id, &wrong), Err(ApiError::Validation(_))));

        let ok = PasswordUpdate { current_password: "admin123".into(), new_password: "newsecret".into() };
        change_password(&conn, &me.id, &ok).unwrap();
        assert!(users_db_operations::verify_credentials(&conn, "me@elmavize.com", "newsecret").is_some());
    }
}
