#![allow(dead_code)]

use actix_session::Session;
use actix_web::{web, HttpResponse};
use elmavize_backend::config::{CompanyConfig, Config, WebConfig};
use elmavize_backend::middleware::start_session;
use elmavize_backend::models::db_operations::users_db_operations;
use elmavize_backend::models::UserRole;
use elmavize_backend::DbPool;
use tera::Tera;

pub const ADMIN_EMAIL: &str = "admin@elmavize.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const EDITOR_EMAIL: &str = "editor@elmavize.com";

pub fn test_config() -> Config {
    Config {
        web: WebConfig { host: "127.0.0.1".into(), port: 0 },
        company: CompanyConfig {
            name_tr: "Elma Vize Danışmanlık".into(),
            name_en: "Elma Visa Consultancy".into(),
            phone: "+90 555 123 4567".into(),
            email: "info@elmavize.com".into(),
            address_tr: "İstanbul, Türkiye".into(),
            address_en: "Istanbul, Turkey".into(),
            description_tr: "Yurtdışı vize danışmanlığı".into(),
            description_en: "Visa consultancy abroad".into(),
            instagram: String::new(),
            logo: "/ssr_static/logo.svg".into(),
        },
        database_url: "sqlite::memory:".into(),
        allowed_origins: String::new(),
        log_level: "warn".into(),
        session_secret_key: String::new(),
        use_secure_cookies: false,
    }
}

pub fn test_tera() -> Tera {
    Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*.html")).expect("templates parse")
}

/// Memory database with one admin and one editor.
pub fn test_pool() -> DbPool {
    let pool = elmavize_backend::helper::db_helpers::build_memory_pool().expect("memory pool");
    {
        let conn = pool.get().expect("connection");
        users_db_operations::create_user(&conn, ADMIN_EMAIL, ADMIN_PASSWORD, "Site Admin", UserRole::Admin)
            .expect("admin user");
        users_db_operations::create_user(&conn, EDITOR_EMAIL, "editor123", "Site Editor", UserRole::Editor)
            .expect("editor user");
    }
    pool
}

/// Test-only shortcut that signs the given user in without the CSRF form.
pub async fn sign_in_as(session: Session, pool: web::Data<DbPool>, email: web::Path<String>) -> HttpResponse {
    let conn = pool.get().expect("connection");
    let user = users_db_operations::read_user_by_email(&conn, &email).expect("known user");
    start_session(&session, &user).expect("session insert");
    HttpResponse::Ok().finish()
}

/// Builds the full application around a memory pool. Evaluates to
/// `(service, pool)`.
macro_rules! test_app {
    () => {{
        let pool = common::test_pool();
        let app = actix_web::test::init_service(
            actix_web::App::new()
                .wrap(elmavize_backend::session_middleware(actix_web::cookie::Key::generate(), false))
                .app_data(actix_web::web::Data::new(common::test_config()))
                .app_data(actix_web::web::Data::new(common::test_tera()))
                .app_data(actix_web::web::Data::new(pool.clone()))
                .route("/test/sign-in/{email}", actix_web::web::post().to(common::sign_in_as))
                .configure(elmavize_backend::configure_routes),
        )
        .await;
        (app, pool)
    }};
}

/// Signs in through the test route and returns the session cookie.
macro_rules! session_cookie {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri(&format!("/test/sign-in/{}", $email))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert!(resp.status().is_success());
        resp.response()
            .cookies()
            .next()
            .expect("session cookie")
            .into_owned()
    }};
}

/// Copies every cookie a response sets, so a follow-up request carries both
/// the session and the CSRF cookie.
pub fn response_cookies(resp: &actix_web::dev::ServiceResponse) -> Vec<actix_web::cookie::Cookie<'static>> {
    resp.response().cookies().map(|c| c.into_owned()).collect()
}

/// Reads the value of the hidden `csrf_token` input out of a rendered form.
pub fn hidden_csrf_token(body: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = body.find(marker).expect("csrf input") + marker.len();
    let end = start + body[start..].find('"').expect("closing quote");
    body[start..end]
        .replace("&#x2F;", "/")
        .replace("&#x27;", "'")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
