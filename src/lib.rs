use actix_csrf::CsrfMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::Method, middleware::Compat, web};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rand::prelude::StdRng;

pub type DbPool = Pool<SqliteConnectionManager>;

pub mod config;
pub mod error;
pub mod helper;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod setup;

use middleware::AdminGate;

/// Signed cookie sessions shared by the admin panel and the admin API.
pub fn session_middleware(key: Key, secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_same_site(actix_web::cookie::SameSite::Lax)
        .build()
}

/// Every route of the site. The admin scopes must be registered before the
/// `/{locale}` scope, which would otherwise capture them.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(actix_files::Files::new("/ssr_static", "./ssr_static"))
        .service(
            web::scope("/api/admin")
                .wrap(AdminGate::api())
                .configure(routes::admin_api::config_admin_api),
        )
        .service(
            web::scope("/api")
                .configure(routes::public::config_api)
                .configure(routes::leads::config_leads),
        )
        .service(
            web::scope("/admin")
                .wrap(Compat::new(AdminGate::pages()))
                .wrap(
                    CsrfMiddleware::<StdRng>::new()
                        .set_cookie(Method::GET, middleware::LOGIN_PATH)
                        .set_cookie(Method::GET, middleware::DASHBOARD_PATH),
                )
                .configure(routes::admin::config_login)
                .configure(routes::admin::config_dashboard),
        )
        .route("/", web::get().to(routes::site::redirect_to_default_locale))
        .service(web::scope("/{locale}").configure(routes::site::config_site));
}
