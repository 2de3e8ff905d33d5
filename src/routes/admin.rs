use crate::helper::i18n_helpers::VISA_TYPES;
use crate::helper::{admin_helpers, public_helpers};
use crate::helper::site_helpers::{render_page, render_with_status};
use crate::middleware::{
    admin_guard, remember_csrf_token, start_session, AuthenticatedAdmin, DASHBOARD_PATH, LOGIN_PATH,
};
use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, leads_db_operations,
    pages_db_operations, users_db_operations, visas_db_operations, DbError,
};
use crate::models::{ApplicationStatus, MessageStatus, UserRole};
use crate::DbPool;
use actix_csrf::extractor::{Csrf, CsrfGuarded, CsrfToken};
use actix_session::Session;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

#[derive(Deserialize)]
struct LoginForm {
    csrf_token: CsrfToken,
    email: String,
    password: String,
}

impl CsrfGuarded for LoginForm {
    fn csrf_token(&self) -> &CsrfToken {
        &self.csrf_token
    }
}

#[derive(Deserialize)]
struct LogoutForm {
    csrf_token: CsrfToken,
}

impl CsrfGuarded for LogoutForm {
    fn csrf_token(&self) -> &CsrfToken {
        &self.csrf_token
    }
}

/// The five content types that have list, new and edit screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ContentKind {
    Countries,
    Visas,
    Blog,
    Faqs,
    Pages,
}

impl ContentKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "countries" => Some(ContentKind::Countries),
            "visas" => Some(ContentKind::Visas),
            "blog" => Some(ContentKind::Blog),
            "faqs" => Some(ContentKind::Faqs),
            "pages" => Some(ContentKind::Pages),
            _ => None,
        }
    }

    fn segment(&self) -> &'static str {
        match self {
            ContentKind::Countries => "countries",
            ContentKind::Visas => "visas",
            ContentKind::Blog => "blog",
            ContentKind::Faqs => "faqs",
            ContentKind::Pages => "pages",
        }
    }

    fn form_template(&self) -> &'static str {
        match self {
            ContentKind::Countries => "admin/country_form.html",
            ContentKind::Visas => "admin/visa_form.html",
            ContentKind::Blog => "admin/post_form.html",
            ContentKind::Faqs => "admin/faq_form.html",
            ContentKind::Pages => "admin/page_form.html",
        }
    }
}

/// Login and logout stay reachable without a session.
pub fn config_login(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::get().to(show_admin_login_form))
        .route("/login", web::post().to(handle_admin_login))
        .route("/logout", web::post().to(handle_admin_logout));
}

pub fn config_dashboard(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(show_admin_dashboard))
        .route("/", web::get().to(show_admin_dashboard))
        .route("/applications", web::get().to(show_applications))
        .route("/messages", web::get().to(show_messages))
        .route("/profile", web::get().to(show_profile))
        .route("/{kind}", web::get().to(show_content_list))
        .route("/{kind}/new", web::get().to(show_new_form))
        .route("/{kind}/{id}/edit", web::get().to(show_edit_form));
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found().append_header(("location", location)).finish()
}

fn admin_context(admin: &AuthenticatedAdmin, active: &str) -> Context {
    let mut ctx = Context::new();
    ctx.insert("user", admin);
    ctx.insert("active", active);
    ctx
}

fn render_admin_error(tera: &Tera, ctx: &Context, err: DbError) -> HttpResponse {
    match err {
        DbError::NotFound(what) => {
            log::info!("Admin page for missing record: {}", what);
            render_with_status(tera, "admin/not_found.html", ctx, StatusCode::NOT_FOUND)
        }
        other => {
            log::error!("Failed to load admin page data: {}", other);
            HttpResponse::InternalServerError().body("Error loading admin page.")
        }
    }
}

async fn show_admin_login_form(session: Session, tera: web::Data<Tera>, token: CsrfToken) -> impl Responder {
    if admin_guard(&session) {
        return redirect(DASHBOARD_PATH);
    }

    let mut ctx = Context::new();
    ctx.insert("csrf_token", token.get());

    if let Ok(Some(error)) = session.get::<String>("error") {
        ctx.insert("error", &error);
        session.remove("error");
    }

    render_page(&tera, "admin/login.html", &ctx)
}

async fn handle_admin_login(
    session: Session,
    pool: web::Data<DbPool>,
    form: Csrf<web::Form<LoginForm>>,
) -> impl Responder {
    let login_data = form.into_inner().into_inner();

    let message = match public_helpers::verify_admin_credentials(&pool, &login_data.email, &login_data.password) {
        Some(user) if user.role == UserRole::Admin => match start_session(&session, &user) {
            Ok(()) => {
                log::info!("Admin '{}' logged in", user.email);
                return redirect(DASHBOARD_PATH);
            }
            Err(e) => {
                log::error!("Failed to store session for '{}': {}", user.email, e);
                "Could not start a session. Please try again."
            }
        },
        Some(user) => {
            log::warn!("Non-admin user '{}' tried to log into the admin panel", user.email);
            "Access denied. Only administrators may log in here."
        }
        None => {
            log::warn!("Failed admin login for '{}'", login_data.email);
            "Invalid email or password."
        }
    };

    if let Err(e) = session.insert("error", message) {
        log::error!("Failed to store login error in session: {}", e);
    }
    redirect(LOGIN_PATH)
}

async fn handle_admin_logout(session: Session, _form: Csrf<web::Form<LogoutForm>>) -> impl Responder {
    session.purge();
    redirect(LOGIN_PATH)
}

/// The dashboard GET also issues the CSRF cookie used by the panel's logout form.
async fn show_admin_dashboard(
    mut admin: AuthenticatedAdmin,
    session: Session,
    token: Option<CsrfToken>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    if let Some(token) = token {
        match remember_csrf_token(&session, token.get()) {
            Ok(()) => admin.csrf_token = Some(token.get().to_string()),
            Err(e) => log::error!("Failed to store CSRF token in session: {}", e),
        }
    }
    let mut ctx = admin_context(&admin, "dashboard");
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| admin_helpers::build_dashboard(&conn, &admin.name));

    match data {
        Ok(dashboard) => {
            ctx.insert("dashboard", &dashboard);
            render_page(&tera, "admin/dashboard.html", &ctx)
        }
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

async fn show_applications(
    admin: AuthenticatedAdmin,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let mut ctx = admin_context(&admin, "applications");
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| leads_db_operations::read_applications(&conn, None));

    match data {
        Ok(applications) => {
            ctx.insert("applications", &applications);
            ctx.insert("statuses", ApplicationStatus::ALL);
            render_page(&tera, "admin/applications.html", &ctx)
        }
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

async fn show_messages(admin: AuthenticatedAdmin, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let mut ctx = admin_context(&admin, "messages");
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| leads_db_operations::read_messages(&conn, None));

    match data {
        Ok(messages) => {
            ctx.insert("messages", &messages);
            ctx.insert("statuses", MessageStatus::ALL);
            render_page(&tera, "admin/messages.html", &ctx)
        }
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

async fn show_profile(admin: AuthenticatedAdmin, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let mut ctx = admin_context(&admin, "profile");
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| users_db_operations::read_user_by_id(&conn, &admin.user_id));

    match data {
        Ok(profile) => {
            ctx.insert("profile", &profile);
            render_page(&tera, "admin/profile.html", &ctx)
        }
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

async fn show_content_list(
    admin: AuthenticatedAdmin,
    kind: web::Path<String>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let Some(kind) = ContentKind::from_segment(&kind) else {
        let ctx = admin_context(&admin, "");
        return render_with_status(&tera, "admin/not_found.html", &ctx, StatusCode::NOT_FOUND);
    };
    let mut ctx = admin_context(&admin, kind.segment());

    let loaded = pool.get().map_err(DbError::from).and_then(|conn| {
        match kind {
            ContentKind::Countries => {
                ctx.insert("items", &countries_db_operations::read_countries_with_program_counts(&conn)?)
            }
            ContentKind::Visas => {
                ctx.insert("items", &visas_db_operations::read_programs_with_application_counts(&conn)?)
            }
            ContentKind::Blog => ctx.insert("items", &blog_db_operations::read_all_posts(&conn)?),
            ContentKind::Faqs => ctx.insert("items", &faqs_db_operations::read_all_faqs(&conn)?),
            ContentKind::Pages => ctx.insert("items", &pages_db_operations::read_all_pages(&conn)?),
        }
        Ok(())
    });

    match loaded {
        Ok(()) => render_page(&tera, &format!("admin/{}.html", kind.segment()), &ctx),
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

/// Select options every visa program form needs.
fn insert_program_options(conn: &rusqlite::Connection, ctx: &mut Context) -> Result<(), DbError> {
    ctx.insert("countries", &countries_db_operations::read_countries_by_name(conn)?);
    ctx.insert("visa_types", &VISA_TYPES);
    Ok(())
}

async fn show_new_form(
    admin: AuthenticatedAdmin,
    kind: web::Path<String>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let Some(kind) = ContentKind::from_segment(&kind) else {
        let ctx = admin_context(&admin, "");
        return render_with_status(&tera, "admin/not_found.html", &ctx, StatusCode::NOT_FOUND);
    };
    let mut ctx = admin_context(&admin, kind.segment());
    ctx.insert("is_new", &true);

    if kind == ContentKind::Visas {
        let loaded = pool
            .get()
            .map_err(DbError::from)
            .and_then(|conn| insert_program_options(&conn, &mut ctx));
        if let Err(e) = loaded {
            return render_admin_error(&tera, &ctx, e);
        }
    }

    render_page(&tera, kind.form_template(), &ctx)
}

async fn show_edit_form(
    admin: AuthenticatedAdmin,
    path: web::Path<(String, String)>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let (segment, id) = path.into_inner();
    let Some(kind) = ContentKind::from_segment(&segment) else {
        let ctx = admin_context(&admin, "");
        return render_with_status(&tera, "admin/not_found.html", &ctx, StatusCode::NOT_FOUND);
    };
    let mut ctx = admin_context(&admin, kind.segment());
    ctx.insert("is_new", &false);

    let loaded = pool.get().map_err(DbError::from).and_then(|conn| {
        match kind {
            ContentKind::Countries => ctx.insert("item", &countries_db_operations::read_country_by_id(&conn, &id)?),
            ContentKind::Visas => {
                ctx.insert("item", &visas_db_operations::read_program_by_id(&conn, &id)?);
                insert_program_options(&conn, &mut ctx)?;
            }
            ContentKind::Blog => ctx.insert("item", &blog_db_operations::read_post_by_id(&conn, &id)?),
            ContentKind::Faqs => ctx.insert("item", &faqs_db_operations::read_faq_by_id(&conn, &id)?),
            ContentKind::Pages => ctx.insert("item", &pages_db_operations::read_page_by_id(&conn, &id)?),
        }
        Ok(())
    });

    match loaded {
        Ok(()) => render_page(&tera, kind.form_template(), &ctx),
        Err(e) => render_admin_error(&tera, &ctx, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_segments_round_trip() {
        for segment in ["countries", "visas", "blog", "faqs", "pages"] {
            let kind = ContentKind::from_segment(segment).unwrap();
            assert_eq!(kind.segment(), segment);
        }
        assert!(ContentKind::from_segment("applications").is_none());
        assert!(ContentKind::from_segment("users").is_none());
    }
}
