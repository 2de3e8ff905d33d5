use crate::error::ApiError;
use crate::helper::{admin_helpers, form_helpers};
use crate::middleware::{update_session_email, AuthenticatedAdmin};
use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, leads_db_operations,
    pages_db_operations, users_db_operations, visas_db_operations,
};
use crate::models::payloads::{
    BlogPostInput, CountryInput, EmailUpdate, FaqInput, PageInput, PasswordUpdate, StatusUpdate,
    VisaProgramInput,
};
use crate::models::{ApplicationStatus, MessageStatus};
use crate::DbPool;
use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Mounted under `/api/admin`, behind `AdminGate::api()`.
pub fn config_admin_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard))
        // countries
        .route("/countries", web::get().to(list_countries))
        .route("/countries-list", web::get().to(list_countries))
        .route("/countries", web::post().to(create_country))
        .route("/countries/{id}", web::get().to(get_country))
        .route("/countries/{id}", web::put().to(update_country))
        .route("/countries/{id}", web::delete().to(delete_country))
        // visa programs
        .route("/visas", web::get().to(list_visas))
        .route("/visas-list", web::get().to(list_visas))
        .route("/visas", web::post().to(create_visa))
        .route("/visas/{id}", web::get().to(get_visa))
        .route("/visas/{id}", web::put().to(update_visa))
        .route("/visas/{id}", web::delete().to(delete_visa))
        // blog
        .route("/blog", web::get().to(list_posts))
        .route("/blog-list", web::get().to(list_posts))
        .route("/blog", web::post().to(create_post))
        .route("/blog/{id}", web::get().to(get_post))
        .route("/blog/{id}", web::put().to(update_post))
        .route("/blog/{id}", web::delete().to(delete_post))
        // faqs
        .route("/faqs", web::get().to(list_faqs))
        .route("/faqs-list", web::get().to(list_faqs))
        .route("/faqs", web::post().to(create_faq))
        .route("/faqs/{id}", web::get().to(get_faq))
        .route("/faqs/{id}", web::put().to(update_faq))
        .route("/faqs/{id}", web::delete().to(delete_faq))
        // pages
        .route("/pages", web::get().to(list_pages))
        .route("/pages-list", web::get().to(list_pages))
        .route("/pages", web::post().to(create_page))
        .route("/pages/{id}", web::get().to(get_page))
        .route("/pages/{id}", web::put().to(update_page))
        .route("/pages/{id}", web::delete().to(delete_page))
        // leads
        .route("/applications", web::get().to(list_applications))
        .route("/applications-list", web::get().to(list_applications))
        .route("/applications/{id}", web::get().to(get_application))
        .route("/applications/{id}", web::patch().to(update_application_status))
        .route("/applications/{id}", web::delete().to(delete_application))
        .route("/messages", web::get().to(list_messages))
        .route("/messages-list", web::get().to(list_messages))
        .route("/messages/{id}", web::get().to(get_message))
        .route("/messages/{id}", web::patch().to(update_message_status))
        .route("/messages/{id}", web::delete().to(delete_message))
        // profile
        .route("/profile", web::get().to(get_profile))
        .route("/profile/email", web::patch().to(update_profile_email))
        .route("/profile/password", web::patch().to(update_profile_password));
}

fn deleted() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true }))
}

async fn dashboard(admin: AuthenticatedAdmin, pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(admin_helpers::build_dashboard(&conn, &admin.name)?))
}

// ====================================================================
// =========================== COUNTRIES ==============================
// ====================================================================

async fn list_countries(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(countries_db_operations::read_countries_with_program_counts(&conn)?))
}

async fn create_country(pool: web::Data<DbPool>, body: web::Json<CountryInput>) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_country(body.into_inner())?;
    let conn = pool.get()?;
    let country = countries_db_operations::create_country(&conn, &input)?;
    log::info!("Country '{}' created", country.slug);
    Ok(HttpResponse::Created().json(country))
}

async fn get_country(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(countries_db_operations::read_country_by_id(&conn, &id)?))
}

async fn update_country(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<CountryInput>,
) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_country(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(countries_db_operations::update_country(&conn, &id, &input)?))
}

async fn delete_country(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    countries_db_operations::delete_country(&conn, &id)?;
    log::info!("Country {} deleted", id);
    Ok(deleted())
}

// ====================================================================
// ========================= VISA PROGRAMS ============================
// ====================================================================

async fn list_visas(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(visas_db_operations::read_programs_with_application_counts(&conn)?))
}

async fn create_visa(pool: web::Data<DbPool>, body: web::Json<VisaProgramInput>) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_program(body.into_inner())?;
    let conn = pool.get()?;
    let program = visas_db_operations::create_program(&conn, &input)?;
    log::info!("Visa program '{}' created", program.slug);
    Ok(HttpResponse::Created().json(program))
}

async fn get_visa(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(visas_db_operations::read_program_by_id(&conn, &id)?))
}

async fn update_visa(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<VisaProgramInput>,
) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_program(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(visas_db_operations::update_program(&conn, &id, &input)?))
}

async fn delete_visa(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    visas_db_operations::delete_program(&conn, &id)?;
    log::info!("Visa program {} deleted", id);
    Ok(deleted())
}

// ====================================================================
// ============================== BLOG ================================
// ====================================================================

async fn list_posts(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(blog_db_operations::read_all_posts(&conn)?))
}

async fn create_post(pool: web::Data<DbPool>, body: web::Json<BlogPostInput>) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_post(body.into_inner())?;
    let conn = pool.get()?;
    let post = blog_db_operations::create_post(&conn, &input)?;
    log::info!("Blog post '{}' created", post.slug);
    Ok(HttpResponse::Created().json(post))
}

async fn get_post(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(blog_db_operations::read_post_by_id(&conn, &id)?))
}

async fn update_post(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<BlogPostInput>,
) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_post(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(blog_db_operations::update_post(&conn, &id, &input)?))
}

async fn delete_post(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    blog_db_operations::delete_post(&conn, &id)?;
    log::info!("Blog post {} deleted", id);
    Ok(deleted())
}

// ====================================================================
// ============================== FAQS ================================
// ====================================================================

async fn list_faqs(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(faqs_db_operations::read_all_faqs(&conn)?))
}

async fn create_faq(pool: web::Data<DbPool>, body: web::Json<FaqInput>) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_faq(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Created().json(faqs_db_operations::create_faq(&conn, &input)?))
}

async fn get_faq(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(faqs_db_operations::read_faq_by_id(&conn, &id)?))
}

async fn update_faq(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<FaqInput>,
) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_faq(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(faqs_db_operations::update_faq(&conn, &id, &input)?))
}

async fn delete_faq(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    faqs_db_operations::delete_faq(&conn, &id)?;
    Ok(deleted())
}

// ====================================================================
// ============================= PAGES ================================
// ====================================================================

async fn list_pages(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(pages_db_operations::read_all_pages(&conn)?))
}

async fn create_page(pool: web::Data<DbPool>, body: web::Json<PageInput>) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_page(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Created().json(pages_db_operations::create_page(&conn, &input)?))
}

async fn get_page(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(pages_db_operations::read_page_by_id(&conn, &id)?))
}

async fn update_page(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<PageInput>,
) -> Result<HttpResponse, ApiError> {
    let input = form_helpers::clean_page(body.into_inner())?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(pages_db_operations::update_page(&conn, &id, &input)?))
}

async fn delete_page(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    pages_db_operations::delete_page(&conn, &id)?;
    Ok(deleted())
}

// ====================================================================
// ============================= LEADS ================================
// ====================================================================

async fn list_applications(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(leads_db_operations::read_applications(&conn, None)?))
}

async fn get_application(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(leads_db_operations::read_application_with_relations(&conn, &id)?))
}

async fn update_application_status(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let status = form_helpers::parse_status::<ApplicationStatus>(&body.status)?;
    let conn = pool.get()?;
    let application = leads_db_operations::update_application_status(&conn, &id, status)?;
    log::info!("Application {} marked as '{}'", application.id, status);
    Ok(HttpResponse::Ok().json(application))
}

async fn delete_application(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    leads_db_operations::delete_application(&conn, &id)?;
    Ok(deleted())
}

async fn list_messages(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(leads_db_operations::read_messages(&conn, None)?))
}

async fn get_message(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(leads_db_operations::read_message_by_id(&conn, &id)?))
}

async fn update_message_status(
    pool: web::Data<DbPool>,
    id: web::Path<String>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let status = form_helpers::parse_status::<MessageStatus>(&body.status)?;
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(leads_db_operations::update_message_status(&conn, &id, status)?))
}

async fn delete_message(pool: web::Data<DbPool>, id: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    leads_db_operations::delete_message(&conn, &id)?;
    Ok(deleted())
}

// ====================================================================
// ============================ PROFILE ===============================
// ====================================================================

async fn get_profile(admin: AuthenticatedAdmin, pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(users_db_operations::read_user_by_id(&conn, &admin.user_id)?))
}

async fn update_profile_email(
    admin: AuthenticatedAdmin,
    session: Session,
    pool: web::Data<DbPool>,
    body: web::Json<EmailUpdate>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    let user = admin_helpers::change_email(&conn, &admin.user_id, &body)?;
    if let Err(e) = update_session_email(&session, &user.email) {
        log::error!("Failed to refresh session email for user {}: {}", user.id, e);
    }
    log::info!("User {} changed their email", user.id);
    Ok(HttpResponse::Ok().json(user))
}

async fn update_profile_password(
    admin: AuthenticatedAdmin,
    pool: web::Data<DbPool>,
    body: web::Json<PasswordUpdate>,
) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    admin_helpers::change_password(&conn, &admin.user_id, &body)?;
    log::info!("User {} changed their password", admin.user_id);
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
