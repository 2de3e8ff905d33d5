use crate::error::ApiError;
use crate::helper::public_helpers::page_limit;
use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, pages_db_operations,
    visas_db_operations,
};
use crate::models::payloads::ListQuery;
use crate::DbPool;
use actix_web::{web, HttpResponse, Responder};

pub fn config_api(cfg: &mut web::ServiceConfig) {
    cfg.route("/is_server_active", web::get().to(is_server_active))
        .route("/countries", web::get().to(list_countries))
        .route("/countries/{slug}", web::get().to(get_country))
        .route("/visas", web::get().to(list_visas))
        .route("/visas/{slug}", web::get().to(get_visa))
        .route("/blog", web::get().to(list_posts))
        .route("/blog/{slug}", web::get().to(get_post))
        .route("/faqs", web::get().to(list_faqs))
        .route("/pages/{slug}", web::get().to(get_page));
}

async fn is_server_active() -> impl Responder {
    HttpResponse::Ok().body("active")
}

async fn list_countries(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(countries_db_operations::read_all_countries(&conn)?))
}

async fn get_country(pool: web::Data<DbPool>, slug: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(countries_db_operations::read_country_with_programs(&conn, &slug)?))
}

async fn list_visas(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(visas_db_operations::read_all_programs(&conn)?))
}

async fn get_visa(pool: web::Data<DbPool>, slug: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(visas_db_operations::read_program_by_slug(&conn, &slug)?))
}

async fn list_posts(pool: web::Data<DbPool>, query: web::Query<ListQuery>) -> Result<HttpResponse, ApiError> {
    let limit = page_limit(query.limit, 10);
    let offset = query.offset.unwrap_or(0);
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(blog_db_operations::read_published_posts(&conn, limit, offset)?))
}

async fn get_post(pool: web::Data<DbPool>, slug: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(blog_db_operations::read_published_post_by_slug(&conn, &slug)?))
}

async fn list_faqs(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(faqs_db_operations::read_published_faqs(&conn)?))
}

async fn get_page(pool: web::Data<DbPool>, slug: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let conn = pool.get()?;
    Ok(HttpResponse::Ok().json(pages_db_operations::read_page_by_slug(&conn, &slug)?))
}
