use crate::error::ApiError;
use crate::helper::form_helpers;
use crate::models::db_operations::leads_db_operations;
use crate::models::payloads::{ApplicationSubmission, ContactSubmission};
use crate::DbPool;
use actix_web::{web, HttpResponse};
use serde_json::json;

pub fn config_leads(cfg: &mut web::ServiceConfig) {
    cfg.route("/applications", web::post().to(submit_application))
        .route("/contact", web::post().to(submit_contact));
}

async fn submit_application(
    pool: web::Data<DbPool>,
    body: web::Json<ApplicationSubmission>,
) -> Result<HttpResponse, ApiError> {
    let new = form_helpers::validate_application(&body)?;
    let conn = pool.get()?;
    let application = leads_db_operations::create_application(&conn, &new)?;
    log::info!("New application {} for visa type '{}'", application.id, application.visa_type);
    Ok(HttpResponse::Ok().json(json!({ "success": true, "id": application.id })))
}

async fn submit_contact(
    pool: web::Data<DbPool>,
    body: web::Json<ContactSubmission>,
) -> Result<HttpResponse, ApiError> {
    let new = form_helpers::validate_contact(&body)?;
    let conn = pool.get()?;
    let message = leads_db_operations::create_message(&conn, &new)?;
    log::info!("New contact message {}", message.id);
    Ok(HttpResponse::Ok().json(json!({ "success": true, "id": message.id })))
}
