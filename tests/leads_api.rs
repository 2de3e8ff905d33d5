#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use elmavize_backend::models::db_operations::{countries_db_operations, leads_db_operations};
use elmavize_backend::models::payloads::CountryInput;
use elmavize_backend::models::{ApplicationStatus, MessageStatus};
use serde_json::{json, Value};

#[actix_web::test]
async fn application_is_stored_with_new_status() {
    let (app, pool) = test_app!();
    let germany_id = {
        let conn = pool.get().unwrap();
        let input = CountryInput {
            slug: "germany".into(),
            name_tr: "Almanya".into(),
            name_en: "Germany".into(),
            ..Default::default()
        };
        countries_db_operations::create_country(&conn, &input).unwrap().id
    };

    let req = test::TestRequest::post()
        .uri("/api/applications")
        .set_json(json!({
            "name": "Ayşe Yılmaz",
            "email": "ayse@example.com",
            "phone": "+90 532 000 0000",
            "countryId": germany_id,
            "visaType": "work",
            "message": "Mavi kart hakkında bilgi almak istiyorum."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    let id = body["id"].as_str().expect("id in response").to_string();

    let conn = pool.get().unwrap();
    let stored = leads_db_operations::read_application_with_relations(&conn, &id).unwrap();
    assert_eq!(stored.application.status, ApplicationStatus::New);
    assert_eq!(stored.application.visa_type, "work");
    assert_eq!(stored.country.map(|c| c.slug), Some("germany".to_string()));
}

#[actix_web::test]
async fn application_missing_phone_is_rejected_and_not_stored() {
    let (app, pool) = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/applications")
        .set_json(json!({
            "name": "Ayşe Yılmaz",
            "email": "ayse@example.com",
            "visaType": "work"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Missing required fields"));

    let conn = pool.get().unwrap();
    assert_eq!(leads_db_operations::count_applications(&conn).unwrap(), 0);
}

#[actix_web::test]
async fn application_with_unknown_country_is_rejected() {
    let (app, pool) = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/applications")
        .set_json(json!({
            "name": "Mehmet Demir",
            "email": "mehmet@example.com",
            "phone": "05320000000",
            "countryId": "no-such-country",
            "visaType": "student"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let conn = pool.get().unwrap();
    assert_eq!(leads_db_operations::count_applications(&conn).unwrap(), 0);
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _pool) = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/applications")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn contact_message_is_stored_and_stripped_of_markup() {
    let (app, pool) = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "John Smith",
            "email": "john@example.com",
            "message": "<script>alert(1)</script>Hello, I have a question about visas."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_str().unwrap().to_string();

    let conn = pool.get().unwrap();
    let stored = leads_db_operations::read_message_by_id(&conn, &id).unwrap();
    assert_eq!(stored.status, MessageStatus::New);
    assert_eq!(stored.subject, "");
    assert!(!stored.message.contains("<script>"));
}

#[actix_web::test]
async fn contact_message_too_short_is_rejected() {
    let (app, pool) = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "John", "email": "john@example.com", "message": "Hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let conn = pool.get().unwrap();
    assert_eq!(leads_db_operations::count_messages(&conn).unwrap(), 0);
}
