#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

#[actix_web::test]
async fn admin_api_requires_an_admin_session() {
    let (app, _pool) = test_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/admin/countries").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("Unauthorized"));

    let editor = session_cookie!(app, common::EDITOR_EMAIL);
    let req = test::TestRequest::get().uri("/api/admin/dashboard").cookie(editor).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn country_crud_round_trip() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/admin/countries")
        .cookie(admin.clone())
        .set_json(json!({
            "slug": "canada",
            "nameTr": "Kanada",
            "nameEn": "Canada",
            "contentTr": "<p>Merhaba</p><script>alert(1)</script>",
            "featured": true,
            "order": 2
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["contentTr"], json!("<p>Merhaba</p>"));

    let req = test::TestRequest::post()
        .uri("/api/admin/countries")
        .cookie(admin.clone())
        .set_json(json!({ "slug": "canada", "nameTr": "Kanada 2", "nameEn": "Canada 2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/countries/{}", id))
        .cookie(admin.clone())
        .set_json(json!({ "slug": "canada", "nameTr": "Kanada", "nameEn": "Canada (updated)", "order": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["nameEn"], json!("Canada (updated)"));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/countries/canada").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let public: Value = test::read_body_json(resp).await;
    assert_eq!(public["nameEn"], json!("Canada (updated)"));
    assert_eq!(public["visaPrograms"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/countries/{}", id))
        .cookie(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/countries/{}", id))
        .cookie(admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_slug_and_missing_fields_are_rejected() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/admin/pages")
        .cookie(admin.clone())
        .set_json(json!({ "slug": "About Us", "titleTr": "Hakkımızda", "titleEn": "About" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/admin/faqs")
        .cookie(admin)
        .set_json(json!({ "questionTr": "Soru?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn drafts_stay_out_of_the_public_blog() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    for (slug, published, published_at) in [
        ("older-post", true, "2024-01-10T09:00:00Z"),
        ("newer-post", true, "2024-03-05T09:00:00Z"),
        ("draft-post", false, "2024-04-01T09:00:00Z"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/admin/blog")
            .cookie(admin.clone())
            .set_json(json!({
                "slug": slug,
                "titleTr": slug,
                "titleEn": slug,
                "contentTr": "<p>içerik</p>",
                "contentEn": "<p>content</p>",
                "published": published,
                "publishedAt": published_at
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/blog").to_request()).await;
    let posts: Value = test::read_body_json(resp).await;
    let slugs: Vec<&str> = posts.as_array().unwrap().iter().map(|p| p["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["newer-post", "older-post"]);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/blog/draft-post").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/admin/blog").cookie(admin).to_request();
    let all: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn lead_status_changes_are_validated() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "Jane Doe", "email": "jane@example.com", "message": "Please call me back soon." }))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/messages/{}", id))
        .cookie(admin.clone())
        .set_json(json!({ "status": "contacted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/messages/{}", id))
        .cookie(admin.clone())
        .set_json(json!({ "status": "replied" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["status"], json!("replied"));

    let req = test::TestRequest::patch()
        .uri("/api/admin/applications/missing")
        .cookie(admin)
        .set_json(json!({ "status": "processing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dashboard_counts_content_and_leads() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "Jane Doe", "email": "jane@example.com", "message": "Please call me back soon." }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/admin/dashboard").cookie(admin).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let dashboard: Value = test::read_body_json(resp).await;
    assert_eq!(dashboard["stats"]["messagesCount"], json!(1));
    assert_eq!(dashboard["stats"]["countriesCount"], json!(0));
    assert_eq!(dashboard["userName"], json!("Site Admin"));
    assert_eq!(dashboard["recentMessages"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn profile_password_change_checks_current_password() {
    let (app, _pool) = test_app!();
    let admin = session_cookie!(app, common::ADMIN_EMAIL);

    let req = test::TestRequest::patch()
        .uri("/api/admin/profile/password")
        .cookie(admin.clone())
        .set_json(json!({ "currentPassword": "wrong-password", "newPassword": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri("/api/admin/profile/password")
        .cookie(admin)
        .set_json(json!({ "currentPassword": common::ADMIN_PASSWORD, "newPassword": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
