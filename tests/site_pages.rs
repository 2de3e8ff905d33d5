#[macro_use]
mod common;

use actix_web::{http::StatusCode, test};
use elmavize_backend::models::db_operations::{blog_db_operations, countries_db_operations, pages_db_operations};
use elmavize_backend::models::payloads::{BlogPostInput, CountryInput, PageInput};

fn location(resp: &actix_web::dev::ServiceResponse) -> String {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[actix_web::test]
async fn root_redirects_to_turkish() {
    let (app, _pool) = test_app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/tr");
}

#[actix_web::test]
async fn unknown_locale_renders_not_found() {
    let (app, _pool) = test_app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/de/countries").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn pages_render_in_both_locales() {
    let (app, pool) = test_app!();
    {
        let conn = pool.get().unwrap();
        let country = CountryInput {
            slug: "germany".into(),
            name_tr: "Almanya".into(),
            name_en: "Germany".into(),
            featured: true,
            ..Default::default()
        };
        countries_db_operations::create_country(&conn, &country).unwrap();
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tr").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Almanya"));
    assert!(body.contains("lang=\"tr\""));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/en/countries/germany").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Germany"));
    assert!(body.contains("href=\"/tr/countries/germany\""));
}

#[actix_web::test]
async fn missing_slugs_render_not_found() {
    let (app, _pool) = test_app!();
    for uri in ["/tr/countries/atlantis", "/en/visas/no-such-visa", "/en/blog/no-such-post"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[actix_web::test]
async fn draft_post_page_is_not_found() {
    let (app, pool) = test_app!();
    {
        let conn = pool.get().unwrap();
        let draft = BlogPostInput {
            slug: "taslak".into(),
            title_tr: "Taslak".into(),
            title_en: "Draft".into(),
            excerpt_tr: String::new(),
            excerpt_en: String::new(),
            content_tr: String::new(),
            content_en: String::new(),
            author: String::new(),
            category: String::new(),
            published: false,
            published_at: None,
        };
        blog_db_operations::create_post(&conn, &draft).unwrap();
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tr/blog/taslak").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tr/blog").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(!body.contains("Taslak"));
}

#[actix_web::test]
async fn about_page_shows_stored_content_or_fallback() {
    let (app, pool) = test_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/en/about").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    {
        let conn = pool.get().unwrap();
        let about = PageInput {
            slug: "about".into(),
            title_tr: "Hakkımızda".into(),
            title_en: "About Us".into(),
            content_tr: "<p>Biz kimiz</p>".into(),
            content_en: "<p>Who we are</p>".into(),
        };
        pages_db_operations::create_page(&conn, &about).unwrap();
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/en/about").to_request()).await;
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<p>Who we are</p>"));
}

#[actix_web::test]
async fn admin_pages_redirect_by_session() {
    let (app, _pool) = test_app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin/countries").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/admin/login");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/admin/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let editor = session_cookie!(app, common::EDITOR_EMAIL);
    let req = test::TestRequest::get().uri("/admin").cookie(editor).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let admin = session_cookie!(app, common::ADMIN_EMAIL);
    let req = test::TestRequest::get().uri("/admin").cookie(admin.clone()).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/admin/login").cookie(admin).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/admin");
}

#[actix_web::test]
async fn application_form_requires_a_country() {
    let (app, _pool) = test_app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/en/application").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<select name=\"countryId\" required>"));
}
