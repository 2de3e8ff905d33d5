use crate::config::Config;
use crate::helper::i18n_helpers;
use crate::models::db_operations::DbError;
use crate::models::Locale;
use actix_web::{
    dev, error::InternalError, http::StatusCode, web, FromRequest, HttpRequest, HttpResponse,
};
use std::future::{ready, Ready};
use tera::{Context, Tera};

/// "/tr/countries/germany" -> "/countries/germany", "/en" -> "".
pub fn path_without_locale(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx..],
        None => "",
    }
}

/// Context shared by every public page: locale, UI strings, company details
/// and the address of the same page in the other language.
pub fn base_context(locale: Locale, config: &Config, path: &str) -> Context {
    let rest = path_without_locale(path);
    let mut ctx = Context::new();
    ctx.insert("locale", locale.as_str());
    ctx.insert("other_locale", locale.other().as_str());
    ctx.insert("current_path", rest);
    ctx.insert("alternate_url", &format!("/{}{}", locale.other(), rest));
    ctx.insert("t", i18n_helpers::catalog(locale));
    ctx.insert("company", &config.company.localize(locale));
    ctx
}

pub fn render_page(tera: &Tera, template: &str, ctx: &Context) -> HttpResponse {
    render_with_status(tera, template, ctx, StatusCode::OK)
}

pub fn render_not_found(tera: &Tera, ctx: &Context) -> HttpResponse {
    render_with_status(tera, "site/not_found.html", ctx, StatusCode::NOT_FOUND)
}

pub fn render_with_status(tera: &Tera, template: &str, ctx: &Context, status: StatusCode) -> HttpResponse {
    match tera.render(template, ctx) {
        Ok(rendered) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(rendered),
        Err(err) => {
            log::error!("Template rendering error in '{}': {}", template, err);
            HttpResponse::InternalServerError().body("Error rendering page.")
        }
    }
}

/// Renders a storage failure: missing rows become the 404 page, anything else a 500.
pub fn render_db_error(tera: &Tera, ctx: &Context, err: DbError) -> HttpResponse {
    match err {
        DbError::NotFound(what) => {
            log::info!("Page data not found: {}", what);
            render_not_found(tera, ctx)
        }
        other => {
            log::error!("Failed to load page data: {}", other);
            HttpResponse::InternalServerError().body("Error loading page.")
        }
    }
}

/// The locale taken from the `{locale}` path segment together with the base
/// context for it. An unsupported locale short-circuits with the 404 page.
pub struct SitePage {
    pub locale: Locale,
    pub ctx: Context,
}

impl FromRequest for SitePage {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut dev::Payload) -> Self::Future {
        ready(site_page(req))
    }
}

fn site_page(req: &HttpRequest) -> Result<SitePage, actix_web::Error> {
    let (config, tera) = match (req.app_data::<web::Data<Config>>(), req.app_data::<web::Data<Tera>>()) {
        (Some(config), Some(tera)) => (config, tera),
        _ => {
            log::error!("Config or Tera missing from app data");
            return Err(actix_web::error::ErrorInternalServerError("Server misconfigured"));
        }
    };

    let raw = req.match_info().get("locale").unwrap_or_default();
    match raw.parse::<Locale>() {
        Ok(locale) => Ok(SitePage { locale, ctx: base_context(locale, config, req.path()) }),
        Err(_) => {
            let fallback = format!("/{}", Locale::DEFAULT);
            let ctx = base_context(Locale::DEFAULT, config, &fallback);
            Err(InternalError::from_response("unsupported locale", render_not_found(tera, &ctx)).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_prefix_is_removed() {
        assert_eq!(path_without_locale("/tr/countries/germany"), "/countries/germany");
        assert_eq!(path_without_locale("/en/blog"), "/blog");
        assert_eq!(path_without_locale("/en"), "");
        assert_eq!(path_without_locale("/tr/"), "/");
    }
}
