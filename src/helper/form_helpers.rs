use crate::error::ApiError;
use crate::helper::sanitization_helpers::{sanitize_rich_content, strip_all_html};
use crate::models::db_operations::leads_db_operations::{NewApplication, NewContactMessage};
use crate::models::payloads::{
    ApplicationSubmission, BlogPostInput, ContactSubmission, CountryInput, FaqInput, PageInput,
    VisaProgramInput,
};
use crate::models::UnknownValue;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn is_valid_slug(slug: &str) -> bool {
    slug_regex().is_match(slug)
}

/// A trimmed, non-empty value or `None`.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn plain(value: &str) -> String {
    strip_all_html(value.trim())
}

fn min_chars(value: &str, min: usize, message: &str) -> Result<(), ApiError> {
    if value.chars().count() < min {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(())
}

fn check_email(email: &str) -> Result<(), ApiError> {
    if !is_valid_email(email) {
        return Err(ApiError::Validation("Invalid email address".to_string()));
    }
    Ok(())
}

// ====================================================================
// ========================= PUBLIC LEADS =============================
// ====================================================================

pub fn validate_application(body: &ApplicationSubmission) -> Result<NewApplication, ApiError> {
    let (name, email, phone, country_id, visa_type) = match (
        present(&body.name),
        present(&body.email),
        present(&body.phone),
        present(&body.country_id),
        present(&body.visa_type),
    ) {
        (Some(n), Some(e), Some(p), Some(c), Some(v)) => (n, e, p, c, v),
        _ => return Err(ApiError::missing_fields()),
    };

    min_chars(name, 2, "Name must be at least 2 characters")?;
    check_email(email)?;
    min_chars(phone, 10, "Phone number must be at least 10 characters")?;

    Ok(NewApplication {
        name: plain(name),
        email: email.to_string(),
        phone: plain(phone),
        country_id: Some(country_id.to_string()),
        visa_type: plain(visa_type),
        program_id: present(&body.program_id).map(str::to_string),
        message: present(&body.message).map(plain).unwrap_or_default(),
    })
}

pub fn validate_contact(body: &ContactSubmission) -> Result<NewContactMessage, ApiError> {
    let (name, email, message) = match (present(&body.name), present(&body.email), present(&body.message)) {
        (Some(n), Some(e), Some(m)) => (n, e, m),
        _ => return Err(ApiError::missing_fields()),
    };

    min_chars(name, 2, "Name must be at least 2 characters")?;
    check_email(email)?;
    min_chars(message, 10, "Message must be at least 10 characters")?;

    Ok(NewContactMessage {
        name: plain(name),
        email: email.to_string(),
        subject: present(&body.subject).map(plain).unwrap_or_default(),
        message: plain(message),
    })
}

// ====================================================================
// ========================= ADMIN CONTENT ============================
// ====================================================================

fn require_all(values: &[&str]) -> Result<(), ApiError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ApiError::missing_fields());
    }
    Ok(())
}

fn clean_slug(slug: &str) -> Result<String, ApiError> {
    let slug = slug.trim();
    if !is_valid_slug(slug) {
        return Err(ApiError::Validation(
            "Slug may only contain lowercase letters, digits and hyphens".to_string(),
        ));
    }
    Ok(slug.to_string())
}

fn optional_id(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn clean_country(input: CountryInput) -> Result<CountryInput, ApiError> {
    require_all(&[&input.slug, &input.name_tr, &input.name_en])?;
    Ok(CountryInput {
        slug: clean_slug(&input.slug)?,
        name_tr: plain(&input.name_tr),
        name_en: plain(&input.name_en),
        description_tr: plain(&input.description_tr),
        description_en: plain(&input.description_en),
        content_tr: sanitize_rich_content(&input.content_tr),
        content_en: sanitize_rich_content(&input.content_en),
        flag_image: optional_id(input.flag_image),
        featured: input.featured,
        order: input.order,
    })
}

pub fn clean_program(input: VisaProgramInput) -> Result<VisaProgramInput, ApiError> {
    require_all(&[&input.slug, &input.title_tr, &input.title_en, &input.visa_type])?;
    Ok(VisaProgramInput {
        slug: clean_slug(&input.slug)?,
        title_tr: plain(&input.title_tr),
        title_en: plain(&input.title_en),
        excerpt_tr: plain(&input.excerpt_tr),
        excerpt_en: plain(&input.excerpt_en),
        content_tr: sanitize_rich_content(&input.content_tr),
        content_en: sanitize_rich_content(&input.content_en),
        visa_type: plain(&input.visa_type),
        country_id: optional_id(input.country_id),
        featured: input.featured,
        order: input.order,
    })
}

pub fn clean_post(input: BlogPostInput) -> Result<BlogPostInput, ApiError> {
    require_all(&[&input.slug, &input.title_tr, &input.title_en])?;
    Ok(BlogPostInput {
        slug: clean_slug(&input.slug)?,
        title_tr: plain(&input.title_tr),
        title_en: plain(&input.title_en),
        excerpt_tr: plain(&input.excerpt_tr),
        excerpt_en: plain(&input.excerpt_en),
        content_tr: sanitize_rich_content(&input.content_tr),
        content_en: sanitize_rich_content(&input.content_en),
        author: plain(&input.author),
        category: plain(&input.category),
        published: input.published,
        published_at: input.published_at,
    })
}

pub fn clean_faq(input: FaqInput) -> Result<FaqInput, ApiError> {
    require_all(&[&input.question_tr, &input.question_en, &input.answer_tr, &input.answer_en])?;
    Ok(FaqInput {
        question_tr: plain(&input.question_tr),
        question_en: plain(&input.question_en),
        answer_tr: sanitize_rich_content(&input.answer_tr),
        answer_en: sanitize_rich_content(&input.answer_en),
        order: input.order,
        published: input.published,
    })
}

pub fn clean_page(input: PageInput) -> Result<PageInput, ApiError> {
    require_all(&[&input.slug, &input.title_tr, &input.title_en])?;
    Ok(PageInput {
        slug: clean_slug(&input.slug)?,
        title_tr: plain(&input.title_tr),
        title_en: plain(&input.title_en),
        content_tr: sanitize_rich_content(&input.content_tr),
        content_en: sanitize_rich_content(&input.content_en),
    })
}

/// Parses a lead status, answering 400 for anything outside the closed set.
pub fn parse_status<T>(status: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = UnknownValue>,
{
    status
        .trim()
        .parse::<T>()
        .map_err(|e| ApiError::Validation(format!("Invalid status: {}", e)))
}

// ====================================================================
// ============================ PROFILE ===============================
// ====================================================================

pub fn validate_new_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ApiError::missing_fields());
    }
    check_email(email)?;
    Ok(email.to_string())
}

pub fn validate_new_password(current: &str, new: &str) -> Result<(), ApiError> {
    if current.is_empty() || new.is_empty() {
        return Err(ApiError::missing_fields());
    }
    min_chars(new, MIN_PASSWORD_LENGTH, "New password must be at least 6 characters")
}
