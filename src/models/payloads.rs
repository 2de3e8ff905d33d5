//! JSON bodies accepted by the public lead endpoints and the admin API.
//!
//! Text fields default to an empty string so a missing field and a blank
//! field are reported the same way, by the validation in `form_helpers`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country_id: Option<String>,
    pub visa_type: Option<String>,
    pub program_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryInput {
    pub slug: String,
    pub name_tr: String,
    pub name_en: String,
    pub description_tr: String,
    pub description_en: String,
    pub content_tr: String,
    pub content_en: String,
    pub flag_image: Option<String>,
    pub featured: bool,
    pub order: i64,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct VisaProgramInput {
    pub slug: String,
    pub title_tr: String,
    pub title_en: String,
    pub excerpt_tr: String,
    pub excerpt_en: String,
    pub content_tr: String,
    pub content_en: String,
    pub visa_type: String,
    pub country_id: Option<String>,
    pub featured: bool,
    pub order: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostInput {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title_tr: String,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub excerpt_tr: String,
    #[serde(default)]
    pub excerpt_en: String,
    #[serde(default)]
    pub content_tr: String,
    #[serde(default)]
    pub content_en: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FaqInput {
    #[serde(default)]
    pub question_tr: String,
    #[serde(default)]
    pub question_en: String,
    #[serde(default)]
    pub answer_tr: String,
    #[serde(default)]
    pub answer_en: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub published: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInput {
    pub slug: String,
    pub title_tr: String,
    pub title_en: String,
    pub content_tr: String,
    pub content_en: String,
}

/// Body of the lead status PATCH requests. Parsed into the matching status
/// enum by the handler so unknown values get a 400 with a readable message.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailUpdate {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
