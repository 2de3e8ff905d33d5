use crate::models::Locale;
use serde_json::Value;
use std::sync::OnceLock;

const TR_CATALOG: &str = include_str!("../../i18n/tr.json");
const EN_CATALOG: &str = include_str!("../../i18n/en.json");

fn parse_catalog(locale: Locale, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("Translation catalog '{}' is not valid JSON: {}", locale, e);
        Value::Object(Default::default())
    })
}

/// The UI strings for a locale, parsed once per process.
pub fn catalog(locale: Locale) -> &'static Value {
    static TR: OnceLock<Value> = OnceLock::new();
    static EN: OnceLock<Value> = OnceLock::new();
    match locale {
        Locale::Tr => TR.get_or_init(|| parse_catalog(locale, TR_CATALOG)),
        Locale::En => EN.get_or_init(|| parse_catalog(locale, EN_CATALOG)),
    }
}

/// Visa types offered on the application form, in display order.
pub const VISA_TYPES: [&str; 6] = ["tourist", "work", "student", "education", "business", "residence"];

/// Display name of a visa type. Types without a catalog entry show as stored.
pub fn visa_type_label(locale: Locale, visa_type: &str) -> String {
    catalog(locale)
        .get("visa_types")
        .and_then(|types| types.get(visa_type))
        .and_then(Value::as_str)
        .unwrap_or(visa_type)
        .to_string()
}
