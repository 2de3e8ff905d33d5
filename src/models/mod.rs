use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod db_operations;
pub mod payloads;
pub mod views;

/// The two languages the site is published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Tr,
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Tr, Locale::En];
    pub const DEFAULT: Locale = Locale::Tr;

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// Picks the variant of a bilingual field that belongs to this locale.
    pub fn pick<'a>(&self, tr: &'a str, en: &'a str) -> &'a str {
        match self {
            Locale::Tr => tr,
            Locale::En => en,
        }
    }

    pub fn other(&self) -> Locale {
        match self {
            Locale::Tr => Locale::En,
            Locale::En => Locale::Tr,
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tr" => Ok(Locale::Tr),
            "en" => Ok(Locale::En),
            other => Err(UnknownValue(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownValue(pub String);

impl fmt::Display for UnknownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownValue {}

// Closed string sets stored as TEXT columns. The database carries a matching
// CHECK constraint for each of them.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(UnknownValue(other.to_string())),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: UnknownValue| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum!(
    /// Follow-up state of a visa application lead.
    ApplicationStatus {
        New => "new",
        Contacted => "contacted",
        Processing => "processing",
        Completed => "completed",
    }
);

text_enum!(
    /// Follow-up state of a contact form message.
    MessageStatus {
        New => "new",
        Read => "read",
        Replied => "replied",
    }
);

text_enum!(
    UserRole {
        Admin => "admin",
        Editor => "editor",
    }
);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CountryWithProgramCount {
    #[serde(flatten)]
    pub country: Country,
    pub program_count: i64,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CountryWithPrograms {
    #[serde(flatten)]
    pub country: Country,
    pub visa_programs: Vec<VisaProgram>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisaProgram {
    pub id: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VisaProgramWithCountry {
    #[serde(flatten)]
    pub program: VisaProgram,
    pub country: Option<Country>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_count: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub slug: String,
    pub title_tr: String,
    pub title_en: String,
    pub excerpt_tr: String,
    pub excerpt_en: String,
    pub content_tr: String,
    pub content_en: String,
    pub author: String,
    pub category: String,
    pub published: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question_tr: String,
    pub question_en: String,
    pub answer_tr: String,
    pub answer_en: String,
    pub order: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub slug: String,
    pub title_tr: String,
    pub title_en: String,
    pub content_tr: String,
    pub content_en: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub country_id: Option<String>,
    pub visa_type: String,
    pub program_id: Option<String>,
    pub message: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithRelations {
    #[serde(flatten)]
    pub application: Application,
    pub country: Option<Country>,
    pub program: Option<VisaProgram>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A staff account. The password hash never leaves the database layer.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub countries_count: i64,
    pub visas_count: i64,
    pub blog_posts_count: i64,
    pub faqs_count: i64,
    pub applications_count: i64,
    pub messages_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_applications: Vec<ApplicationWithRelations>,
    pub recent_messages: Vec<ContactMessage>,
    pub user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_only_supported_codes() {
        assert_eq!("tr".parse::<Locale>(), Ok(Locale::Tr));
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
        assert!("TR".parse::<Locale>().is_err());
    }

    #[test]
    fn locale_picks_matching_variant() {
        assert_eq!(Locale::Tr.pick("Almanya", "Germany"), "Almanya");
        assert_eq!(Locale::En.pick("Almanya", "Germany"), "Germany");
        assert_eq!(Locale::En.other(), Locale::Tr);
    }

    #[test]
    fn status_sets_are_closed() {
        assert_eq!("processing".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Processing));
        assert!("read".parse::<ApplicationStatus>().is_err());
        assert_eq!("replied".parse::<MessageStatus>(), Ok(MessageStatus::Replied));
        assert!("contacted".parse::<MessageStatus>().is_err());
        assert_eq!(ApplicationStatus::ALL.len(), 4);
        assert_eq!(MessageStatus::ALL.len(), 3);
    }

    #[test]
    fn status_serializes_as_lowercase_text() {
        let json = serde_json::to_string(&ApplicationStatus::Contacted).unwrap();
        assert_eq!(json, "\"contacted\"");
        let parsed: MessageStatus = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(parsed, MessageStatus::Read);
    }
}
