use crate::models::Locale;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

/// Company details shown in the site header and footer.
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    pub name_tr: String,
    pub name_en: String,
    pub phone: String,
    pub email: String,
    pub address_tr: String,
    pub address_en: String,
    pub description_tr: String,
    pub description_en: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct CompanyView {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub description: String,
    pub instagram: String,
    pub logo: String,
}

impl CompanyConfig {
    pub fn localize(&self, locale: Locale) -> CompanyView {
        CompanyView {
            name: locale.pick(&self.name_tr, &self.name_en).to_string(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: locale.pick(&self.address_tr, &self.address_en).to_string(),
            description: locale.pick(&self.description_tr, &self.description_en).to_string(),
            instagram: self.instagram.clone(),
            logo: self.logo.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub company: CompanyConfig,
    // These fields will be populated from the .env file
    pub database_url: String,
    pub allowed_origins: String,
    pub log_level: String,
    pub session_secret_key: String,
    pub use_secure_cookies: bool,
}

/// Accepts either a bare path or a `sqlite://`/`sqlite:` URL.
pub fn database_file_from_url(url: &str) -> &str {
    url.strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url)
}

fn require_env(name: &str) -> Result<String, config::ConfigError> {
    env::var(name).map_err(|_| {
        config::ConfigError::Message(format!(
            "FATAL: Environment variable '{}' is not set in your .env file.",
            name
        ))
    })
}

pub fn validate_session_key(key: &str) -> Result<(), config::ConfigError> {
    if key.len() != 128 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(config::ConfigError::Message(
            "FATAL: 'SESSION_SECRET_KEY' must be 128 hexadecimal characters long (64 bytes).".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_database_url(url: &str) -> Result<(), config::ConfigError> {
    let path = database_file_from_url(url);
    if path.is_empty() || Path::new(path).is_relative() {
        return Err(config::ConfigError::Message(format!(
            "FATAL: The 'DATABASE_URL' in your .env file ('{}') must point to an absolute SQLite file path.",
            url
        )));
    }
    Ok(())
}

impl Config {
    pub fn from_env(env_path: &Path) -> Result<Self, config::ConfigError> {
        dotenvy::from_path(env_path).map_err(|e| {
            config::ConfigError::Message(format!(
                "FATAL: Failed to load .env file from '{}'. Error: {}",
                env_path.display(),
                e
            ))
        })?;

        let database_url = require_env("DATABASE_URL")?;
        validate_database_url(&database_url)?;

        let session_secret_key = require_env("SESSION_SECRET_KEY")?;
        validate_session_key(&session_secret_key)?;

        let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_default();
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let use_secure_cookies = env::var("USE_SECURE_COOKIES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        config::Config::builder()
            .add_source(config::File::new("config/default.toml", config::FileFormat::Toml))
            .set_override("database_url", database_url)?
            .set_override("session_secret_key", session_secret_key)?
            .set_override("allowed_origins", allowed_origins)?
            .set_override("log_level", log_level)?
            .set_override("use_secure_cookies", use_secure_cookies)?
            .build()?
            .try_deserialize()
    }

    /// The SQLite file backing the site.
    pub fn database_file(&self) -> PathBuf {
        PathBuf::from(database_file_from_url(&self.database_url))
    }
}
