use serde::Deserialize;
use std::env;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Persistence; absent means demo mode
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub refresh_token_expiration_days: i64,
    // Identity provider
    pub firebase_api_key: Option<String>,
    pub identity_base_url: String,
    // Summarization
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub summary_model: String,
    pub summary_max_words: usize,
    pub summary_max_tokens: u32,
    // Extraction
    pub extraction_cache_enabled: bool,
    pub max_pdf_bytes: usize,
    pub fetch_timeout_secs: u64,
    // Playback planning
    pub base_words_per_minute: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let optional = |key: &str| lookup(key).filter(|v| is_valid_value(v));

        let config = Config {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080").parse()?,
            environment: match var("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: optional("DATABASE_URL"),
            jwt_secret: var("JWT_SECRET", ""),
            jwt_expiration_hours: var("JWT_EXPIRATION_HOURS", "1").parse()?,
            refresh_token_expiration_days: var("REFRESH_TOKEN_EXPIRATION_DAYS", "30").parse()?,
            firebase_api_key: optional("FIREBASE_API_KEY"),
            identity_base_url: var("IDENTITY_BASE_URL", DEFAULT_IDENTITY_BASE_URL),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_base_url: optional("OPENAI_BASE_URL"),
            summary_model: var("SUMMARY_MODEL", "gpt-4o-mini"),
            summary_max_words: var("SUMMARY_MAX_WORDS", "8000").parse()?,
            summary_max_tokens: var("SUMMARY_MAX_TOKENS", "300").parse()?,
            extraction_cache_enabled: var("EXTRACTION_CACHE_ENABLED", "false").to_lowercase()
                == "true",
            max_pdf_bytes: var("MAX_PDF_BYTES", "10485760").parse()?,
            fetch_timeout_secs: var("FETCH_TIMEOUT_SECS", "15").parse()?,
            base_words_per_minute: var("BASE_WORDS_PER_MINUTE", "150").parse()?,
        };

        if config.database_url.is_some() && config.jwt_secret.is_empty() {
            return Err("JWT_SECRET must be set when DATABASE_URL is configured".into());
        }
        if !(config.base_words_per_minute.is_finite() && config.base_words_per_minute > 0.0) {
            return Err("BASE_WORDS_PER_MINUTE must be a positive number".into());
        }

        Ok(config)
    }

    /// Whether sign-in/sign-up can be offered at all
    pub fn is_auth_configured(&self) -> bool {
        self.database_url.is_some() && self.firebase_api_key.is_some()
    }
}

/// Placeholder values left behind by templated env files count as unset
fn is_valid_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed != "undefined" && trimmed != "null"
}
