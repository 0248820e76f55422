// src/config.rs
use std::env;
use thiserror::Error;
use url::Url;

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    supabase_url: String,
    supabase_anon_key: String,
    storage_bucket: String,
    public_origin: Option<String>,
    cookie_secure: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_storage_bucket() -> String {
    "meal-pics".into()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates required keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let listen_addr = non_empty("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let supabase_url = non_empty("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let parsed = Url::parse(supabase_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("SUPABASE_URL: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "SUPABASE_URL must be an http(s) URL".into(),
            ));
        }

        let supabase_anon_key =
            non_empty("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        let storage_bucket = non_empty("STORAGE_BUCKET").unwrap_or_else(default_storage_bucket);
        if storage_bucket.contains('/') {
            return Err(ConfigError::Invalid(
                "STORAGE_BUCKET must be a bare bucket name".into(),
            ));
        }

        let public_origin = non_empty("PUBLIC_ORIGIN")
            .map(|origin| origin.trim().trim_end_matches('/').to_string());

        let cookie_secure = match non_empty("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::Invalid(format!("COOKIE_SECURE must be a boolean, got {raw}"))
            })?,
            None => public_origin
                .as_deref()
                .is_some_and(|origin| origin.starts_with("https://")),
        };

        Ok(Self {
            listen_addr,
            supabase_url: supabase_url.trim().to_string(),
            supabase_anon_key,
            storage_bucket,
            public_origin,
            cookie_secure,
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn supabase_url(&self) -> &str {
        &self.supabase_url
    }

    pub fn supabase_anon_key(&self) -> &str {
        &self.supabase_anon_key
    }

    pub fn storage_bucket(&self) -> &str {
        &self.storage_bucket
    }

    /// Origin used in emailed confirmation links. When unset, handlers fall
    /// back to the request's `Host` header.
    pub fn public_origin(&self) -> Option<&str> {
        self.public_origin.as_deref()
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure
    }
}
