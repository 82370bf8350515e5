//! Configuration for the blogpost service

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding the document-store connection URI
pub const URI_ENV: &str = "LOGININFO";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Connection URI; `mongodb://`, `mongodb+srv://` or `memory://`
    #[serde(default)]
    pub mongodb_uri: String,

    /// Database holding the posts collection
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection posts are written to and read from
    #[serde(default = "default_collection")]
    pub collection: String,

    /// The single browser origin allowed to call the API
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Report failed inserts to the caller instead of echoing the post
    #[serde(default)]
    pub strict_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_uri: String::new(),
            database: default_database(),
            collection: default_collection(),
            allowed_origin: default_allowed_origin(),
            http_port: default_http_port(),
            strict_writes: false,
        }
    }
}

impl Config {
    /// Load config from an optional TOML file, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Overlay values found through `lookup` (normally the process environment)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(URI_ENV) {
            self.mongodb_uri = uri;
        }
        if let Some(database) = lookup("BLOGPOST_DATABASE") {
            self.database = database;
        }
        if let Some(collection) = lookup("BLOGPOST_COLLECTION") {
            self.collection = collection;
        }
        if let Some(origin) = lookup("BLOGPOST_ALLOWED_ORIGIN") {
            self.allowed_origin = origin;
        }
        if let Some(port) = lookup("BLOGPOST_PORT") {
            self.http_port = port
                .parse()
                .map_err(|_| Error::Config(format!("BLOGPOST_PORT is not a valid port: {}", port)))?;
        }
        if let Some(strict) = lookup("BLOGPOST_STRICT_WRITES") {
            self.strict_writes = parse_bool(&strict).ok_or_else(|| {
                Error::Config(format!("BLOGPOST_STRICT_WRITES is not a boolean: {}", strict))
            })?;
        }
        Ok(())
    }

    /// Fail fast on values the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.mongodb_uri.trim().is_empty() {
            return Err(Error::Config(format!(
                "{} is not set; it must hold the document-store connection URI",
                URI_ENV
            )));
        }
        if self.database.is_empty() || self.collection.is_empty() {
            return Err(Error::Config("database and collection names must not be empty".into()));
        }
        if axum::http::HeaderValue::from_str(&self.allowed_origin).is_err() {
            return Err(Error::Config(format!(
                "allowed_origin is not a valid origin: {}",
                self.allowed_origin
            )));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Default value functions

fn default_database() -> String {
    "test".to_string()
}

fn default_collection() -> String {
    "test_post".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_http_port() -> u16 {
    5000
}
