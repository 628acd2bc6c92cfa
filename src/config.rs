use std::env;
use thiserror::Error;

use crate::services::{DEFAULT_GEO_API_URL, DEFAULT_MAIL_API_URL};

const DEFAULT_CLUSTER: &str = "cluster0.mongodb.net";
const DEFAULT_DATABASE: &str = "finalportfolio";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub api_url: String,
    pub sender: String,
    pub api_key: String,
    pub owner: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub database_name: String,
    pub mail: MailConfig,
    pub geo_api_url: String,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => 3000,
        };

        let mongodb_uri = match var("MONGODB_URI") {
            Some(uri) => uri,
            None => atlas_uri(
                &required("DB_USER")?,
                &required("DB_PASS")?,
                &var("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string()),
            ),
        };

        let sender = required("EMAIL_USER")?;
        let mail = MailConfig {
            api_url: var("MAIL_API_URL").unwrap_or_else(|| DEFAULT_MAIL_API_URL.to_string()),
            api_key: required("EMAIL_PASS")?,
            owner: var("OWNER_EMAIL").unwrap_or_else(|| sender.clone()),
            sender,
        };

        let cors_origins = var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri,
            database_name: var("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            mail,
            geo_api_url: var("GEO_API_URL").unwrap_or_else(|| DEFAULT_GEO_API_URL.to_string()),
            cors_origins,
        })
    }
}

fn atlas_uri(user: &str, password: &str, cluster: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority&appName=Cluster0",
        urlencoding::encode(user),
        urlencoding::encode(password),
        cluster
    )
}
