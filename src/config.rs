use serde::Deserialize;
use std::fs;
use std::env;
use anyhow::{Context, Result};

use crate::ratelimit::TimeUnit;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub limits: LimitsConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_create_path")]
    pub create_path: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ApiConfig {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.create_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    pub time_unit: TimeUnit,
    pub request_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enable: bool,
    #[serde(default = "default_textfile_path")]
    pub textfile_path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            textfile_path: default_textfile_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://ismp.crpt.ru".to_string()
}

fn default_create_path() -> String {
    "/api/v3/lk/documents/commissioning/contract/create".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_textfile_path() -> String {
    "ismp_client.prom".to_string()
}

pub fn load_config() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path))?;

    parse_config(&config_content, env::var("ISMP_TOKEN").ok())
}

/// Parses a TOML document. A non-empty `token_override` replaces `api.token`.
pub fn parse_config(content: &str, token_override: Option<String>) -> Result<Config> {
    let mut config: Config = toml::from_str(content)
        .with_context(|| "Failed to parse configuration")?;

    if let Some(token) = token_override.filter(|t| !t.is_empty()) {
        config.api.token = token;
    }

    Ok(config)
}
