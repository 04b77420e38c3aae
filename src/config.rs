use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::analysis::{AnalysisConfig, VariationMode};
use crate::error::{Error, Result};
use crate::scoring::EngagementWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub api_url: String,
    pub auth_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout_ms: u64,
    pub default_subreddit: String,
    pub language: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            api_url: "https://scraper-api.decodo.com/v2/scrape".to_string(),
            auth_token: None,
            username: None,
            password: None,
            timeout_ms: 60_000,
            default_subreddit: "programming".to_string(),
            language: "en".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn basic_token(&self) -> Option<String> {
        if let Some(token) = self.auth_token.as_ref().filter(|t| !t.trim().is_empty()) {
            return Some(token.trim().to_string());
        }
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(STANDARD.encode(format!("{}:{}", user, pass))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/viral_content_data.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub platforms: Vec<String>,
    pub keywords: Vec<String>,
    pub limit: usize,
    pub time_range: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 2 * 60 * 60,
            platforms: vec!["reddit".to_string(), "google".to_string(), "bing".to_string()],
            keywords: ["viral", "trending", "popular", "hot"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            limit: 50,
            time_range: "24h".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub log_level: Option<String>,
    pub weights: EngagementWeights,
    pub analysis: AnalysisConfig,
    pub scraper: ScraperConfig,
    pub store: StoreConfig,
    pub scheduler: SchedulerConfig,
    pub server: ServerConfig,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents =
                    std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
                Self::from_toml(&contents)?
            }
            _ => AnalyzerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| Error::Config(format!("failed to parse config: {}", err)))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    fn apply_env_overrides(&mut self) {
        if let Some(url) =
            non_empty_var("SCRAPER_API_URL").or_else(|| non_empty_var("DECODO_SCRAPE_API_URL"))
        {
            self.scraper.api_url = url;
        }
        if let Some(token) =
            non_empty_var("SCRAPER_AUTH_TOKEN").or_else(|| non_empty_var("DECODO_AUTH_TOKEN"))
        {
            self.scraper.auth_token = Some(token);
        }
        if let Some(user) = non_empty_var("SCRAPER_USERNAME") {
            self.scraper.username = Some(user);
        }
        if let Some(pass) = non_empty_var("SCRAPER_PASSWORD") {
            self.scraper.password = Some(pass);
        }
        if let Some(path) = non_empty_var("CONTENT_STORE_PATH") {
            self.store.path = PathBuf::from(path);
        }
        if let Some(value) = non_empty_var("SCRAPE_INTERVAL_SECS") {
            match value.parse::<u64>() {
                Ok(secs) if secs > 0 => self.scheduler.interval_secs = secs,
                _ => tracing::warn!(value = %value, "ignoring invalid SCRAPE_INTERVAL_SECS"),
            }
        }
        if let Some(value) = non_empty_var("VARIATION_MODE") {
            match VariationMode::parse(&value) {
                Some(mode) => self.analysis.variation = mode,
                None => tracing::warn!(value = %value, "ignoring unknown VARIATION_MODE"),
            }
        }
        if let Some(value) = non_empty_var("VARIATION_SEED") {
            if let Ok(seed) = value.parse::<u64>() {
                self.analysis.seed = seed;
            }
        }
        if let Some(level) = non_empty_var("LOG_LEVEL") {
            self.log_level = Some(level);
        }
        if let Some(port) = non_empty_var("PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn default_config_path() -> Option<PathBuf> {
    non_empty_var("ANALYZER_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analyzer.toml")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AnalyzerConfig::from_toml(
            r#"
            [scheduler]
            interval_secs = 60

            [analysis]
            variation = "seeded"
            seed = 9

            [weights]
            shares = 7.5
            "#,
        )
        .unwrap();

        assert_eq!(config.scheduler.interval_secs, 60);
        assert_eq!(config.scheduler.limit, 50);
        assert_eq!(config.analysis.variation, VariationMode::Seeded);
        assert_eq!(config.analysis.seed, 9);
        assert_eq!(config.weights.shares, 7.5);
        assert_eq!(config.weights.likes, 2.0);
        assert_eq!(config.scraper.default_subreddit, "programming");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = AnalyzerConfig::from_toml("scheduler = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn basic_token_prefers_explicit_token() {
        let mut scraper = ScraperConfig {
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
            ..Default::default()
        };
        assert_eq!(scraper.basic_token().as_deref(), Some("dXNlcjpwYXNz"));

        scraper.auth_token = Some("explicit".to_string());
        assert_eq!(scraper.basic_token().as_deref(), Some("explicit"));

        assert!(ScraperConfig::default().basic_token().is_none());
    }
}
