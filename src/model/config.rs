use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::ModelMetric;

const ENV_CONFIG_PATH: &str = "FRAUD_API_CONFIG_PATH";
const ENV_FORENSICS_URL: &str = "FRAUD_API_FORENSICS_URL";
const ENV_FORENSICS_TIMEOUT: &str = "FRAUD_API_FORENSICS_TIMEOUT_SECS";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const DEFAULT_FORENSICS_URL: &str = "http://localhost:5000/upload";
const DEFAULT_FORENSICS_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Parameters of the transaction screening rule
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Amounts strictly above this are flagged
    pub amount_threshold: Decimal,
    pub flagged_from_prefixes: Vec<String>,
    pub flagged_to_prefixes: Vec<String>,
    /// Insert an alert into the store for every flagged transaction
    pub record_alerts: bool,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            amount_threshold: Decimal::from(10_000),
            flagged_from_prefixes: vec!["999".to_string()],
            flagged_to_prefixes: vec!["888".to_string()],
            record_alerts: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Start with the demo alerts loaded
    pub seed: bool,
    /// Reject status changes the review workflow does not offer
    pub enforce_transitions: bool,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            seed: true,
            enforce_transitions: true,
        }
    }
}

/// Invoice forensics collaborator settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FORENSICS_URL.to_string(),
            timeout_secs: DEFAULT_FORENSICS_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl InvoiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.endpoint)
    }
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
    #[serde(default)]
    pub invoice: InvoiceConfig,
    /// Replaces the built-in model metrics when present
    #[serde(default)]
    pub metrics: Option<Vec<ModelMetric>>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub risk: RiskConfig,
    pub alerts: AlertsConfig,
    pub invoice: InvoiceConfig,
    pub metrics: Option<Vec<ModelMetric>>,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            risk: RiskConfig::default(),
            alerts: AlertsConfig::default(),
            invoice: InvoiceConfig::default(),
            metrics: None,
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        let mut invoice = file.invoice;
        if let Ok(endpoint) = std::env::var(ENV_FORENSICS_URL) {
            invoice.endpoint = endpoint;
        }
        if let Some(timeout) = std::env::var(ENV_FORENSICS_TIMEOUT)
            .ok()
            .and_then(|t| t.parse().ok())
        {
            invoice.timeout_secs = timeout;
        }

        Self {
            risk: file.risk,
            alerts: file.alerts,
            invoice,
            metrics: file.metrics,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    /// Parse YAML config contents; an empty document yields the defaults
    pub fn parse(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
