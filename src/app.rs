//! Application state and service initialization
//!
//! Builds the service graph from configuration. Every store is owned here and
//! handed to Actix-web handlers through `web::Data`.

use std::sync::Arc;

use actix_web::web;

use crate::model::Config;
use crate::service::{
    AlertStore, ForensicsClient, InvoiceAnalyzer, InvoiceService, MetricsRegistry,
    RiskDecisionService,
};

/// Application state containing all services and shared resources
#[derive(Clone)]
pub struct AppState {
    /// Flagged cases awaiting review
    pub alerts: Arc<AlertStore>,
    /// Model performance snapshot
    pub metrics: Arc<MetricsRegistry>,
    /// Transaction screening
    pub risk: Arc<RiskDecisionService>,
    /// Invoice verification through the forensics service
    pub invoices: Arc<InvoiceService>,
    /// Upper bound on uploaded document size
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Initialize all services and build application state
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let endpoint = config
            .invoice
            .endpoint_url()
            .map_err(|e| AppError::InvalidConfig(format!("invoice.endpoint: {}", e)))?;

        let forensics = ForensicsClient::new(endpoint, config.invoice.timeout())
            .map_err(|e| AppError::HttpClient(e.to_string()))?;

        Ok(Self::with_analyzer(config, Arc::new(forensics)))
    }

    /// Build application state around an existing invoice analyzer
    pub fn with_analyzer(config: &Config, analyzer: Arc<dyn InvoiceAnalyzer>) -> Self {
        let alerts = Arc::new(Self::build_alert_store(config));
        let metrics = Arc::new(Self::build_metrics_registry(config));
        let risk = Arc::new(RiskDecisionService::new(&config.risk, Arc::clone(&alerts)));
        let invoices = Arc::new(InvoiceService::new(analyzer));

        Self {
            alerts,
            metrics,
            risk,
            invoices,
            max_upload_bytes: config.invoice.max_upload_bytes,
        }
    }

    /// Register every service as handler data
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(Arc::clone(&self.alerts)))
            .app_data(web::Data::from(Arc::clone(&self.metrics)))
            .app_data(web::Data::from(Arc::clone(&self.risk)))
            .app_data(web::Data::from(Arc::clone(&self.invoices)))
            .app_data(web::PayloadConfig::new(self.max_upload_bytes));
    }

    fn build_alert_store(config: &Config) -> AlertStore {
        let enforce = config.alerts.enforce_transitions;
        if config.alerts.seed {
            AlertStore::with_seed_data(enforce)
        } else {
            AlertStore::new(vec![], enforce)
        }
    }

    fn build_metrics_registry(config: &Config) -> MetricsRegistry {
        match &config.metrics {
            None => MetricsRegistry::with_defaults(),
            Some(metrics) => match MetricsRegistry::new(metrics.clone()) {
                Ok(registry) => {
                    tracing::info!(models = metrics.len(), "Loaded model metrics from configuration");
                    registry
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid model metrics in configuration, using defaults");
                    MetricsRegistry::with_defaults()
                }
            },
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlertFilter, ModelMetric};

    #[test]
    fn test_default_state() {
        let state = AppState::new(&Config::default()).unwrap();
        assert_eq!(state.alerts.len(), 5);
        assert!(state.alerts.enforces_transitions());
        assert_eq!(state.metrics.list().len(), 4);
        assert_eq!(state.invoices.analyzer_target(), "http://localhost:5000/upload");
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = Config::default();
        config.invoice.endpoint = "not a url".to_string();
        assert!(matches!(
            AppState::new(&config),
            Err(AppError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unseeded_store() {
        let mut config = Config::default();
        config.alerts.seed = false;
        let state = AppState::new(&config).unwrap();
        assert!(state.alerts.list(&AlertFilter::default()).is_empty());
    }

    #[test]
    fn test_invalid_configured_metrics_fall_back() {
        let mut config = Config::default();
        config.metrics = Some(vec![ModelMetric::new("Broken", 2.0, 0.1, 0.1, 0.1)]);
        let state = AppState::new(&config).unwrap();
        assert_eq!(state.metrics.list().len(), 4);

        config.metrics = Some(vec![ModelMetric::new("XGBoost", 0.9, 0.9, 0.9, 0.9)]);
        let state = AppState::new(&config).unwrap();
        assert_eq!(state.metrics.list().len(), 1);
    }
}
