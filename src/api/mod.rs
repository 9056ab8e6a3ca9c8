//! HTTP API
//!
//! Each submodule exposes a `configure` function registering its routes.

pub mod alerts;
pub mod error;
pub mod health;
pub mod invoices;
pub mod metrics;
pub mod openapi;
pub mod transactions;

use actix_web::web;

pub use error::ApiError;

/// JSON bodies that fail to deserialize surface as `invalid_input`
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into())
}

/// Query strings that fail to deserialize surface as `invalid_input`
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into())
}

/// Configure all routes and extractor settings
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .configure(health::configure)
        .configure(openapi::configure)
        .configure(transactions::configure)
        .configure(invoices::configure)
        .configure(alerts::configure)
        .configure(metrics::configure);
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::app::AppState;
    use crate::model::{Config, InvoiceVerdict};
    use crate::service::forensics::{InvoiceAnalyzer, InvoiceError};

    /// Analyzer that answers without any network access
    pub enum StubAnalyzer {
        Genuine,
        Unreachable,
        Failing,
    }

    #[async_trait]
    impl InvoiceAnalyzer for StubAnalyzer {
        async fn analyze(
            &self,
            filename: &str,
            _document: Vec<u8>,
        ) -> Result<InvoiceVerdict, InvoiceError> {
            match self {
                StubAnalyzer::Genuine => Ok(InvoiceVerdict {
                    is_genuine: true,
                    confidence: 0.93,
                    invoice_id: filename.to_string(),
                }),
                StubAnalyzer::Unreachable => {
                    Err(InvoiceError::Unavailable("connection refused".to_string()))
                }
                StubAnalyzer::Failing => Err(InvoiceError::Upstream {
                    status: 500,
                    body: "internal error".to_string(),
                }),
            }
        }

        fn target(&self) -> String {
            "stub".to_string()
        }
    }

    /// Initialise the full application around an `AppState`
    macro_rules! init_app {
        ($state:expr) => {
            actix_web::test::init_service(
                actix_web::App::new()
                    .configure(|cfg| $state.configure(cfg))
                    .configure($crate::api::configure),
            )
        };
    }
    pub(crate) use init_app;

    pub fn state_with(analyzer: StubAnalyzer) -> AppState {
        AppState::with_analyzer(&Config::default(), Arc::new(analyzer))
    }

    pub fn state() -> AppState {
        state_with(StubAnalyzer::Genuine)
    }
}
