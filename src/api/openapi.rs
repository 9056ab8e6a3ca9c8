//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::alerts::{AlertTransitions, UpdateStatusRequest, UpdateStatusResponse};
use crate::api::error::ErrorResponse;
use crate::api::health::{DependencyHealth, HealthStatus, ReadinessStatus};
use crate::model::{
    Alert, AlertStatus, Currency, InvoiceVerdict, ModelMetric, PaymentType, RetrainResult,
    StatusFilter, Transaction, TransactionVerdict,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fraud Screening API",
        description = "Transaction screening, invoice forensics and alert review"
    ),
    paths(
        crate::api::health::liveness,
        crate::api::health::readiness,
        crate::api::transactions::check_transaction,
        crate::api::invoices::upload_invoice,
        crate::api::alerts::list_alerts,
        crate::api::alerts::get_alert,
        crate::api::alerts::get_alert_transitions,
        crate::api::alerts::update_alert_status,
        crate::api::metrics::list_model_metrics,
        crate::api::metrics::retrain_model,
    ),
    components(schemas(
        Transaction,
        TransactionVerdict,
        PaymentType,
        Currency,
        InvoiceVerdict,
        Alert,
        AlertStatus,
        StatusFilter,
        AlertTransitions,
        UpdateStatusRequest,
        UpdateStatusResponse,
        ModelMetric,
        RetrainResult,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth,
    )),
    tags(
        (name = "transactions", description = "Ethical screening of payments"),
        (name = "invoices", description = "Invoice authenticity checks"),
        (name = "alerts", description = "Review of flagged transactions"),
        (name = "metrics", description = "Detection model performance"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI document as YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use serde_json::Value;

    use super::*;

    #[actix_web::test]
    async fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health/live",
            "/health/ready",
            "/v1/transactions/check",
            "/v1/invoices",
            "/v1/alerts",
            "/v1/alerts/{id}",
            "/v1/alerts/{id}/transitions",
            "/v1/alerts/{id}/status",
            "/v1/metrics/models",
            "/v1/metrics/retrain",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }

    #[actix_web::test]
    async fn test_serve_json_and_yaml() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        let doc: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(doc["info"]["title"], "Fraud Screening API");

        let req = test::TestRequest::get().uri("/openapi.yaml").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("/v1/alerts/{id}/status"));
    }
}
