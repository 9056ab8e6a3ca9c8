//! Invoice authenticity endpoint

use actix_web::error::PayloadError;
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::InvoiceVerdict;
use crate::service::InvoiceService;

/// Query parameters for an invoice upload
#[derive(Debug, Deserialize, IntoParams)]
pub struct UploadInvoiceParams {
    /// Original file name of the document
    pub filename: String,
}

/// Check an invoice document for forgery
///
/// The request body is the raw document. It is forwarded to the forensics
/// service, whose verdict is returned unchanged.
#[utoipa::path(
    post,
    path = "/v1/invoices",
    params(UploadInvoiceParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Invoice analysed", body = InvoiceVerdict),
        (status = 400, description = "Empty document or filename", body = ErrorResponse),
        (status = 413, description = "Document exceeds the upload limit", body = ErrorResponse),
        (status = 502, description = "Forensics service failed", body = ErrorResponse),
        (status = 503, description = "Forensics service unreachable", body = ErrorResponse)
    ),
    tag = "invoices"
)]
#[post("/v1/invoices")]
pub async fn upload_invoice(
    service: web::Data<InvoiceService>,
    query: web::Query<UploadInvoiceParams>,
    body: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    let body = body.map_err(payload_error)?;
    let verdict = service.verify(&query.filename, body.to_vec()).await?;
    Ok(HttpResponse::Ok().json(verdict))
}

fn payload_error(err: actix_web::Error) -> ApiError {
    match err.as_error::<PayloadError>() {
        Some(PayloadError::Overflow) => ApiError::PayloadTooLarge(err.to_string()),
        _ => ApiError::InvalidInput(err.to_string()),
    }
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_invoice);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use std::sync::Arc;

    use crate::api::test_support::{self, StubAnalyzer, init_app};
    use crate::app::AppState;
    use crate::model::Config;

    async fn upload(analyzer: StubAnalyzer, uri: &str, payload: &'static [u8]) -> (StatusCode, Value) {
        let state = test_support::state_with(analyzer);
        let app = init_app!(state).await;

        let req = test::TestRequest::post()
            .uri(uri)
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_upload_returns_verdict() {
        let (status, body) =
            upload(StubAnalyzer::Genuine, "/v1/invoices?filename=inv-12.png", b"\x89PNG").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "isGenuine": true, "confidence": 0.93, "invoiceId": "inv-12.png" })
        );
    }

    #[actix_web::test]
    async fn test_empty_document_rejected() {
        let (status, body) =
            upload(StubAnalyzer::Genuine, "/v1/invoices?filename=inv-12.png", b"").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");
    }

    #[actix_web::test]
    async fn test_missing_filename_rejected() {
        let (status, body) = upload(StubAnalyzer::Genuine, "/v1/invoices", b"data").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_input");
    }

    #[actix_web::test]
    async fn test_upstream_failures() {
        let (status, body) =
            upload(StubAnalyzer::Unreachable, "/v1/invoices?filename=a.png", b"data").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "upstream_unavailable");

        let (status, body) =
            upload(StubAnalyzer::Failing, "/v1/invoices?filename=a.png", b"data").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "upstream_error");
    }

    #[actix_web::test]
    async fn test_oversized_document_rejected() {
        let mut config = Config::default();
        config.invoice.max_upload_bytes = 8;
        let state = AppState::with_analyzer(&config, Arc::new(StubAnalyzer::Genuine));
        let app = init_app!(state).await;

        let req = test::TestRequest::post()
            .uri("/v1/invoices?filename=big.png")
            .set_payload(vec![0u8; 64])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "payload_too_large");
        assert!(body["request_id"].as_str().is_some());
    }
}
