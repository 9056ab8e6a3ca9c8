//! Document forensics client
//!
//! Invoice authenticity is decided by an external service. Documents are
//! posted as multipart form data and the service answers with a JSON verdict.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, multipart};
use url::Url;

use crate::model::InvoiceVerdict;

const INVOICE_FIELD: &str = "invoice";

/// Longest upstream error body carried into an error message
const MAX_ERROR_BODY_BYTES: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Forensics service unavailable: {0}")]
    Unavailable(String),

    #[error("Forensics service returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse forensics response: {0}")]
    ParseError(String),
}

/// Something that can judge whether an invoice document is genuine
#[async_trait]
pub trait InvoiceAnalyzer: Send + Sync {
    async fn analyze(&self, filename: &str, document: Vec<u8>)
    -> Result<InvoiceVerdict, InvoiceError>;

    /// Where documents are sent, for diagnostics
    fn target(&self) -> String;
}

/// HTTP client for the forensics service
pub struct ForensicsClient {
    client: Client,
    endpoint: Url,
}

impl ForensicsClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl InvoiceAnalyzer for ForensicsClient {
    async fn analyze(
        &self,
        filename: &str,
        document: Vec<u8>,
    ) -> Result<InvoiceVerdict, InvoiceError> {
        tracing::debug!(
            url = %self.endpoint,
            filename = %filename,
            size = document.len(),
            "Sending invoice to forensics service"
        );

        let part = multipart::Part::bytes(document).file_name(filename.to_string());
        let form = multipart::Form::new().part(INVOICE_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| InvoiceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), size = body.len(), "Forensics service failed");
            return Err(InvoiceError::Upstream {
                status: status.as_u16(),
                body: truncate_body(body, MAX_ERROR_BODY_BYTES),
            });
        }

        let verdict: InvoiceVerdict = response.json().await.map_err(|e| {
            if e.is_timeout() {
                InvoiceError::Unavailable(e.to_string())
            } else {
                InvoiceError::ParseError(format!("Failed to deserialize verdict: {}", e))
            }
        })?;

        if !(0.0..=1.0).contains(&verdict.confidence) {
            return Err(InvoiceError::ParseError(format!(
                "Confidence {} outside [0, 1]",
                verdict.confidence
            )));
        }

        tracing::debug!(
            invoice_id = %verdict.invoice_id,
            is_genuine = verdict.is_genuine,
            confidence = verdict.confidence,
            "Received forensics verdict"
        );

        Ok(verdict)
    }

    fn target(&self) -> String {
        self.endpoint.to_string()
    }
}

fn truncate_body(mut body: String, max: usize) -> String {
    if body.len() > max {
        let mut end = max;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, HttpServer, web};

    /// Start a stand-in forensics service answering every upload with
    /// `status` and `body`, or 400 when the multipart field is missing.
    fn start_stub(status: u16, body: &'static str) -> Url {
        let server = HttpServer::new(move || {
            App::new().route(
                "/upload",
                web::post().to(move |payload: web::Bytes| async move {
                    let text = String::from_utf8_lossy(&payload);
                    if !text.contains("name=\"invoice\"") || !text.contains("filename=\"scan-7.png\"") {
                        return HttpResponse::BadRequest().body("No file uploaded");
                    }
                    HttpResponse::build(StatusCode::from_u16(status).unwrap())
                        .content_type("application/json")
                        .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Url::parse(&format!("http://{}/upload", addr)).unwrap()
    }

    fn client(endpoint: Url) -> ForensicsClient {
        ForensicsClient::new(endpoint, Duration::from_secs(5)).unwrap()
    }

    #[actix_web::test]
    async fn test_genuine_verdict() {
        let url = start_stub(
            200,
            r#"{"isGenuine": true, "confidence": 0.97, "invoiceId": "scan-7.png"}"#,
        );
        let verdict = client(url)
            .analyze("scan-7.png", b"fake image bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(
            verdict,
            InvoiceVerdict {
                is_genuine: true,
                confidence: 0.97,
                invoice_id: "scan-7.png".to_string(),
            }
        );
    }

    #[actix_web::test]
    async fn test_non_success_status_is_upstream_error() {
        let url = start_stub(500, r#"{"error": "model crashed"}"#);
        let result = client(url).analyze("scan-7.png", vec![1, 2, 3]).await;
        assert!(matches!(
            result,
            Err(InvoiceError::Upstream { status: 500, body }) if body.contains("model crashed")
        ));
    }

    #[actix_web::test]
    async fn test_long_error_body_is_truncated() {
        let long: &'static str = Box::leak("x".repeat(4096).into_boxed_str());
        let url = start_stub(500, long);
        let result = client(url).analyze("scan-7.png", vec![1, 2, 3]).await;
        match result {
            Err(InvoiceError::Upstream { status: 500, body }) => {
                assert_eq!(body.len(), MAX_ERROR_BODY_BYTES + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_body("short".to_string(), 512), "short");
        assert_eq!(truncate_body("ééé".to_string(), 3), "é...");
    }

    #[actix_web::test]
    async fn test_malformed_body_is_parse_error() {
        let url = start_stub(200, r#"{"verdict": "genuine"}"#);
        let result = client(url).analyze("scan-7.png", vec![1, 2, 3]).await;
        assert!(matches!(result, Err(InvoiceError::ParseError(_))));
    }

    #[actix_web::test]
    async fn test_confidence_out_of_range_is_parse_error() {
        let url = start_stub(
            200,
            r#"{"isGenuine": false, "confidence": 1.5, "invoiceId": "scan-7.png"}"#,
        );
        let result = client(url).analyze("scan-7.png", vec![1, 2, 3]).await;
        assert!(matches!(result, Err(InvoiceError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_closed_port_is_unavailable() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = Url::parse(&format!("http://127.0.0.1:{}/upload", port)).unwrap();

        let result = client(url).analyze("scan-7.png", vec![1]).await;
        assert!(matches!(result, Err(InvoiceError::Unavailable(_))));
    }
}
