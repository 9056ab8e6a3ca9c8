//! Invoice verification service

use std::sync::Arc;

use crate::model::InvoiceVerdict;
use crate::service::forensics::{InvoiceAnalyzer, InvoiceError};

/// Validates uploads and delegates the authenticity decision
pub struct InvoiceService {
    analyzer: Arc<dyn InvoiceAnalyzer>,
}

impl InvoiceService {
    pub fn new(analyzer: Arc<dyn InvoiceAnalyzer>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer_target(&self) -> String {
        self.analyzer.target()
    }

    /// Check an uploaded invoice. Upstream failures are not retried.
    pub async fn verify(
        &self,
        filename: &str,
        document: Vec<u8>,
    ) -> Result<InvoiceVerdict, InvoiceError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(InvoiceError::InvalidInput(
                "filename must not be empty".to_string(),
            ));
        }
        if document.is_empty() {
            return Err(InvoiceError::InvalidInput(
                "invoice document must not be empty".to_string(),
            ));
        }

        match self.analyzer.analyze(filename, document).await {
            Ok(verdict) => {
                tracing::info!(
                    invoice_id = %verdict.invoice_id,
                    is_genuine = verdict.is_genuine,
                    "Invoice verified"
                );
                Ok(verdict)
            }
            Err(e) => {
                tracing::warn!(error = %e, filename = %filename, "Invoice verification failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingAnalyzer {
        calls: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl InvoiceAnalyzer for RecordingAnalyzer {
        async fn analyze(
            &self,
            filename: &str,
            document: Vec<u8>,
        ) -> Result<InvoiceVerdict, InvoiceError> {
            self.calls.lock().push((filename.to_string(), document.len()));
            Ok(InvoiceVerdict {
                is_genuine: false,
                confidence: 0.71,
                invoice_id: filename.to_string(),
            })
        }

        fn target(&self) -> String {
            "recording".to_string()
        }
    }

    #[tokio::test]
    async fn test_verify_passes_document_through() {
        let analyzer = Arc::new(RecordingAnalyzer::default());
        let service = InvoiceService::new(analyzer.clone());

        let verdict = service.verify(" inv-9.pdf ", vec![0; 64]).await.unwrap();
        assert_eq!(verdict.invoice_id, "inv-9.pdf");
        assert!(!verdict.is_genuine);
        assert_eq!(*analyzer.calls.lock(), vec![("inv-9.pdf".to_string(), 64)]);
    }

    #[tokio::test]
    async fn test_empty_upload_never_forwarded() {
        let analyzer = Arc::new(RecordingAnalyzer::default());
        let service = InvoiceService::new(analyzer.clone());

        assert!(matches!(
            service.verify("inv-9.pdf", vec![]).await,
            Err(InvoiceError::InvalidInput(_))
        ));
        assert!(matches!(
            service.verify("  ", vec![1]).await,
            Err(InvoiceError::InvalidInput(_))
        ));
        assert!(analyzer.calls.lock().is_empty());
    }
}
