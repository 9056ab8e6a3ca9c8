pub mod alerts;
pub mod forensics;
pub mod invoice;
pub mod metrics;
pub mod risk;

pub use alerts::AlertStore;
pub use forensics::{ForensicsClient, InvoiceAnalyzer};
pub use invoice::InvoiceService;
pub use metrics::MetricsRegistry;
pub use risk::RiskDecisionService;
