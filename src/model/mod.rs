pub mod alert;
pub mod config;
pub mod metrics;
pub mod transaction;

pub use alert::{Alert, AlertFilter, AlertStatus, StatusFilter, UnknownStatus};
pub use config::{Config, RiskConfig};
pub use metrics::{ModelMetric, RetrainResult};
pub use transaction::{Currency, InvoiceVerdict, PaymentType, Transaction, TransactionVerdict};
