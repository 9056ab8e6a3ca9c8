//! Transaction submissions and the verdicts produced for them

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cheque,
    CreditCard,
    Reinvestment,
    Ach,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
        };
        f.write_str(code)
    }
}

/// A transaction submitted for screening. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub from_account: String,
    pub to_account: String,
    pub payment_type: PaymentType,
    pub currency: Currency,
    /// Accepted as a JSON number or a decimal string
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of screening a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionVerdict {
    pub is_ethical: bool,
    pub confidence: f64,
    /// Present only when the transaction was flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Present only when the transaction was flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<String>,
}

/// Outcome of an invoice authenticity check, as reported by the forensics service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceVerdict {
    pub is_genuine: bool,
    pub confidence: f64,
    pub invoice_id: String,
}
