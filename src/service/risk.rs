//! Transaction screening
//!
//! A transaction is flagged when its amount exceeds the configured threshold
//! or either account carries a watched prefix. Flagged verdicts can be
//! recorded as pending alerts for review.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::model::{Alert, AlertStatus, RiskConfig, Transaction, TransactionVerdict};
use crate::service::alerts::{AlertStore, AlertStoreError};

pub const ETHICAL_CONFIDENCE: f64 = 0.95;
pub const FLAGGED_CONFIDENCE: f64 = 0.87;
pub const FLAGGED_REASON: &str = "High-value transaction with suspicious pattern";

const MIN_ACCOUNT_LEN: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum RiskError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to record alert: {0}")]
    AlertStore(#[from] AlertStoreError),
}

/// Screening rule parameters
#[derive(Debug, Clone)]
pub struct RiskRules {
    amount_threshold: Decimal,
    flagged_from_prefixes: Vec<String>,
    flagged_to_prefixes: Vec<String>,
}

impl Default for RiskRules {
    fn default() -> Self {
        Self::from(&RiskConfig::default())
    }
}

impl From<&RiskConfig> for RiskRules {
    fn from(config: &RiskConfig) -> Self {
        Self {
            amount_threshold: config.amount_threshold,
            flagged_from_prefixes: config.flagged_from_prefixes.clone(),
            flagged_to_prefixes: config.flagged_to_prefixes.clone(),
        }
    }
}

impl RiskRules {
    pub fn is_flagged(&self, tx: &Transaction) -> bool {
        tx.amount > self.amount_threshold
            || has_prefix(&tx.from_account, &self.flagged_from_prefixes)
            || has_prefix(&tx.to_account, &self.flagged_to_prefixes)
    }
}

fn has_prefix(account: &str, prefixes: &[String]) -> bool {
    prefixes
        .iter()
        .any(|p| !p.is_empty() && account.starts_with(p.as_str()))
}

/// Reject submissions the screening rule is not defined for
pub fn validate_transaction(tx: &Transaction) -> Result<(), RiskError> {
    if tx.amount <= Decimal::ZERO {
        return Err(RiskError::InvalidInput(
            "Amount must be a positive number".to_string(),
        ));
    }

    for (field, account) in [("fromAccount", &tx.from_account), ("toAccount", &tx.to_account)] {
        if account.chars().count() < MIN_ACCOUNT_LEN {
            return Err(RiskError::InvalidInput(format!(
                "{} must be at least {} characters",
                field, MIN_ACCOUNT_LEN
            )));
        }
    }

    Ok(())
}

/// Screen a transaction. Each flagged verdict gets a fresh alert id.
pub fn evaluate_transaction(
    rules: &RiskRules,
    tx: &Transaction,
) -> Result<TransactionVerdict, RiskError> {
    validate_transaction(tx)?;

    if rules.is_flagged(tx) {
        Ok(TransactionVerdict {
            is_ethical: false,
            confidence: FLAGGED_CONFIDENCE,
            reason: Some(FLAGGED_REASON.to_string()),
            alert_id: Some(format!("alert-{}", Uuid::new_v4())),
        })
    } else {
        Ok(TransactionVerdict {
            is_ethical: true,
            confidence: ETHICAL_CONFIDENCE,
            reason: None,
            alert_id: None,
        })
    }
}

/// Screens transactions and optionally files flagged ones as alerts
pub struct RiskDecisionService {
    rules: RiskRules,
    alerts: Arc<AlertStore>,
    record_alerts: bool,
}

impl RiskDecisionService {
    pub fn new(config: &RiskConfig, alerts: Arc<AlertStore>) -> Self {
        Self {
            rules: RiskRules::from(config),
            alerts,
            record_alerts: config.record_alerts,
        }
    }

    pub fn check_transaction(&self, tx: &Transaction) -> Result<TransactionVerdict, RiskError> {
        let verdict = evaluate_transaction(&self.rules, tx)?;

        tracing::debug!(
            is_ethical = verdict.is_ethical,
            payment_type = ?tx.payment_type,
            currency = %tx.currency,
            "Transaction screened"
        );

        if self.record_alerts {
            if let (Some(alert_id), Some(reason)) = (&verdict.alert_id, &verdict.reason) {
                self.alerts.insert(Alert {
                    id: alert_id.clone(),
                    transaction_id: format!("tx-{}", Uuid::new_v4()),
                    from_account: tx.from_account.clone(),
                    to_account: tx.to_account.clone(),
                    amount: tx.amount,
                    currency: tx.currency,
                    timestamp: tx.timestamp,
                    status: AlertStatus::Pending,
                    reason: reason.clone(),
                    invoice_id: None,
                })?;
            }
        }

        Ok(verdict)
    }
}
