//! In-memory alert store
//!
//! Holds flagged cases keyed by alert id in insertion order. The store is an
//! owned value shared through `Arc`; it has no persistence and its contents
//! last for the lifetime of the process unless `reset` is called.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::model::{Alert, AlertFilter, AlertStatus, Currency};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AlertStoreError {
    #[error("Alert not found: {0}")]
    NotFound(String),

    #[error("Alert {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AlertStatus,
        to: AlertStatus,
    },

    #[error("Alert already exists: {0}")]
    Duplicate(String),
}

pub struct AlertStore {
    alerts: RwLock<IndexMap<String, Alert>>,
    initial: Vec<Alert>,
    enforce_transitions: bool,
}

impl AlertStore {
    /// Create a store holding `alerts`, in the given order
    pub fn new(alerts: Vec<Alert>, enforce_transitions: bool) -> Self {
        let store = Self {
            alerts: RwLock::new(IndexMap::new()),
            initial: alerts,
            enforce_transitions,
        };
        store.reset();
        store
    }

    /// Create a store preloaded with the demo alerts
    pub fn with_seed_data(enforce_transitions: bool) -> Self {
        Self::new(seed_alerts(), enforce_transitions)
    }

    /// Restore the contents the store was constructed with
    pub fn reset(&self) {
        let mut alerts = self.alerts.write();
        alerts.clear();
        for alert in &self.initial {
            alerts.insert(alert.id.clone(), alert.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.read().len()
    }

    pub fn enforces_transitions(&self) -> bool {
        self.enforce_transitions
    }

    /// All alerts matching `filter`, in insertion order
    pub fn list(&self, filter: &AlertFilter) -> Vec<Alert> {
        self.alerts
            .read()
            .values()
            .filter(|alert| filter.matches(alert))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Alert, AlertStoreError> {
        self.alerts
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AlertStoreError::NotFound(id.to_string()))
    }

    pub fn insert(&self, alert: Alert) -> Result<(), AlertStoreError> {
        let mut alerts = self.alerts.write();
        if alerts.contains_key(&alert.id) {
            return Err(AlertStoreError::Duplicate(alert.id));
        }

        tracing::info!(alert_id = %alert.id, transaction_id = %alert.transaction_id, "Alert recorded");
        alerts.insert(alert.id.clone(), alert);
        Ok(())
    }

    /// Overwrite the status of an alert and return the updated record.
    ///
    /// Re-applying the current status succeeds without changes. When
    /// transitions are enforced, moves the review workflow does not offer
    /// are rejected. Concurrent updates to the same id are last-write-wins.
    pub fn update_status(&self, id: &str, status: AlertStatus) -> Result<Alert, AlertStoreError> {
        let mut alerts = self.alerts.write();
        let alert = alerts
            .get_mut(id)
            .ok_or_else(|| AlertStoreError::NotFound(id.to_string()))?;

        if alert.status == status {
            tracing::debug!(alert_id = %id, status = %status, "Alert already has requested status");
            return Ok(alert.clone());
        }

        if self.enforce_transitions && !alert.status.can_transition_to(status) {
            return Err(AlertStoreError::InvalidTransition {
                id: id.to_string(),
                from: alert.status,
                to: status,
            });
        }

        tracing::info!(alert_id = %id, from = %alert.status, to = %status, "Alert status updated");
        alert.status = status;
        Ok(alert.clone())
    }
}

fn seed_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn seed_alert(
    n: u32,
    from_account: &str,
    to_account: &str,
    amount: i64,
    currency: Currency,
    timestamp: &str,
    status: AlertStatus,
    reason: &str,
    invoice_id: Option<&str>,
) -> Alert {
    Alert {
        id: format!("alert-{n:03}"),
        transaction_id: format!("tx-{n:03}"),
        from_account: from_account.to_string(),
        to_account: to_account.to_string(),
        amount: Decimal::from(amount),
        currency,
        timestamp: seed_timestamp(timestamp),
        status,
        reason: reason.to_string(),
        invoice_id: invoice_id.map(str::to_string),
    }
}

/// Demo alerts shown on a fresh install
pub fn seed_alerts() -> Vec<Alert> {
    vec![
        seed_alert(
            1,
            "1234567890",
            "0987654321",
            15_000,
            Currency::Usd,
            "2023-03-15T10:30:00Z",
            AlertStatus::Pending,
            "Unusual transaction pattern detected",
            None,
        ),
        seed_alert(
            2,
            "2345678901",
            "1098765432",
            25_000,
            Currency::Eur,
            "2023-03-16T14:45:00Z",
            AlertStatus::UnderReview,
            "Multiple high-value transactions in short period",
            Some("inv-002"),
        ),
        seed_alert(
            3,
            "3456789012",
            "2109876543",
            9_500,
            Currency::Usd,
            "2023-03-17T09:15:00Z",
            AlertStatus::Pending,
            "Transaction with high-risk jurisdiction",
            None,
        ),
        seed_alert(
            4,
            "4567890123",
            "3210987654",
            12_000,
            Currency::Gbp,
            "2023-03-18T16:20:00Z",
            AlertStatus::Pending,
            "Forged invoice detected",
            Some("inv-004"),
        ),
        seed_alert(
            5,
            "5678901234",
            "4321098765",
            30_000,
            Currency::Usd,
            "2023-03-19T11:10:00Z",
            AlertStatus::Escalated,
            "Structured transactions to avoid reporting",
            None,
        ),
    ]
}
