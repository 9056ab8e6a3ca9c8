//! Alerts raised for human review and their review lifecycle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::Currency;

/// Review stage of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    UnderReview,
    Resolved,
    Escalated,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 4] = [
        AlertStatus::Pending,
        AlertStatus::UnderReview,
        AlertStatus::Resolved,
        AlertStatus::Escalated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Pending => "pending",
            AlertStatus::UnderReview => "under_review",
            AlertStatus::Resolved => "resolved",
            AlertStatus::Escalated => "escalated",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AlertStatus::Resolved)
    }

    /// Statuses a reviewer may move an alert to from this one.
    ///
    /// Resolved is terminal. Nothing ever moves back to pending.
    pub fn next_statuses(&self) -> Vec<AlertStatus> {
        match self {
            AlertStatus::Resolved => vec![],
            AlertStatus::Pending => vec![
                AlertStatus::Resolved,
                AlertStatus::UnderReview,
                AlertStatus::Escalated,
            ],
            AlertStatus::UnderReview => vec![AlertStatus::Resolved, AlertStatus::Escalated],
            AlertStatus::Escalated => vec![AlertStatus::Resolved, AlertStatus::UnderReview],
        }
    }

    /// Setting the current status again is always permitted
    pub fn can_transition_to(&self, next: AlertStatus) -> bool {
        *self == next || self.next_statuses().contains(&next)
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown alert status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AlertStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status filter for listing alerts; `all` matches every status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    UnderReview,
    Resolved,
    Escalated,
}

impl StatusFilter {
    pub fn matches(&self, status: AlertStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == AlertStatus::Pending,
            StatusFilter::UnderReview => status == AlertStatus::UnderReview,
            StatusFilter::Resolved => status == AlertStatus::Resolved,
            StatusFilter::Escalated => status == AlertStatus::Escalated,
        }
    }
}

/// Criteria for listing alerts
#[derive(Debug, Clone, Default)]
pub struct AlertFilter {
    /// Case-insensitive substring of id, transaction id or either account
    pub search_term: Option<String>,
    pub status: StatusFilter,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        if !self.status.matches(alert.status) {
            return false;
        }

        match self.search_term.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    &alert.id,
                    &alert.transaction_id,
                    &alert.from_account,
                    &alert.to_account,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }
}

/// A transaction or document flagged for human review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub transaction_id: String,
    pub from_account: String,
    pub to_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub currency: Currency,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
}
