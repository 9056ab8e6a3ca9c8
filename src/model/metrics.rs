use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Performance snapshot of a named detection model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetric {
    pub model: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ModelMetric {
    pub fn new(model: &str, accuracy: f64, precision: f64, recall: f64, f1_score: f64) -> Self {
        Self {
            model: model.to_string(),
            accuracy,
            precision,
            recall,
            f1_score,
        }
    }

    /// Each score must lie in [0, 1]
    pub fn scores_in_range(&self) -> bool {
        [self.accuracy, self.precision, self.recall, self.f1_score]
            .iter()
            .all(|score| (0.0..=1.0).contains(score))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RetrainResult {
    pub success: bool,
    pub message: String,
}
