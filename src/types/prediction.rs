//! Prediction result data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Predicted churn class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnLabel {
    Churn,
    NoChurn,
}

impl ChurnLabel {
    /// Map the classifier's class index onto a label (1 = churn)
    pub fn from_class_index(index: i64) -> Self {
        if index == 1 {
            ChurnLabel::Churn
        } else {
            ChurnLabel::NoChurn
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::Churn => "Churn",
            ChurnLabel::NoChurn => "No Churn",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prediction for one submitted driver record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPrediction {
    /// Predicted class
    pub label: ChurnLabel,

    /// Probability of the churn class (0.0 - 1.0)
    pub probability: f64,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl ChurnPrediction {
    /// Create a new prediction stamped with the current time
    pub fn new(label: ChurnLabel, probability: f64) -> Self {
        Self {
            label,
            probability,
            timestamp: Utc::now(),
        }
    }

    /// Churn probability as a percentage with two decimals, e.g. "54.32%"
    pub fn probability_percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class_index() {
        assert_eq!(ChurnLabel::from_class_index(1), ChurnLabel::Churn);
        assert_eq!(ChurnLabel::from_class_index(0), ChurnLabel::NoChurn);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(ChurnLabel::Churn.to_string(), "Churn");
        assert_eq!(ChurnLabel::NoChurn.to_string(), "No Churn");
    }

    #[test]
    fn test_probability_percent() {
        let prediction = ChurnPrediction::new(ChurnLabel::Churn, 0.5432);
        assert_eq!(prediction.probability_percent(), "54.32%");

        let certain = ChurnPrediction::new(ChurnLabel::NoChurn, 0.0);
        assert_eq!(certain.probability_percent(), "0.00%");
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = ChurnPrediction::new(ChurnLabel::Churn, 0.78);

        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: ChurnPrediction = serde_json::from_str(&json).unwrap();

        assert_eq!(prediction.label, deserialized.label);
        assert_eq!(prediction.probability, deserialized.probability);
    }
}
