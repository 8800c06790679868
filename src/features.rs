//! Feature extraction for churn model inference.
//!
//! Turns a driver record into the flat feature vector the artifacts expect.
//! The order must match the column order used during training.

use crate::types::driver::{DriverRecord, FIELD_COUNT};

/// Feature extractor that flattens driver records into model input features.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract features from a driver record, in training column order.
    pub fn extract(&self, record: &DriverRecord) -> Vec<f32> {
        let mut features = Vec::with_capacity(FIELD_COUNT);

        features.push(record.age as f32);
        features.push(record.gender as f32);
        features.push(record.income as f32);
        features.push(record.joining_designation as f32);
        features.push(record.total_business_value as f32);
        features.push(record.education_level as f32);
        features.push(record.last_grade as f32);
        features.push(record.income_increased as f32);
        features.push(record.last_rating as f32);
        features.push(record.grade_improved as f32);
        features.push(record.rating_change as f32);

        features
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FIELD_COUNT
    }

    /// Get feature names (matching the training column order).
    pub fn feature_names(&self) -> Vec<&'static str> {
        vec![
            "Age",
            "Gender",
            "Income",
            "Joining Designation",
            "Total Business Value",
            "Education_Level",
            "Last_grade",
            "Income_increased",
            "Last_rat",
            "Grade_improved",
            "Rating_change",
        ]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
