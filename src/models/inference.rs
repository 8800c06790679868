//! Prediction engine tying the three artifacts together

use crate::attribution::{rank_attributions, AttributionRow};
use crate::config::AppConfig;
use crate::features::FeatureExtractor;
use crate::models::classifier::ChurnClassifier;
use crate::models::explainer::{ChurnExplainer, ExplainerStatus};
use crate::models::loader::ArtifactLoader;
use crate::models::scaler::FeatureScaler;
use crate::types::driver::DriverRecord;
use crate::types::prediction::{ChurnLabel, ChurnPrediction};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Result of one predict action
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    /// Predicted label and churn probability
    pub prediction: ChurnPrediction,
    /// Top attribution rows, absent when the explainer is unavailable or
    /// failed for this record
    pub attributions: Option<Vec<AttributionRow>>,
}

/// Read-only prediction context built once at startup.
///
/// Holds the scaler, the classifier and the (optional) explainer; each
/// predict call is a synchronous scale -> predict -> explain chain.
pub struct PredictionEngine {
    extractor: FeatureExtractor,
    scaler: FeatureScaler,
    classifier: ChurnClassifier,
    explainer: ExplainerStatus,
    top_features: usize,
}

impl PredictionEngine {
    /// Load all artifacts and build the engine.
    ///
    /// Classifier and scaler failures abort startup; an unusable explainer
    /// only downgrades the session to predictions without attribution.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ArtifactLoader::with_threads(config.artifacts.onnx_threads)?;
        let extractor = FeatureExtractor::new();

        let classifier = ChurnClassifier::new(
            loader
                .load(config.artifacts.classifier_path(), "classifier")
                .context("Classifier artifact is required")?,
        );
        let scaler = FeatureScaler::new(
            loader
                .load(config.artifacts.scaler_path(), "scaler")
                .context("Scaler artifact is required")?,
        );
        let explainer = ChurnExplainer::load(
            &loader,
            config.artifacts.explainer_path(),
            extractor.feature_count(),
        );

        info!(
            features = extractor.feature_count(),
            attribution = explainer.is_ready(),
            top_features = config.display.top_features,
            "Prediction engine initialized"
        );

        Ok(Self {
            extractor,
            scaler,
            classifier,
            explainer,
            top_features: config.display.top_features,
        })
    }

    /// Whether attribution tables will be produced
    pub fn has_explainer(&self) -> bool {
        self.explainer.is_ready()
    }

    /// Explainer state, including the downgrade reason when unavailable
    pub fn explainer_status(&self) -> &ExplainerStatus {
        &self.explainer
    }

    /// Number of input features
    pub fn feature_count(&self) -> usize {
        self.extractor.feature_count()
    }

    /// Run the full predict chain for one driver record.
    pub fn predict(&self, record: &DriverRecord) -> Result<PredictionOutcome> {
        let features = self.extractor.extract(record);
        let scaled = self
            .scaler
            .transform(&features)
            .context("Scaling failed")?;

        let output = self.classifier.run(&scaled).context("Inference failed")?;
        let prediction = ChurnPrediction::new(
            ChurnLabel::from_class_index(output.class_index),
            output.probability,
        );

        debug!(
            label = %prediction.label,
            probability = prediction.probability,
            "Record classified"
        );

        let attributions = match &self.explainer {
            ExplainerStatus::Ready(explainer) => match explainer.compute_attributions(&scaled) {
                Ok(scores) => Some(rank_attributions(
                    &self.extractor.feature_names(),
                    &scores,
                    self.top_features,
                )),
                Err(e) => {
                    // Prediction still stands; only this record's table is lost
                    warn!(error = %e, "Attribution failed for this record");
                    None
                }
            },
            ExplainerStatus::Unavailable(_) => None,
        };

        Ok(PredictionOutcome {
            prediction,
            attributions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::Direction;

    #[test]
    fn test_prediction_outcome() {
        let outcome = PredictionOutcome {
            prediction: ChurnPrediction::new(ChurnLabel::Churn, 0.78),
            attributions: Some(vec![AttributionRow {
                feature: "Total Business Value".to_string(),
                score: -4.2,
                rounded: -4.2,
                direction: Direction::AwayFromChurn,
            }]),
        };

        assert_eq!(outcome.prediction.label, ChurnLabel::Churn);
        assert_eq!(outcome.attributions.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_outcome_without_attribution() {
        let outcome = PredictionOutcome {
            prediction: ChurnPrediction::new(ChurnLabel::NoChurn, 0.12),
            attributions: None,
        };

        assert_eq!(outcome.prediction.label, ChurnLabel::NoChurn);
        assert!(outcome.attributions.is_none());
    }
}
