//! Artifact loading and inference components

pub mod classifier;
pub mod explainer;
pub mod inference;
pub mod loader;
pub mod scaler;

pub use classifier::ChurnClassifier;
pub use explainer::{ChurnExplainer, ExplainerStatus, ExplainerUnavailable};
pub use inference::{PredictionEngine, PredictionOutcome};
pub use loader::ArtifactLoader;
pub use scaler::FeatureScaler;
