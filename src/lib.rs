//! Driver Churn Predictor Library
//!
//! Interactive churn prediction over pre-trained ONNX artifacts: a
//! classifier, a feature scaler and an optional attribution explainer are
//! loaded once at startup, then each submitted driver record runs through
//! scale, predict and (when available) a top-5 attribution ranking.

pub mod attribution;
pub mod config;
pub mod features;
pub mod form;
pub mod models;
pub mod report;
pub mod types;

pub use attribution::{rank_attributions, AttributionRow, Direction};
pub use config::AppConfig;
pub use features::FeatureExtractor;
pub use form::DriverForm;
pub use models::inference::{PredictionEngine, PredictionOutcome};
pub use types::{driver::DriverRecord, prediction::ChurnLabel, prediction::ChurnPrediction};
