//! Configuration management for the churn prediction session

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the pre-trained ONNX artifacts
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory containing the artifact files
    #[serde(default = "default_artifacts_dir")]
    pub dir: String,
    /// Classifier file name (required at startup)
    #[serde(default = "default_classifier_file")]
    pub classifier: String,
    /// Scaler file name (required at startup)
    #[serde(default = "default_scaler_file")]
    pub scaler: String,
    /// Explainer file name (optional; the session degrades without it)
    #[serde(default = "default_explainer_file")]
    pub explainer: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

/// Output presentation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Number of attribution rows shown per prediction
    #[serde(default = "default_top_features")]
    pub top_features: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_artifacts_dir() -> String {
    "artifacts".to_string()
}

fn default_classifier_file() -> String {
    "churn_model.onnx".to_string()
}

fn default_scaler_file() -> String {
    "scaler.onnx".to_string()
}

fn default_explainer_file() -> String {
    "churn_explainer.onnx".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

fn default_top_features() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl ArtifactsConfig {
    /// Full path to the classifier artifact
    pub fn classifier_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.classifier)
    }

    /// Full path to the scaler artifact
    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.scaler)
    }

    /// Full path to the explainer artifact
    pub fn explainer_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.explainer)
    }
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            classifier: default_classifier_file(),
            scaler: default_scaler_file(),
            explainer: default_explainer_file(),
            onnx_threads: default_onnx_threads(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_features: default_top_features(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
