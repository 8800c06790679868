//! Optional attribution explainer wrapping the explainer artifact

use crate::models::loader::{ArtifactLoader, LoadedArtifact};
use anyhow::{Context, Result};
use ort::value::Tensor;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;

/// Why the explainer is not available for this session
#[derive(Debug, Clone)]
pub enum ExplainerUnavailable {
    /// The artifact file does not exist
    ArtifactMissing(PathBuf),
    /// The artifact exists but could not be deserialized
    Unreadable(String),
    /// The artifact loaded but its graph does not fit this model
    Incompatible(String),
}

impl fmt::Display for ExplainerUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplainerUnavailable::ArtifactMissing(path) => {
                write!(f, "explainer artifact not found at {}", path.display())
            }
            ExplainerUnavailable::Unreadable(reason) => {
                write!(f, "explainer artifact could not be read: {}", reason)
            }
            ExplainerUnavailable::Incompatible(reason) => {
                write!(f, "explainer artifact is incompatible: {}", reason)
            }
        }
    }
}

/// Outcome of loading the optional explainer artifact.
///
/// A session without an explainer still predicts; it only skips the
/// attribution table.
pub enum ExplainerStatus {
    Ready(ChurnExplainer),
    Unavailable(ExplainerUnavailable),
}

impl ExplainerStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ExplainerStatus::Ready(_))
    }
}

/// Computes per-feature attribution scores for one scaled record.
///
/// Exporters disagree on the output layout: a single array of scores, or
/// one plane per class. `compute_attributions` normalizes both to exactly
/// one score per feature, read in churn direction, so downstream ranking
/// never sees the ambiguity.
pub struct ChurnExplainer {
    artifact: RwLock<LoadedArtifact>,
    feature_count: usize,
}

impl ChurnExplainer {
    /// Load the explainer artifact, degrading to a typed reason instead of
    /// failing the session.
    pub fn load<P: AsRef<Path>>(
        loader: &ArtifactLoader,
        path: P,
        feature_count: usize,
    ) -> ExplainerStatus {
        let path = path.as_ref();

        if !path.exists() {
            let reason = ExplainerUnavailable::ArtifactMissing(path.to_path_buf());
            warn!(reason = %reason, "Continuing without attribution");
            return ExplainerStatus::Unavailable(reason);
        }

        let artifact = match loader.load(path, "explainer") {
            Ok(artifact) => artifact,
            Err(e) => {
                let reason = ExplainerUnavailable::Unreadable(format!("{:#}", e));
                warn!(reason = %reason, "Continuing without attribution");
                return ExplainerStatus::Unavailable(reason);
            }
        };

        if artifact.session.inputs.len() != 1 || artifact.session.outputs.is_empty() {
            let reason = ExplainerUnavailable::Incompatible(format!(
                "expected 1 input and at least 1 output, found {} and {}",
                artifact.session.inputs.len(),
                artifact.session.outputs.len()
            ));
            warn!(reason = %reason, "Continuing without attribution");
            return ExplainerStatus::Unavailable(reason);
        }

        ExplainerStatus::Ready(Self {
            artifact: RwLock::new(artifact),
            feature_count,
        })
    }

    /// Compute one attribution score per feature for a scaled record.
    pub fn compute_attributions(&self, scaled: &[f32]) -> Result<Vec<f64>> {
        let mut artifact = self
            .artifact
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let shape = vec![1_i64, scaled.len() as i64];
        let input_tensor = Tensor::from_array((shape, scaled.to_vec()))
            .context("Failed to create explainer input tensor")?;

        let input_name = artifact.input_name.clone();
        let outputs = artifact.session.run(ort::inputs![&input_name => input_tensor])?;

        for (_, output) in outputs.iter() {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                let dims: Vec<i64> = shape.iter().copied().collect();
                return normalize_attributions(&dims, data, self.feature_count);
            }
        }

        anyhow::bail!("Explainer produced no float tensor output")
    }
}

/// Normalize an explainer output tensor to one score per feature.
///
/// Accepts a single score array (`[n]`, `[1, n]`) or one plane per class
/// (`[2, n]`, `[1, 2, n]`, `[2, 1, n]`); with per-class planes the churn
/// class plane is selected so the signs read in churn direction.
fn normalize_attributions(dims: &[i64], data: &[f32], feature_count: usize) -> Result<Vec<f64>> {
    let n = feature_count;
    let take = |slice: &[f32]| slice.iter().map(|&v| v as f64).collect::<Vec<f64>>();

    match dims {
        [len] if *len as usize == n => Ok(take(data)),
        [1, len] if *len as usize == n => Ok(take(data)),
        [2, len] if *len as usize == n => Ok(take(&data[n..2 * n])),
        [1, 2, len] if *len as usize == n => Ok(take(&data[n..2 * n])),
        [2, 1, len] if *len as usize == n => Ok(take(&data[n..2 * n])),
        _ => anyhow::bail!(
            "Unexpected attribution shape {:?} for {} features",
            dims,
            n
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_array_passthrough() {
        let data: Vec<f32> = (0..11).map(|i| i as f32 / 10.0).collect();
        let scores = normalize_attributions(&[11], &data, 11).unwrap();
        assert_eq!(scores.len(), 11);
        assert!((scores[3] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_batched_single_array() {
        let data = vec![0.5_f32; 11];
        let scores = normalize_attributions(&[1, 11], &data, 11).unwrap();
        assert_eq!(scores.len(), 11);
    }

    #[test]
    fn test_per_class_planes_select_churn_class() {
        // Class 0 plane all -1.0, class 1 (churn) plane all 2.0
        let mut data = vec![-1.0_f32; 11];
        data.extend(vec![2.0_f32; 11]);

        for dims in [&[2_i64, 11][..], &[1, 2, 11][..], &[2, 1, 11][..]] {
            let scores = normalize_attributions(dims, &data, 11).unwrap();
            assert_eq!(scores.len(), 11);
            assert!(scores.iter().all(|&s| (s - 2.0).abs() < 1e-6));
        }
    }

    #[test]
    fn test_wrong_arity_is_an_error() {
        let data = vec![0.0_f32; 7];
        assert!(normalize_attributions(&[7], &data, 11).is_err());
        assert!(normalize_attributions(&[1, 7], &data, 11).is_err());
    }

    #[test]
    fn test_unavailable_reason_display() {
        let missing = ExplainerUnavailable::ArtifactMissing(PathBuf::from("artifacts/x.onnx"));
        assert!(missing.to_string().contains("not found"));

        let unreadable = ExplainerUnavailable::Unreadable("bad protobuf".to_string());
        assert!(unreadable.to_string().contains("bad protobuf"));
    }
}
