//! Feature scaler wrapping the pre-fit scaler artifact

use crate::models::loader::LoadedArtifact;
use anyhow::{Context, Result};
use ort::value::Tensor;
use std::sync::RwLock;

/// Applies the pre-fit numeric transform to raw feature vectors.
///
/// The artifact is opaque; this wrapper only enforces that the transform
/// preserves the feature arity.
pub struct FeatureScaler {
    artifact: RwLock<LoadedArtifact>,
}

impl FeatureScaler {
    /// Wrap a loaded scaler artifact
    pub fn new(artifact: LoadedArtifact) -> Self {
        Self {
            artifact: RwLock::new(artifact),
        }
    }

    /// Transform a raw feature vector into the scaled space the classifier
    /// and explainer were trained on.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f32>> {
        let mut artifact = self
            .artifact
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create scaler input tensor")?;

        let input_name = artifact.input_name.clone();
        let outputs = artifact.session.run(ort::inputs![&input_name => input_tensor])?;

        for (_, output) in outputs.iter() {
            if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
                if data.len() != features.len() {
                    anyhow::bail!(
                        "Scaler returned {} values for {} features",
                        data.len(),
                        features.len()
                    );
                }
                return Ok(data.to_vec());
            }
        }

        anyhow::bail!("Scaler produced no float tensor output")
    }
}
