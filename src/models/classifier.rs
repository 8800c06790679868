//! Churn classifier wrapping the pre-trained model artifact

use crate::models::loader::LoadedArtifact;
use anyhow::{Context, Result};
use ort::memory::Allocator;
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, Tensor};
use std::sync::RwLock;
use tracing::{debug, warn};

/// Raw classifier output for one record
#[derive(Debug, Clone, Copy)]
pub struct ClassifierOutput {
    /// Predicted class index (1 = churn)
    pub class_index: i64,
    /// Probability of the churn class (0.0 - 1.0)
    pub probability: f64,
}

/// Binary churn classifier backed by an ONNX session.
///
/// Different exporters emit the probability output in different shapes
/// (plain float tensor or seq(map(int64, float32))); this wrapper accepts
/// either and always reports the churn-class probability.
pub struct ChurnClassifier {
    artifact: RwLock<LoadedArtifact>,
}

impl ChurnClassifier {
    /// Wrap a loaded classifier artifact
    pub fn new(artifact: LoadedArtifact) -> Self {
        Self {
            artifact: RwLock::new(artifact),
        }
    }

    /// Run the classifier on a scaled feature vector.
    pub fn run(&self, features: &[f32]) -> Result<ClassifierOutput> {
        let mut artifact = self
            .artifact
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create classifier input tensor")?;

        let input_name = artifact.input_name.clone();
        let output_name = artifact.output_name.clone();
        let artifact_name = artifact.name.clone();

        let outputs = artifact.session.run(ort::inputs![&input_name => input_tensor])?;

        let probability = Self::extract_probability(&outputs, &output_name, &artifact_name)?;
        let class_index = Self::extract_label(&outputs).unwrap_or_else(|| {
            debug!(
                artifact = %artifact_name,
                "No label output, thresholding probability at 0.5"
            );
            i64::from(probability >= 0.5)
        });

        Ok(ClassifierOutput {
            class_index,
            probability,
        })
    }

    /// Extract the predicted class index from an int64 label output, if the
    /// exporter emitted one.
    fn extract_label(outputs: &ort::session::SessionOutputs) -> Option<i64> {
        for (name, output) in outputs.iter() {
            if !name.contains("label") {
                continue;
            }
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                return data.first().copied();
            }
        }
        None
    }

    /// Extract the churn probability from the model output.
    /// Handles both tensor outputs and seq(map) outputs.
    fn extract_probability(
        outputs: &ort::session::SessionOutputs,
        output_name: &str,
        artifact_name: &str,
    ) -> Result<f64> {
        // First, try the named probability output
        if let Some(output) = outputs.get(output_name) {
            let dtype = output.dtype();

            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                let dims: Vec<i64> = shape.iter().copied().collect();
                let prob = churn_prob_from_tensor(&dims, data);
                debug!(artifact = %artifact_name, prob = prob, "Extracted from tensor");
                return Ok(prob);
            }

            if DynSequenceValueType::can_downcast(&dtype) {
                if let Ok(prob) = Self::extract_from_sequence_map(output, artifact_name) {
                    return Ok(prob);
                }
            }
        }

        // Fallback: iterate all outputs and try extraction
        for (name, output) in outputs.iter() {
            // Skip the label output
            if name.contains("label") {
                continue;
            }

            let dtype = output.dtype();

            if let Ok(tensor) = output.try_extract_tensor::<f32>() {
                let (shape, data) = tensor;
                let dims: Vec<i64> = shape.iter().copied().collect();
                let prob = churn_prob_from_tensor(&dims, data);
                debug!(artifact = %artifact_name, output = %name, prob = prob, "Extracted from tensor (fallback)");
                return Ok(prob);
            }

            if DynSequenceValueType::can_downcast(&dtype) {
                if let Ok(prob) = Self::extract_from_sequence_map(&output, artifact_name) {
                    return Ok(prob);
                }
            }
        }

        warn!(artifact = %artifact_name, "Could not extract probability, using default 0.5");
        Ok(0.5)
    }

    /// Extract the churn probability from seq(map(int64, float)) output,
    /// the format used by some classifier exporters.
    fn extract_from_sequence_map(
        output: &ort::value::DynValue,
        artifact_name: &str,
    ) -> Result<f64> {
        let allocator = Allocator::default();

        let sequence = output
            .downcast_ref::<DynSequenceValueType>()
            .map_err(|e| anyhow::anyhow!("Failed to downcast to sequence: {}", e))?;

        let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;

        if maps.is_empty() {
            return Err(anyhow::anyhow!("Empty sequence"));
        }

        // One record per run, so only the first map matters
        let map_value = &maps[0];
        let kv_pairs = map_value.try_extract_key_values::<i64, f32>()?;

        // Find the churn class (1) probability
        for (class_id, prob) in &kv_pairs {
            if *class_id == 1 {
                debug!(
                    artifact = %artifact_name,
                    prob = *prob,
                    "Extracted from seq(map)"
                );
                return Ok(*prob as f64);
            }
        }

        // If no class 1, invert the class 0 probability
        for (class_id, prob) in &kv_pairs {
            if *class_id == 0 {
                return Ok(1.0 - *prob as f64);
            }
        }

        Err(anyhow::anyhow!("No probability found in map"))
    }
}

/// Pick the churn-class probability out of a probability tensor.
///
/// Accepts `[1, 2]`, `[2]`, `[1, 1]` and `[1]` shapes; class 1 is churn.
fn churn_prob_from_tensor(dims: &[i64], data: &[f32]) -> f64 {
    if dims.len() == 2 {
        let num_classes = dims[1] as usize;
        if num_classes >= 2 {
            return data[1] as f64;
        } else if num_classes == 1 {
            return data[0] as f64;
        }
    } else if dims.len() == 1 {
        let num_classes = dims[0] as usize;
        if num_classes >= 2 {
            return data[1] as f64;
        } else if num_classes == 1 {
            return data[0] as f64;
        }
    }

    // Fallback: last value
    data.last().map(|&v| v as f64).unwrap_or(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_class_row() {
        let prob = churn_prob_from_tensor(&[1, 2], &[0.3, 0.7]);
        assert!((prob - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_flat_two_class() {
        let prob = churn_prob_from_tensor(&[2], &[0.9, 0.1]);
        assert!((prob - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_single_probability() {
        let prob = churn_prob_from_tensor(&[1, 1], &[0.42]);
        assert!((prob - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_classifier_output_struct() {
        let output = ClassifierOutput {
            class_index: 1,
            probability: 0.78,
        };
        assert_eq!(output.class_index, 1);
        assert!(output.probability > 0.5);
    }
}
