//! ONNX artifact loader

use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Loaded ONNX artifact with metadata
pub struct LoadedArtifact {
    /// Artifact name ("classifier", "scaler", "explainer")
    pub name: String,
    /// ONNX Runtime session
    pub session: Session,
    /// Input name expected by the graph
    pub input_name: String,
    /// Name of the primary output
    pub output_name: String,
}

/// Loader for the pre-trained ONNX artifacts
pub struct ArtifactLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ArtifactLoader {
    /// Create a new artifact loader with default settings (1 thread)
    pub fn new() -> Result<Self> {
        Self::with_threads(1)
    }

    /// Create a new artifact loader with the given thread count
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        // Initialize ONNX Runtime
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a single ONNX artifact from file
    pub fn load<P: AsRef<Path>>(&self, path: P, name: &str) -> Result<LoadedArtifact> {
        let path = path.as_ref();

        info!(artifact = %name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX artifact");

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(path)
            .context(format!("Failed to load artifact from {:?}", path))?;

        // Get input/output names
        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob") || o.name.contains("output") || o.name.contains("variable"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "output".to_string())
            });

        info!(
            artifact = %name,
            input = %input_name,
            output = %output_name,
            "Artifact loaded successfully"
        );

        Ok(LoadedArtifact {
            name: name.to_string(),
            session,
            input_name,
            output_name,
        })
    }
}

impl Default for ArtifactLoader {
    fn default() -> Self {
        Self { onnx_threads: 1 }
    }
}
