//! Model and encoder artifacts
//!
//! Both artifacts are loaded once at startup and shared read-only by every
//! request. Any failure here is fatal: the server keeps running only to show
//! the error, and no prediction path is reachable.

pub mod encoder;
pub mod forest;

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::ArtifactsConfig;

pub use encoder::{
    CategoricalEncoder, EncodeError, EncoderRegistry, LabelEncoder, RegisteredEncoder,
};
pub use forest::{Classifier, DecisionTree, PredictError, RandomForest, TreeNode};

/// Startup failures while loading artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Error loading file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error loading file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid model in '{}': {reason}", .path.display())]
    InvalidModel { path: PathBuf, reason: String },

    #[error("Missing encoder in label encoders: '{0}'")]
    MissingEncoder(String),

    #[error("Invalid encoder '{field}': {reason}")]
    InvalidEncoder { field: String, reason: String },
}

/// Read and deserialize one artifact file
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The loaded classifier together with its encoders
#[derive(Clone)]
pub struct Artifacts {
    pub classifier: Arc<dyn Classifier>,
    pub encoders: EncoderRegistry,
}

impl Artifacts {
    pub fn new(classifier: Arc<dyn Classifier>, encoders: EncoderRegistry) -> Self {
        Self {
            classifier,
            encoders,
        }
    }

    /// Load the classifier, then the encoder bundle, then check the bundle
    /// holds every required encoder
    pub fn load(config: &ArtifactsConfig) -> Result<Self, ArtifactError> {
        tracing::info!(path = %config.model_path.display(), "Loading classifier");
        let forest: RandomForest = load(&config.model_path)?;
        forest
            .validate()
            .map_err(|reason| ArtifactError::InvalidModel {
                path: config.model_path.clone(),
                reason,
            })?;
        tracing::info!(trees = forest.trees.len(), "Classifier loaded");

        tracing::info!(path = %config.encoders_path.display(), "Loading label encoders");
        let bundle: HashMap<String, LabelEncoder> = load(&config.encoders_path)?;
        let encoders = EncoderRegistry::from_encoders(bundle)?;
        tracing::info!("Label encoders loaded");

        Ok(Self::new(Arc::new(forest), encoders))
    }
}
