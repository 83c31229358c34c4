use moka::future::Cache;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::{LoadedModel, ModelArtifact};
use crate::error::PredictionError;
use crate::models::ModelKey;

/// Process-wide registry of loaded predictors
///
/// Artifacts are read once per key and kept for the life of the process.
/// Concurrent first requests for a key share a single load; failed loads
/// are not cached and are retried on the next request.
pub struct ModelRegistry {
    artifacts: HashMap<ModelKey, PathBuf>,
    cache: Cache<ModelKey, Arc<LoadedModel>>,
}

impl ModelRegistry {
    /// Create a registry over explicit artifact paths
    pub fn new(artifacts: HashMap<ModelKey, PathBuf>) -> Self {
        Self {
            artifacts,
            cache: Cache::builder().build(),
        }
    }

    /// Create a registry for the given keys using their default file names
    pub fn with_defaults<P: AsRef<Path>>(artifact_dir: P, keys: &[ModelKey]) -> Self {
        let dir = artifact_dir.as_ref();
        Self::new(
            keys.iter()
                .map(|key| (*key, dir.join(key.default_artifact())))
                .collect(),
        )
    }

    /// Keys that have an artifact configured
    pub fn configured(&self) -> Vec<ModelKey> {
        let mut keys: Vec<ModelKey> = self.artifacts.keys().copied().collect();
        keys.sort();
        keys
    }

    /// Keys whose predictor is currently loaded
    pub fn loaded(&self) -> Vec<ModelKey> {
        let mut keys: Vec<ModelKey> = self.cache.iter().map(|(key, _)| *key).collect();
        keys.sort();
        keys
    }

    /// Get the predictor for `key`, loading it on first use
    pub async fn load(&self, key: ModelKey) -> Result<Arc<LoadedModel>, PredictionError> {
        let path = self.artifacts.get(&key).ok_or_else(|| {
            PredictionError::ModelNotFound(format!("{} (no artifact configured)", key))
        })?;

        self.cache
            .try_get_with(key, read_artifact(key, path.clone()))
            .await
            .map_err(|e| (*e).clone())
    }

    /// Get the predictor for a model name
    pub async fn load_by_name(&self, name: &str) -> Result<Arc<LoadedModel>, PredictionError> {
        let key: ModelKey = name.parse()?;
        self.load(key).await
    }

    /// Load every configured model, returning how many succeeded
    pub async fn preload(&self) -> usize {
        let mut loaded = 0;
        for key in self.configured() {
            match self.load(key).await {
                Ok(_) => {
                    tracing::info!("Loaded model {}", key);
                    loaded += 1;
                }
                Err(e) => tracing::warn!("Could not preload model {}: {}", key, e),
            }
        }
        loaded
    }
}

async fn read_artifact(key: ModelKey, path: PathBuf) -> Result<Arc<LoadedModel>, PredictionError> {
    tracing::debug!("Reading artifact for {} from {}", key, path.display());

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PredictionError::model_load(key, format!("{}: {}", path.display(), e)))?;
    let model = ModelArtifact::from_json(&text)
        .and_then(|artifact| artifact.into_model(key))
        .map_err(|e| PredictionError::model_load(key, e))?;

    Ok(Arc::new(model))
}
