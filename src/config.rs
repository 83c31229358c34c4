use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::PredictionError;
use crate::models::ModelKey;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub models: ModelSettings,
    #[serde(default)]
    pub housing: HousingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: String,
    #[serde(default = "default_preload")]
    pub preload: bool,
    /// Model name -> artifact file name, relative to `artifact_dir`
    #[serde(default = "default_artifacts")]
    pub artifacts: HashMap<String, String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            artifact_dir: default_artifact_dir(),
            preload: default_preload(),
            artifacts: default_artifacts(),
        }
    }
}

impl ModelSettings {
    /// Resolve configured artifacts to model keys and paths
    pub fn artifact_paths(&self) -> Result<HashMap<ModelKey, PathBuf>, PredictionError> {
        let dir = Path::new(&self.artifact_dir);
        self.artifacts
            .iter()
            .map(|(name, file)| {
                let key: ModelKey = name.parse()?;
                Ok((key, dir.join(file)))
            })
            .collect()
    }
}

fn default_artifact_dir() -> String { "models".to_string() }
fn default_preload() -> bool { true }

fn default_artifacts() -> HashMap<String, String> {
    [ModelKey::AirConditioners, ModelKey::Televisions]
        .into_iter()
        .map(|key| (key.as_str().to_string(), key.default_artifact().to_string()))
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HousingSettings {
    /// CSV dataset; the house price endpoint is unavailable without it
    #[serde(default = "default_dataset_path")]
    pub dataset_path: Option<String>,
}

impl Default for HousingSettings {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> Option<String> { Some("data/harga-rumah.csv".to_string()) }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ENERGY_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ENERGY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ENERGY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ENERGY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Short environment variables used by deployment scripts
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(dir) = env::var("MODEL_DIR") {
        builder = builder.set_override("models.artifact_dir", dir)?;
    }
    if let Ok(path) = env::var("HOUSING_DATASET") {
        builder = builder.set_override("housing.dataset_path", path)?;
    }
    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 5000);
        assert!(settings.models.preload);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_default_artifacts_resolve() {
        let paths = ModelSettings::default().artifact_paths().unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(
            paths[&ModelKey::AirConditioners],
            Path::new("models").join("air-conditioners.json")
        );
        assert!(paths.contains_key(&ModelKey::Televisions));
    }

    #[test]
    fn test_unknown_artifact_name() {
        let settings = ModelSettings {
            artifacts: HashMap::from([("toasters".to_string(), "toasters.json".to_string())]),
            ..ModelSettings::default()
        };
        assert!(matches!(
            settings.artifact_paths(),
            Err(PredictionError::ModelNotFound(_))
        ));
    }

    #[test]
    fn test_load_from_toml() {
        let path = std::env::temp_dir().join(format!("energy-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[models]\nartifact_dir = \"/srv/models\"\npreload = false\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.models.artifact_dir, "/srv/models");
        assert!(!settings.models.preload);
        assert_eq!(settings.models.artifacts.len(), 2);

        let _ = std::fs::remove_file(&path);
    }
}
