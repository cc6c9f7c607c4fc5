//! Configuration management for the rain forecast server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with RAIN_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Language;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model and encoder artifact locations
    pub artifacts: ArtifactsConfig,

    /// Result page configuration
    pub presentation: PresentationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArtifactsConfig {
    /// Serialized random forest classifier
    pub model_path: PathBuf,

    /// Serialized label encoders keyed by column name
    pub encoders_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PresentationConfig {
    /// Directory holding the result images, served under `/picture`
    pub image_dir: PathBuf,

    /// Image shown when rain is predicted
    pub rain_image: String,

    /// Image shown when no rain is predicted
    pub no_rain_image: String,

    /// Language used when a request does not ask for one
    pub language: Language,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("RAIN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("artifacts.model_path", "artifacts/randforest.json")?
            .set_default("artifacts.encoders_path", "artifacts/label_encoders.json")?
            .set_default("presentation.image_dir", "picture")?
            .set_default("presentation.rain_image", "sad.jpg")?
            .set_default("presentation.no_rain_image", "yay.jpg")?
            .set_default("presentation.language", "thai")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (RAIN_ prefix)
            .add_source(
                Environment::with_prefix("RAIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts/randforest.json"),
            encoders_path: PathBuf::from("artifacts/label_encoders.json"),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("picture"),
            rain_image: "sad.jpg".to_string(),
            no_rain_image: "yay.jpg".to_string(),
            language: Language::Thai,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            artifacts: ArtifactsConfig::default(),
            presentation: PresentationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.presentation.image_dir, PathBuf::from("picture"));
        assert_eq!(config.presentation.rain_image, "sad.jpg");
        assert_eq!(config.presentation.no_rain_image, "yay.jpg");
        assert_eq!(config.presentation.language, Language::Thai);
    }
}
