use std::path::Path;

use crate::data::RealDistribution;
use crate::error::ConfigError;
use crate::model::ModelConfig;
use crate::training::TrainerConfig;

/// Where the "real" samples come from.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub real: RealDistribution,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub training: TrainerConfig,
    pub model: ModelConfig,
    pub data: DataConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.training;
        if t.batch_size == 0 {
            return Err(ConfigError::Validation(
                "training.batch_size must be > 0".into(),
            ));
        }
        if t.passes == 0 {
            return Err(ConfigError::Validation("training.passes must be > 0".into()));
        }
        if t.iterations_per_pass == 0 {
            return Err(ConfigError::Validation(
                "training.iterations_per_pass must be > 0".into(),
            ));
        }
        if t.streak_cap == 0 {
            return Err(ConfigError::Validation(
                "training.streak_cap must be >= 1".into(),
            ));
        }
        if t.log_interval == 0 {
            return Err(ConfigError::Validation(
                "training.log_interval must be > 0".into(),
            ));
        }

        // Model
        let m = &self.model;
        let dims = m.dimensions()?;
        if dims.noise == 0 || dims.sample == 0 {
            return Err(ConfigError::Validation(
                "model layer sizes must be > 0".into(),
            ));
        }
        if m.hidden_dim == 0 {
            return Err(ConfigError::Validation(
                "model.hidden_dim must be > 0".into(),
            ));
        }
        if !(m.generator_lr.is_finite() && m.generator_lr > 0.0) {
            return Err(ConfigError::Validation(
                "model.generator_lr must be finite and > 0".into(),
            ));
        }
        if !(m.discriminator_lr.is_finite() && m.discriminator_lr > 0.0) {
            return Err(ConfigError::Validation(
                "model.discriminator_lr must be finite and > 0".into(),
            ));
        }

        // Data
        match self.data.real {
            RealDistribution::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite()) {
                    return Err(ConfigError::Validation(
                        "data.real uniform bounds must be finite".into(),
                    ));
                }
                // The sampler needs a finite, non-empty width.
                if !(low < high && (high - low).is_finite()) {
                    return Err(ConfigError::Validation(
                        "data.real uniform bounds need low < high".into(),
                    ));
                }
            }
            RealDistribution::Normal { mean, std } => {
                if !(mean.is_finite() && std.is_finite()) {
                    return Err(ConfigError::Validation(
                        "data.real normal mean and std must be finite".into(),
                    ));
                }
                if std <= 0.0 {
                    return Err(ConfigError::Validation(
                        "data.real normal std must be > 0".into(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
    }
}
