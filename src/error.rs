use std::path::PathBuf;

/// Errors raised by model handles and parameter synchronization.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("shape mismatch for parameter '{name}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("failed to write samples to {path}: {source}")]
    Sink {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to encode samples: {0}")]
    SinkEncode(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("cannot find '{0}' layer")]
    MissingLayer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = ModelError::ShapeMismatch {
            name: "dis.fc1.weight".to_string(),
            expected: vec![2, 64],
            found: vec![3, 64],
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch for parameter 'dis.fc1.weight': expected [2, 64], found [3, 64]"
        );
    }

    #[test]
    fn test_training_error_wraps_model_error() {
        let err: TrainingError = ModelError::Backend("tensor extraction".into()).into();
        assert_eq!(
            err.to_string(),
            "model error: backend failure: tensor extraction"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingLayer("noise".to_string());
        assert_eq!(err.to_string(), "cannot find 'noise' layer");

        let err = ConfigError::Validation("training.streak_cap must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: training.streak_cap must be > 0"
        );
    }
}
