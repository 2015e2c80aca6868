//! Error types for the toolkit
//!
//! Models surface recoverable failures (empty datasets, shape
//! incompatibilities, ill-conditioned solves) through [`ModelError`]. The
//! optimization engine itself has no recoverable error paths: dimension
//! mismatches inside the engine are programmer errors and panic.

use thiserror::Error;

/// Recoverable errors surfaced by the model layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The dataset handed to a training routine contains no data points.
    #[error("[dataset empty]: there is no data inside dataset")]
    DatasetEmpty,

    /// A closed-form solve was singular or ill-conditioned; any computed
    /// solution would be unreliable.
    #[error("[maybe inaccurate computation]: the computed solution may be inaccurate")]
    MaybeInaccurate,

    /// The data handed to a model does not fit the model's shape, or the
    /// model is not in a state where the request makes sense.
    #[error("[incompatible data and model]: model and data provided are not compatible - {0}")]
    IncompatibleDataAndModel(String),
}

/// Errors surfaced while loading or validating a training configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for [`crate::config::TrainingConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but one of its values is out of range or
    /// inconsistent with the selected update rule.
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_messages() {
        assert_eq!(
            ModelError::DatasetEmpty.to_string(),
            "[dataset empty]: there is no data inside dataset"
        );
        assert!(ModelError::MaybeInaccurate
            .to_string()
            .starts_with("[maybe inaccurate computation]"));
        let err = ModelError::IncompatibleDataAndModel("model expects 3 features".to_string());
        assert!(err.to_string().contains("model expects 3 features"));
    }

    #[test]
    fn test_config_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ConfigError::from(io);
        assert!(err.to_string().contains("failed to read config file"));
    }
}
