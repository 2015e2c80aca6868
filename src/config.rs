//! Training configuration loaded from JSON.
//!
//! A [`TrainingConfig`] carries the engine hyperparameters and the
//! update-rule selection for a training run. Different update rules require
//! different optional fields:
//!
//! - **plain**: no extra fields
//! - **momentum**: requires `gamma` in `[0, 1)`
//! - **nag**: requires `gamma` in `[0, 1)`
//!
//! # Example
//!
//! ```json
//! {
//!   "update_rule": "momentum",
//!   "learning_rate": 0.1,
//!   "max_steps": 100,
//!   "gamma": 0.9,
//!   "seed": 42
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::optim::{MomentumUpdate, NagUpdate, PlainUpdate, UpdateRule};

const VALID_UPDATE_RULES: [&str; 3] = ["plain", "momentum", "nag"];

/// Configuration for one training run.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Update rule: "plain", "momentum", or "nag".
    pub update_rule: String,

    /// Step size for parameter updates.
    pub learning_rate: f64,

    /// Epoch cap for the optimization loop.
    pub max_steps: usize,

    /// Zero-gradient check interval (defaults to every epoch).
    pub check_interval: Option<usize>,

    /// Velocity decay factor for the momentum and nag rules.
    pub gamma: Option<f64>,

    /// Window size for mini-batch training.
    pub batch_size: Option<usize>,

    /// Seed for stochastic visit order and weight initialization.
    pub seed: Option<u64>,
}

impl TrainingConfig {
    /// Build the configured update rule for parameter vectors of the given
    /// dimensionality (momentum rules start from a zero velocity).
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_ml_toolkit::config::TrainingConfig;
    ///
    /// let config: TrainingConfig = serde_json::from_str(
    ///     r#"{"update_rule": "momentum", "learning_rate": 0.1, "max_steps": 100, "gamma": 0.9}"#,
    /// ).unwrap();
    /// let rule = config.build_update_rule(3).unwrap();
    /// ```
    pub fn build_update_rule(&self, dimension: usize) -> Result<Box<dyn UpdateRule>, ConfigError> {
        match self.update_rule.as_str() {
            "plain" => Ok(Box::new(PlainUpdate::new())),
            "momentum" => {
                let gamma = self.require_gamma()?;
                Ok(Box::new(MomentumUpdate::new(gamma, vec![0.0; dimension])))
            }
            "nag" => {
                let gamma = self.require_gamma()?;
                Ok(Box::new(NagUpdate::new(gamma, vec![0.0; dimension])))
            }
            other => Err(ConfigError::Invalid(format!(
                "unknown update rule '{}'. Must be one of: {}",
                other,
                VALID_UPDATE_RULES.join(", ")
            ))),
        }
    }

    fn require_gamma(&self) -> Result<f64, ConfigError> {
        self.gamma.ok_or_else(|| {
            ConfigError::Invalid(format!(
                "update rule '{}' requires gamma",
                self.update_rule
            ))
        })
    }
}

/// Load and validate a training configuration from a JSON file.
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not valid JSON, or
/// fails validation.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: TrainingConfig = serde_json::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    if !VALID_UPDATE_RULES.contains(&config.update_rule.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "invalid update rule '{}'. Must be one of: {}",
            config.update_rule,
            VALID_UPDATE_RULES.join(", ")
        )));
    }

    if !(config.learning_rate.is_finite() && config.learning_rate > 0.0) {
        return Err(ConfigError::Invalid(
            "learning_rate must be positive and finite".to_string(),
        ));
    }

    if config.update_rule == "momentum" || config.update_rule == "nag" {
        match config.gamma {
            None => {
                return Err(ConfigError::Invalid(format!(
                    "update rule '{}' requires gamma",
                    config.update_rule
                )));
            }
            Some(gamma) if !(0.0..1.0).contains(&gamma) => {
                return Err(ConfigError::Invalid(
                    "gamma must be in [0, 1)".to_string(),
                ));
            }
            Some(_) => {}
        }
    }

    if let Some(batch_size) = config.batch_size {
        if batch_size == 0 {
            return Err(ConfigError::Invalid(
                "batch_size must be at least 1".to_string(),
            ));
        }
    }

    Ok(())
}
