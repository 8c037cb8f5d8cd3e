//! Error types.
//!
//! Evaluating an objective can fail with a [`DomainError`]; such failures
//! abort an optimization run and reach the caller untouched. Running out of
//! iterations is not an error, see [`crate::gradient_descent::Status`].
use thiserror::Error;

/// The objective or its gradient is undefined at the requested point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("denominator `{term}` is zero at ({x}, {y})")]
    ZeroDenominator { term: &'static str, x: f64, y: f64 },

    #[error("objective is undefined at ({x}, {y}): {reason}")]
    Undefined { x: f64, y: f64, reason: String },
}

/// Errors that can occur when validating solver hyperparameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate must be finite and positive")]
    Rate,

    #[error("precision must be finite and positive")]
    Precision,

    #[error("alpha must lie strictly between 0 and 1")]
    Alpha,

    #[error("beta must lie strictly between 0 and 1")]
    Beta,

    #[error("min_step must be finite and positive")]
    MinStep,

    #[error("`{0}` has an invalid value")]
    Malformed(&'static str),

    #[error("unknown direction `{0}`, expected `descend` or `ascend`")]
    Direction(String),
}

/// Top level error of the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] yaml_rust::ScanError),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
