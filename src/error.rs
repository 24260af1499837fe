//! Errors surfaced by readers, constraint/step-size parsing and optimizers.

use std::io;

use thiserror::Error;

/// Errors that can occur while loading data or running an optimizer.
#[derive(Error, Debug)]
pub enum FwError {
    /// I/O failure while reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A value in a data file could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The requested target column does not exist.
    #[error("The target column \"{0}\" does not exist")]
    MissingTarget(String),

    /// The sample has no rows or no columns.
    #[error("The sample is empty: {n_sample} examples, {n_feature} features")]
    EmptySample { n_sample: usize, n_feature: usize },

    /// Labels are not a binary classification target.
    #[error("Invalid labels: {0}")]
    InvalidLabels(String),

    /// Two vectors or a vector and the data have incompatible lengths.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The initial point is outside the constraint set.
    #[error("The initial point is infeasible: norm {norm} > radius {radius}")]
    Infeasible { norm: f64, radius: f64 },

    /// Unknown constraint name.
    #[error(
        "Unsupported constraint set `{0}`. \
         Currently only l1, l2, n_supp, and simplex are valid choices."
    )]
    UnsupportedConstraint(String),

    /// Unknown step size name.
    #[error(
        "Unsupported step size `{0}`. \
         Currently only pf, s, and ds are valid choices."
    )]
    UnsupportedStepSize(String),

    /// Unknown algorithm variant.
    #[error(
        "Unsupported variant `{0}`. \
         Currently only fw, wfw, and ufw are valid choices."
    )]
    UnsupportedVariant(String),

    /// A hyperparameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Failure in the polars interop layer.
    #[error("DataFrame error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    /// Failure while (de)serializing a config or summary.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while drawing a chart.
    #[error("Plot error: {0}")]
    Plot(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, FwError>;
