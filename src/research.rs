//! This directory provides some features for research.
//! Measure the followings of a Frank-Wolfe variant per iteration
//! - Running time
//! - Objective value and Frank-Wolfe gap
//! - Training error
//! - Test error
//!
//! and compare the variants on one plot.

/// Defines the logger that runs an optimizer with logging.
pub mod logger;

/// Builder of [`Logger`].
pub mod logger_builder;

/// SVG plots of the objective values.
pub mod plot;

/// JSON experiment configs.
pub mod config;

/// Sweeps over the variants and step sizes.
pub mod experiment;

pub use logger::Logger;
pub use logger_builder::LoggerBuilder;
pub use plot::{Curve, Scale, loss_curves};
pub use config::{ExperimentConfig, DataSource};
pub use experiment::{RunSummary, run_experiment};
