//! Numeric tolerances and default hyperparameters.

/// Slack allowed when checking `‖x‖ ≤ R`.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-8;
/// Slack allowed when checking a step size against `[0, 1]`.
pub const STEPSIZE_TOLERANCE:    f64 = 1e-12;
/// Squared distances below this value are treated as zero.
pub const ZERO_TOLERANCE:        f64 = 1e-300;

pub const DEFAULT_RADIUS:        f64 = 10f64;
pub const DEFAULT_N_SUPPORT:   usize = 2;
pub const DEFAULT_ITERATIONS:  usize = 500;
pub const DEFAULT_TOLERANCE:     f64 = 0f64;

pub const BUFFER_SIZE:         usize = 256;
