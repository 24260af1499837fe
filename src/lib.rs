//!
//! A crate that provides the Frank-Wolfe algorithm
//! and its heavy-ball momentum variants
//! for constrained empirical risk minimization.
//!
//! Each variant feeds the linear minimization oracle (LMO) with
//! ```txt
//!     gₖ = δₖ ∇f(xₖ) + (1 - δₖ) gₖ₋₁,    g₋₁ = 0,
//! ```
//! - `FW`  (vanilla): `δₖ = 1`,
//! - `WFW` (weighted): `δₖ = 2 / (k + 2)`,
//! - `UFW` (uniform): `δₖ = 1 / (k + 1)`,
//!
//! and moves toward the LMO output with one of three step size rules
//! (parameter-free, smooth, directionally smooth).
//!
//! The objective shipped with the crate is the logistic loss
//! over a binary classification [`Sample`],
//! and the constraint sets are
//! the l1, l2, n-support norm balls and the scaled simplex.
//!
//! # Example
//! ```no_run
//! use hbfw::prelude::*;
//!
//! let sample = SampleReader::new()
//!     .file("mushrooms.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .normalize_labels(true)
//!     .read()
//!     .unwrap();
//!
//! let objective = LogisticLoss::new(&sample).unwrap();
//! let mut optimizer = FrankWolfe::init(objective, L1Ball::new(10.0))
//!     .variant(Variant::Uniform)
//!     .step_size(StepSize::DirectionallySmooth)
//!     .max_iter(1_000);
//!
//! let x = optimizer.run().unwrap();
//! let f = LinearClassifier::new(x);
//! println!("training error: {}", zero_one_loss(&sample, &f));
//! ```

pub mod constants;
pub mod error;
pub mod helpers;
pub mod checkers;

pub mod sample;
pub mod objective;
pub mod constraint;
pub mod optimizer;
pub mod classifier;

pub mod research;
pub mod prelude;


pub use sample::{
    Sample,
    SampleReader,
    FileFormat,
    Feature,
};

pub use error::{FwError, Result};

pub use objective::{ObjectiveFunction, LogisticLoss};

pub use constraint::{
    Constraint,
    ConstraintType,
    L1Ball,
    L2Ball,
    NSupportBall,
    Simplex,
};

pub use optimizer::{
    Optimizer,
    FrankWolfe,
    StepSize,
    Variant,
    History,
    fw,
    wfw,
    ufw,
};

pub use classifier::{Classifier, LinearClassifier, zero_one_loss};
