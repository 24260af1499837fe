//! Exports the optimizers, objectives, constraint sets and data types.
//!
pub use crate::optimizer::{
    // Optimizer trait
    Optimizer,

    FrankWolfe,
    Variant,
    StepSize,
    History,

    fw,
    wfw,
    ufw,
};


pub use crate::objective::{
    ObjectiveFunction,
    LogisticLoss,
};


pub use crate::constraint::{
    // Constraint trait
    Constraint,
    ConstraintType,

    L1Ball,
    L2Ball,
    NSupportBall,
    Simplex,
};


pub use crate::classifier::{
    Classifier,
    LinearClassifier,
    zero_one_loss,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    FileFormat,
};


pub use crate::error::FwError;
