//! Frank-Wolfe algorithms with heavy-ball momentum.

pub mod optimizer_trait;
pub mod step_size;
pub mod variant;
pub mod history;
pub mod frank_wolfe;

pub use optimizer_trait::Optimizer;
pub use step_size::StepSize;
pub use variant::Variant;
pub use history::History;
pub use frank_wolfe::{
    FrankWolfe,
    fw,
    wfw,
    ufw,
};
