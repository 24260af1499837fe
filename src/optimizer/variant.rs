use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::{FwError, Result};

/// The Frank-Wolfe variants.
/// The momentum variants feed the LMO with
/// `gₖ = δₖ ∇f(xₖ) + (1 - δₖ) gₖ₋₁` instead of the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Vanilla Frank-Wolfe, `gₖ = ∇f(xₖ)`.
    #[serde(rename = "fw")]
    Vanilla,

    /// Weighted heavy-ball Frank-Wolfe, `δₖ = 2 / (k + 2)`.
    #[serde(rename = "wfw")]
    Weighted,

    /// Uniform heavy-ball Frank-Wolfe, `δₖ = 1 / (k + 1)`.
    /// `gₖ` is the running average of all past gradients.
    #[serde(rename = "ufw")]
    Uniform,
}

impl Variant {
    /// All variants, in the order used by experiment sweeps.
    pub const ALL: [Variant; 3] = [
        Variant::Vanilla,
        Variant::Weighted,
        Variant::Uniform,
    ];

    /// The momentum weight `δₖ` on the newest gradient.
    /// `δ₀ = 1` for every variant, so `g₋₁` never matters.
    pub fn momentum_weight(&self, iteration: usize) -> f64 {
        let k = iteration as f64;
        match self {
            Self::Vanilla => 1f64,
            Self::Weighted => 2f64 / (k + 2f64),
            Self::Uniform => 1f64 / (k + 1f64),
        }
    }

    /// The parameter-free step size at iteration `k`.
    pub fn parameter_free_step(&self, iteration: usize) -> f64 {
        let k = iteration as f64;
        match self {
            Self::Vanilla | Self::Weighted => 2f64 / (k + 2f64),
            Self::Uniform => 1f64 / (k + 1f64),
        }
    }

    /// Short name used in file names and on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Vanilla => "fw",
            Self::Weighted => "wfw",
            Self::Uniform => "ufw",
        }
    }
}

impl FromStr for Variant {
    type Err = FwError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fw" => Ok(Self::Vanilla),
            "wfw" => Ok(Self::Weighted),
            "ufw" => Ok(Self::Uniform),
            _ => Err(FwError::UnsupportedVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vanilla => "FW",
            Self::Weighted => "WFW",
            Self::Uniform => "UFW",
        };
        write!(f, "{name}")
    }
}
