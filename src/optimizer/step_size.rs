use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::{FwError, Result};

/// Step size rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepSize {
    /// Parameter-free step size,
    /// `2 / (k + 2)` for FW / WFW and `1 / (k + 1)` for UFW.
    #[serde(rename = "pf")]
    ParameterFree,

    /// Smooth step size.
    /// Minimizes the quadratic upper bound given by
    /// the global smoothness constant `L`:
    /// `⟨∇f(x), x - v⟩ / (L ‖x - v‖²)`, clipped to `[0, 1]`.
    #[serde(rename = "s")]
    Smooth,

    /// Directionally smooth step size.
    /// Same as [`StepSize::Smooth`] with `L` replaced by
    /// the smoothness constant along the segment `[x, v]`.
    #[serde(rename = "ds")]
    DirectionallySmooth,
}

impl StepSize {
    /// All rules, in the order used by experiment sweeps.
    pub const ALL: [StepSize; 3] = [
        StepSize::ParameterFree,
        StepSize::Smooth,
        StepSize::DirectionallySmooth,
    ];

    /// Short name used in file names and on the command line.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::ParameterFree => "pf",
            Self::Smooth => "s",
            Self::DirectionallySmooth => "ds",
        }
    }
}

impl FromStr for StepSize {
    type Err = FwError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pf" => Ok(Self::ParameterFree),
            "s" => Ok(Self::Smooth),
            "ds" => Ok(Self::DirectionallySmooth),
            _ => Err(FwError::UnsupportedStepSize(s.to_string())),
        }
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self {
            Self::ParameterFree => "Parameter-free",
            Self::Smooth => "Smooth",
            Self::DirectionallySmooth => "Directionally smooth",
        };
        write!(f, "{rule}")
    }
}
