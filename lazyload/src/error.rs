use thiserror::Error;

use crate::CandidateId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Invalid [`crate::LazyLoadOptions`], reported when a session is created.
#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{axis} margin must not be negative (got {value})")]
    NegativeMargin { axis: Axis, value: f64 },
    #[error("{axis} margin must be a finite number")]
    NonFiniteMargin { axis: Axis },
}

#[derive(Error, Clone, Copy, Debug, PartialEq)]
pub enum LazyLoadError {
    /// The host cannot report element geometry. Callers usually fall back to eager loading.
    #[error("host cannot report geometry for candidate {id}")]
    Capability { id: CandidateId },
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl LazyLoadError {
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability { .. })
    }
}
