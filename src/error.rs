use std::fmt;

use thiserror::Error;

use crate::signal_processing::WideFixed;

/// Why a well-formed signal produced no peak.
///
/// Both causes are reported as [`PeakError::NoPeakFound`]; callers that do not
/// care which one occurred can match `NoPeakFound(_)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoPeakReason {
    /// No index passed the gradient/height test.
    NoCandidates,
    /// Candidates existed but none reached the prominence threshold.
    BelowThreshold {
        candidates: usize,
        best_prominence: WideFixed,
    },
}

impl fmt::Display for NoPeakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoPeakReason::NoCandidates => write!(f, "no candidates"),
            NoPeakReason::BelowThreshold {
                candidates,
                best_prominence,
            } => write!(
                f,
                "{} candidate(s) below prominence threshold (best {:.3})",
                candidates,
                *best_prominence as f64 / crate::constants::FIXED_ONE as f64
            ),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeakError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Signal too short: need {needed} samples, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("No peak found: {0}")]
    NoPeakFound(NoPeakReason),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PeakError>;
