//! Detection thresholds.
//!
//! [`PeakConfig`] carries the three thresholds in Q16.16 and is what the
//! detection path consumes. [`ThresholdSettings`] is the same information in
//! real units for configuration files, and [`Threshold`] parses a single
//! value from the command line.
//!
//! ```
//! use fixedpeak::config::PeakConfig;
//!
//! let config = PeakConfig::from_real(0.5, 0.05, 5.0).unwrap();
//! assert_eq!(config.prominence_threshold, 32768);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRADIENT_THRESHOLD, DEFAULT_NOISE_FLOOR, DEFAULT_PROMINENCE_THRESHOLD, FIXED_ONE,
};
use crate::error::{PeakError, Result};
use crate::signal_processing::{Fixed, fixed_to_real, real_to_fixed};

/// Largest magnitude representable as a Q16.16 threshold.
const MAX_REAL_THRESHOLD: f32 = 32767.0;

/// Detection thresholds in Q16.16
///
/// Each field is independent. `PeakConfig::default()` returns
/// [`DEFAULT_PEAK_CONFIG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakConfig {
    /// Minimum topological prominence for the selected peak
    pub prominence_threshold: Fixed,
    /// Minimum magnitude of the gradient preceding a candidate
    pub gradient_threshold: Fixed,
    /// Candidates must lie strictly above this level
    pub noise_floor: Fixed,
}

/// Prominence >= 1.0, gradient >= 0.1, noise floor 10.0.
pub const DEFAULT_PEAK_CONFIG: PeakConfig = PeakConfig {
    prominence_threshold: DEFAULT_PROMINENCE_THRESHOLD,
    gradient_threshold: DEFAULT_GRADIENT_THRESHOLD,
    noise_floor: DEFAULT_NOISE_FLOOR,
};

impl Default for PeakConfig {
    fn default() -> Self {
        DEFAULT_PEAK_CONFIG
    }
}

impl PeakConfig {
    /// Build a configuration from thresholds in real (sample) units
    ///
    /// Values are truncated toward zero when converted.
    ///
    /// # Errors
    /// [`PeakError::Config`] if any value is not finite or does not fit in Q16.16.
    pub fn from_real(prominence: f32, gradient: f32, noise_floor: f32) -> Result<Self> {
        Ok(Self {
            prominence_threshold: checked_real_to_fixed("prominence", prominence)?,
            gradient_threshold: checked_real_to_fixed("gradient", gradient)?,
            noise_floor: checked_real_to_fixed("noise_floor", noise_floor)?,
        })
    }

    pub fn with_prominence_threshold(mut self, threshold: Fixed) -> Self {
        self.prominence_threshold = threshold;
        self
    }

    pub fn with_gradient_threshold(mut self, threshold: Fixed) -> Self {
        self.gradient_threshold = threshold;
        self
    }

    pub fn with_noise_floor(mut self, floor: Fixed) -> Self {
        self.noise_floor = floor;
        self
    }
}

fn checked_real_to_fixed(name: &str, value: f32) -> Result<Fixed> {
    if !value.is_finite() || value.abs() > MAX_REAL_THRESHOLD {
        return Err(PeakError::Config(format!(
            "{} threshold {} is outside [-{}, {}]",
            name, value, MAX_REAL_THRESHOLD, MAX_REAL_THRESHOLD
        )));
    }
    Ok(real_to_fixed(value))
}

/// Thresholds in real units, as read from a `[thresholds]` configuration table
///
/// Missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub prominence: f32,
    pub gradient: f32,
    pub noise_floor: f32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            prominence: 1.0,
            gradient: 0.1,
            noise_floor: 10.0,
        }
    }
}

impl ThresholdSettings {
    pub fn to_config(&self) -> Result<PeakConfig> {
        PeakConfig::from_real(self.prominence, self.gradient, self.noise_floor)
    }
}

impl From<&PeakConfig> for ThresholdSettings {
    fn from(config: &PeakConfig) -> Self {
        Self {
            prominence: fixed_to_real(config.prominence_threshold as i64),
            gradient: fixed_to_real(config.gradient_threshold as i64),
            noise_floor: fixed_to_real(config.noise_floor as i64),
        }
    }
}

/// Single threshold value
///
/// # Parsing formats
/// - `1.5` - real units
/// - `98304q` or `98304Q` - raw Q16.16 integer
///
/// # Example
/// ```
/// use fixedpeak::config::Threshold;
///
/// let t: Threshold = "0.5".parse().unwrap();
/// assert_eq!(t.as_fixed(), 32768);
/// let t: Threshold = "6553q".parse().unwrap();
/// assert_eq!(t.as_fixed(), 6553);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Threshold(Fixed);

impl Threshold {
    pub fn from_fixed(value: Fixed) -> Self {
        Self(value)
    }

    pub fn as_fixed(&self) -> Fixed {
        self.0
    }

    pub fn as_real(&self) -> f32 {
        fixed_to_real(self.0 as i64)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % FIXED_ONE == 0 {
            write!(f, "{:.1}", self.as_real())
        } else {
            write!(f, "{}q", self.0)
        }
    }
}

impl FromStr for Threshold {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(raw) = s.strip_suffix('q').or_else(|| s.strip_suffix('Q')) {
            let value: Fixed = raw
                .trim()
                .parse()
                .map_err(|_| format!("invalid Q16.16 value: {}", s))?;
            return Ok(Self(value));
        }

        let real: f32 = s
            .parse()
            .map_err(|_| format!("invalid threshold: {}", s))?;
        checked_real_to_fixed("", real)
            .map(Self)
            .map_err(|_| format!("threshold out of range: {}", s))
    }
}
