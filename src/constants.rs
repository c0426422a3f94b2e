//! Fixed-point format and capacity constants
//!
//! Samples are carried as Q16.16 signed integers. Capacities are fixed at
//! compile time so that every scratch buffer can live in static or stack
//! storage without allocation.

/// Number of fractional bits in the Q16.16 representation.
pub const FIXED_SHIFT: u32 = 16;

/// 1.0 in Q16.16.
pub const FIXED_ONE: i32 = 1 << FIXED_SHIFT;

/// 0.5 in Q16.16, used for round-half-up on the reverse conversion.
pub const FIXED_HALF: i32 = 1 << (FIXED_SHIFT - 1);

/// Largest signal accepted by a single detection call.
pub const MAX_SIGNAL_LENGTH: usize = 512;

/// Largest number of candidates kept per call. Detection stops once full.
pub const MAX_PEAKS: usize = 32;

/// Shortest signal for which a gradient can be evaluated at an interior point.
pub const MIN_SIGNAL_LENGTH: usize = 3;

/// Default minimum prominence: 1.0.
pub const DEFAULT_PROMINENCE_THRESHOLD: i32 = FIXED_ONE;

/// Default minimum gradient magnitude: 0.1, truncated (6553.6 -> 6553).
pub const DEFAULT_GRADIENT_THRESHOLD: i32 = 6553;

/// Default noise floor: 10.0.
pub const DEFAULT_NOISE_FLOOR: i32 = 10 * FIXED_ONE;
