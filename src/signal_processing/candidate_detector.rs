use super::fixed_point::{Fixed, WideFixed};
use super::gradient::gradient_at;
use crate::config::PeakConfig;
use crate::constants::MIN_SIGNAL_LENGTH;
use crate::error::{PeakError, Result};

/// Outcome of a candidate scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    /// Number of indices written to the output buffer
    pub count: usize,
    /// True if the output buffer filled up and scanning stopped early
    pub truncated: bool,
}

/// Gradient-based peak candidate detector
///
/// Scans a Q16.16 signal once and reports interior indices that look like a
/// local peak. An index `i` qualifies when all of the following hold:
///
/// 1. the gradient crosses from positive to non-positive between `i - 1` and
///    `i`, or `signal[i]` is strictly above both neighbours;
/// 2. `signal[i]` is strictly above the noise floor;
/// 3. the magnitude of the gradient at `i - 1` reaches the gradient threshold.
///
/// The magnitude test looks at the previous gradient, not the current one.
/// A shallow apex whose own central difference quantizes to zero can still
/// qualify through the local-maximum branch.
pub struct CandidateDetector {
    gradient_threshold: Fixed,
    noise_floor: Fixed,
}

impl CandidateDetector {
    /// Create a detector using the gradient and noise floor thresholds of `config`
    pub fn new(config: &PeakConfig) -> Self {
        Self {
            gradient_threshold: config.gradient_threshold,
            noise_floor: config.noise_floor,
        }
    }

    /// Scan `signal` and write candidate indices, in increasing order, to `out`
    ///
    /// At most `out.len()` candidates are kept. Once `out` is full the scan
    /// stops and the result is flagged as truncated; this is not an error.
    ///
    /// # Errors
    /// [`PeakError::BufferTooSmall`] if `signal` has fewer than three samples.
    pub fn detect(&self, signal: &[Fixed], out: &mut [usize]) -> Result<Candidates> {
        let length = signal.len();
        if length < MIN_SIGNAL_LENGTH {
            return Err(PeakError::BufferTooSmall {
                needed: MIN_SIGNAL_LENGTH,
                available: length,
            });
        }

        let mut count = 0;
        let mut truncated = false;
        let mut grad_prev = gradient_at(signal, 0);

        for i in 1..length - 1 {
            let grad_curr = gradient_at(signal, i);

            if self.qualifies(signal, i, grad_prev, grad_curr) {
                if count < out.len() {
                    out[count] = i;
                    count += 1;
                } else {
                    truncated = true;
                    log::debug!(
                        "Candidate buffer full ({} entries), stopping scan at index {}",
                        out.len(),
                        i
                    );
                    break;
                }
            }

            grad_prev = grad_curr;
        }

        Ok(Candidates { count, truncated })
    }

    fn qualifies(
        &self,
        signal: &[Fixed],
        i: usize,
        grad_prev: WideFixed,
        grad_curr: WideFixed,
    ) -> bool {
        let value = signal[i];

        let is_zero_crossing = grad_prev > 0 && grad_curr <= 0;
        let is_local_max = value > signal[i - 1] && value > signal[i + 1];
        let above_noise = value > self.noise_floor;
        let strong_gradient = grad_prev.abs() >= self.gradient_threshold as WideFixed;

        (is_zero_crossing || is_local_max) && above_noise && strong_gradient
    }
}
