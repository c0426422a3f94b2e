//! Most-prominent peak search over a single signal frame.
//!
//! All entry points run the same pipeline: validate, convert to Q16.16,
//! detect candidates, then select by topological prominence. They differ only
//! in where the scratch memory comes from:
//!
//! - [`find_prominent_peak`], [`analyze_peak`] and [`peak_prominence_as_real`]
//!   use a per-thread [`PeakScratch`]. Each thread has its own copy, so
//!   concurrent calls from different threads never share buffers and no
//!   locking takes place.
//! - [`find_prominent_peak_buffered`] uses caller-supplied slices. Concurrent
//!   calls are safe as long as each caller passes its own buffers.
//! - [`PeakFinder`] owns its scratch and configuration and can be reused
//!   across calls, or moved between threads, at the caller's discretion.
//!
//! Every call is bounded: O(n) for detection and O(n * MAX_PEAKS) for
//! prominence, with no allocation.

use std::cell::RefCell;

use crate::config::{DEFAULT_PEAK_CONFIG, PeakConfig};
use crate::constants::{MAX_PEAKS, MAX_SIGNAL_LENGTH};
use crate::error::{PeakError, Result};
use crate::signal_processing::{
    CandidateDetector, Fixed, WideFixed, convert_signal, fixed_to_real, from_fixed,
    select_prominent_peak, topological_prominence,
};

/// Detection result with diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakReport {
    /// Index of the winning peak
    pub index: usize,
    /// Sample value at `index`
    pub value: i16,
    /// Topological prominence in Q16.16
    pub prominence: WideFixed,
    /// Number of candidates evaluated
    pub candidates: usize,
    /// True if the candidate buffer filled before the scan finished
    pub truncated: bool,
}

impl PeakReport {
    /// Prominence in sample units
    pub fn prominence_real(&self) -> f32 {
        fixed_to_real(self.prominence)
    }
}

/// Scratch memory for one detection call, sized to the compile-time capacities
pub struct PeakScratch {
    signal: [Fixed; MAX_SIGNAL_LENGTH],
    candidates: [usize; MAX_PEAKS],
}

impl PeakScratch {
    pub const fn new() -> Self {
        Self {
            signal: [0; MAX_SIGNAL_LENGTH],
            candidates: [0; MAX_PEAKS],
        }
    }
}

impl Default for PeakScratch {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static SCRATCH: RefCell<PeakScratch> = const { RefCell::new(PeakScratch::new()) };
}

/// Reusable detection context
///
/// Owns a configuration and its scratch buffers. One instance serves one
/// caller at a time; give each thread its own instance.
pub struct PeakFinder {
    config: PeakConfig,
    scratch: Box<PeakScratch>,
}

impl PeakFinder {
    pub fn new(config: PeakConfig) -> Self {
        Self {
            config,
            scratch: Box::new(PeakScratch::new()),
        }
    }

    pub fn config(&self) -> &PeakConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PeakConfig) {
        self.config = config;
    }

    /// Find the most prominent peak in `signal`
    pub fn find(&mut self, signal: &[i16]) -> Result<PeakReport> {
        let PeakScratch { signal: fixed, candidates } = &mut *self.scratch;
        run_detection(signal, &self.config, fixed, candidates)
    }
}

impl Default for PeakFinder {
    fn default() -> Self {
        Self::new(DEFAULT_PEAK_CONFIG)
    }
}

/// Find the index of the most prominent peak in `signal`
///
/// `config` of `None` selects [`DEFAULT_PEAK_CONFIG`]. Scratch memory is the
/// calling thread's [`PeakScratch`].
///
/// # Errors
/// - [`PeakError::InvalidInput`] if `signal` is empty or longer than
///   [`MAX_SIGNAL_LENGTH`]
/// - [`PeakError::BufferTooSmall`] if `signal` has one or two samples
/// - [`PeakError::NoPeakFound`] if no candidate reaches the prominence threshold
pub fn find_prominent_peak(signal: &[i16], config: Option<&PeakConfig>) -> Result<usize> {
    analyze_peak(signal, config).map(|report| report.index)
}

/// Same as [`find_prominent_peak`], returning the full [`PeakReport`]
pub fn analyze_peak(signal: &[i16], config: Option<&PeakConfig>) -> Result<PeakReport> {
    let config = config.unwrap_or(&DEFAULT_PEAK_CONFIG);
    SCRATCH.with_borrow_mut(|scratch| {
        run_detection(signal, config, &mut scratch.signal, &mut scratch.candidates)
    })
}

/// Find the most prominent peak using caller-owned scratch memory
///
/// `signal_scratch` must hold at least `signal.len()` values and
/// `candidate_scratch` at least [`MAX_PEAKS`] indices. Their contents on
/// return are unspecified.
///
/// # Errors
/// As [`find_prominent_peak`], plus [`PeakError::InvalidInput`] for
/// undersized scratch buffers.
pub fn find_prominent_peak_buffered(
    signal: &[i16],
    config: Option<&PeakConfig>,
    signal_scratch: &mut [Fixed],
    candidate_scratch: &mut [usize],
) -> Result<usize> {
    let config = config.unwrap_or(&DEFAULT_PEAK_CONFIG);
    run_detection(signal, config, signal_scratch, candidate_scratch).map(|report| report.index)
}

/// Prominence of `signal[peak_index]` in sample units, for diagnostics
///
/// Returns 0.0 for an empty or oversized signal or an out-of-range index
/// instead of reporting an error.
pub fn peak_prominence_as_real(signal: &[i16], peak_index: usize) -> f32 {
    if signal.is_empty() || signal.len() > MAX_SIGNAL_LENGTH || peak_index >= signal.len() {
        return 0.0;
    }

    SCRATCH.with_borrow_mut(|scratch| {
        let fixed = &mut scratch.signal[..signal.len()];
        convert_signal(signal, fixed);
        fixed_to_real(topological_prominence(fixed, peak_index))
    })
}

fn validate(signal: &[i16], signal_scratch: &[Fixed], candidate_scratch: &[usize]) -> Result<()> {
    if signal.is_empty() {
        return Err(PeakError::InvalidInput("signal is empty"));
    }
    if signal.len() > MAX_SIGNAL_LENGTH {
        return Err(PeakError::InvalidInput(
            "signal exceeds MAX_SIGNAL_LENGTH samples",
        ));
    }
    if signal_scratch.len() < signal.len() {
        return Err(PeakError::InvalidInput(
            "signal scratch is shorter than the signal",
        ));
    }
    if candidate_scratch.len() < MAX_PEAKS {
        return Err(PeakError::InvalidInput(
            "candidate scratch holds fewer than MAX_PEAKS entries",
        ));
    }
    Ok(())
}

fn run_detection(
    signal: &[i16],
    config: &PeakConfig,
    signal_scratch: &mut [Fixed],
    candidate_scratch: &mut [usize],
) -> Result<PeakReport> {
    validate(signal, signal_scratch, candidate_scratch)?;

    let fixed = &mut signal_scratch[..signal.len()];
    convert_signal(signal, fixed);
    let fixed: &[Fixed] = fixed;

    let candidates = &mut candidate_scratch[..MAX_PEAKS];
    let found = CandidateDetector::new(config).detect(fixed, candidates)?;

    let selection = select_prominent_peak(
        fixed,
        &candidates[..found.count],
        config.prominence_threshold,
    )
    .map_err(|reason| {
        log::debug!("No peak in {} samples: {}", signal.len(), reason);
        PeakError::NoPeakFound(reason)
    })?;

    log::debug!(
        "Peak at {} (prominence {:.3}) from {} candidate(s)",
        selection.index,
        fixed_to_real(selection.prominence),
        found.count
    );

    Ok(PeakReport {
        index: selection.index,
        value: from_fixed(fixed[selection.index]),
        prominence: selection.prominence,
        candidates: found.count,
        truncated: found.truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FIXED_ONE;
    use crate::error::NoPeakReason;

    #[test]
    fn test_report_for_triangle() {
        let report = analyze_peak(&[10, 30, 50, 70, 90, 70, 50, 30, 10], None).unwrap();
        assert_eq!(report.index, 4);
        assert_eq!(report.value, 90);
        assert_eq!(report.prominence, 80 * FIXED_ONE as WideFixed);
        assert_eq!(report.candidates, 1);
        assert!(!report.truncated);
        assert!((report.prominence_real() - 80.0).abs() < 1e-6);
    }

    #[test]
    fn test_length_validation_order() {
        assert_eq!(
            find_prominent_peak(&[], None),
            Err(PeakError::InvalidInput("signal is empty"))
        );
        assert!(matches!(
            find_prominent_peak(&[0; MAX_SIGNAL_LENGTH + 1], None),
            Err(PeakError::InvalidInput(_))
        ));
        assert_eq!(
            find_prominent_peak(&[5], None),
            Err(PeakError::BufferTooSmall {
                needed: 3,
                available: 1
            })
        );
    }

    #[test]
    fn test_max_length_accepted() {
        let mut signal = [0i16; MAX_SIGNAL_LENGTH];
        signal[300] = 500;
        assert_eq!(find_prominent_peak(&signal, None), Ok(300));
    }

    #[test]
    fn test_buffered_rejects_small_scratch() {
        let signal = [10, 30, 50, 30, 10];
        let mut fixed = [0; 4];
        let mut candidates = [0; MAX_PEAKS];
        assert!(matches!(
            find_prominent_peak_buffered(&signal, None, &mut fixed, &mut candidates),
            Err(PeakError::InvalidInput(_))
        ));

        let mut fixed = [0; 5];
        let mut candidates = [0; MAX_PEAKS - 1];
        assert!(matches!(
            find_prominent_peak_buffered(&signal, None, &mut fixed, &mut candidates),
            Err(PeakError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_buffered_accepts_oversized_scratch() {
        let signal = [10, 30, 50, 30, 10];
        let mut fixed = [0; 64];
        let mut candidates = [0; MAX_PEAKS * 2];
        assert_eq!(
            find_prominent_peak_buffered(&signal, None, &mut fixed, &mut candidates),
            Ok(2)
        );
    }

    #[test]
    fn test_peak_finder_reuses_scratch() {
        let mut finder = PeakFinder::default();
        assert_eq!(finder.find(&[10, 30, 50, 30, 10]).unwrap().index, 2);
        assert_eq!(finder.find(&[0, 40, 5, 50, 45]).unwrap().index, 1);
        assert!(matches!(
            finder.find(&[50; 8]),
            Err(PeakError::NoPeakFound(NoPeakReason::NoCandidates))
        ));
    }

    #[test]
    fn test_peak_finder_config_swap() {
        let mut finder = PeakFinder::default();
        let signal = [0, 20, 20, 0];
        assert!(matches!(
            finder.find(&signal),
            Err(PeakError::NoPeakFound(NoPeakReason::BelowThreshold { .. }))
        ));
        finder.set_config(finder.config().with_prominence_threshold(0));
        assert_eq!(finder.find(&signal).unwrap().index, 2);
    }

    #[test]
    fn test_prominence_as_real_invalid_inputs() {
        assert_eq!(peak_prominence_as_real(&[], 0), 0.0);
        assert_eq!(peak_prominence_as_real(&[1, 2, 3], 3), 0.0);
        assert_eq!(peak_prominence_as_real(&[0; MAX_SIGNAL_LENGTH + 1], 0), 0.0);
    }

    #[test]
    fn test_prominence_as_real_any_index() {
        // The accessor does not require the index to be a detected peak
        let signal = [0, 10, 5, 20, 5, 15, 0];
        assert!((peak_prominence_as_real(&signal, 3) - 20.0).abs() < 1e-6);
        assert!((peak_prominence_as_real(&signal, 1) - 5.0).abs() < 1e-6);
        assert_eq!(peak_prominence_as_real(&signal, 0), 0.0);
    }
}
