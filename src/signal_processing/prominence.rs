//! Topological prominence and peak selection
//!
//! The prominence of a peak is how far the signal must descend from it before
//! reaching either the signal boundary or a point at least as high as the
//! peak. Each side is walked independently and the higher of the two valley
//! floors is the reference level, so a peak flanked by one deep and one
//! shallow valley is limited by the shallow one.

use super::fixed_point::{Fixed, WideFixed};
use crate::error::NoPeakReason;

/// Winning candidate of a selection pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub prominence: WideFixed,
}

/// Topological prominence of the sample at `peak`
///
/// Walks outward on each side, tracking the minimum, and stops at the first
/// sample that is `>=` the peak value (that sample does not contribute to the
/// minimum). A side with no lower sample keeps the peak value as its minimum,
/// so the result is never negative.
///
/// Requires `peak < signal.len()`.
pub fn topological_prominence(signal: &[Fixed], peak: usize) -> WideFixed {
    let peak_value = signal[peak];

    let left_min = contour_min(signal[..peak].iter().rev(), peak_value);
    let right_min = contour_min(signal[peak + 1..].iter(), peak_value);

    let reference = left_min.max(right_min);
    peak_value as WideFixed - reference as WideFixed
}

fn contour_min<'a>(side: impl Iterator<Item = &'a Fixed>, peak_value: Fixed) -> Fixed {
    side.take_while(|&&v| v < peak_value)
        .fold(peak_value, |min, &v| min.min(v))
}

/// Pick the candidate with the largest prominence at or above `threshold`
///
/// Ties go to the earliest candidate. Returns the reason when nothing
/// qualifies so callers can tell an empty scan from a rejected one.
pub fn select_prominent_peak(
    signal: &[Fixed],
    candidates: &[usize],
    threshold: Fixed,
) -> Result<Selection, NoPeakReason> {
    if candidates.is_empty() {
        return Err(NoPeakReason::NoCandidates);
    }

    let mut best: Option<Selection> = None;
    let mut best_seen = WideFixed::MIN;

    for &index in candidates {
        let prominence = topological_prominence(signal, index);
        log::trace!("Candidate {}: prominence {}", index, prominence);

        best_seen = best_seen.max(prominence);

        let beats_best = best.is_none_or(|b| prominence > b.prominence);
        if prominence >= threshold as WideFixed && beats_best {
            best = Some(Selection { index, prominence });
        }
    }

    best.ok_or(NoPeakReason::BelowThreshold {
        candidates: candidates.len(),
        best_prominence: best_seen,
    })
}
