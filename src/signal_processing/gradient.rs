use super::fixed_point::{Fixed, WideFixed};

/// Gradient of a Q16.16 signal at `index`
///
/// Forward difference at the first sample, backward difference at the last,
/// and a halved central difference elsewhere. The halving is an arithmetic
/// shift, so odd differences round toward negative infinity.
///
/// Requires `signal.len() >= 2` and `index < signal.len()`.
pub fn gradient_at(signal: &[Fixed], index: usize) -> WideFixed {
    let last = signal.len() - 1;
    let at = |i: usize| signal[i] as WideFixed;

    if index == 0 {
        at(1) - at(0)
    } else if index == last {
        at(last) - at(last - 1)
    } else {
        (at(index + 1) - at(index - 1)) >> 1
    }
}
