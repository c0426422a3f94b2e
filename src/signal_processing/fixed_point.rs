use crate::constants::{FIXED_HALF, FIXED_ONE, FIXED_SHIFT};

/// Q16.16 sample value.
pub type Fixed = i32;

/// Q16.16 value widened to 64 bits.
///
/// Differences between two full-scale 16-bit samples do not fit in 32 bits
/// once scaled, so gradients and prominences are carried in this type.
pub type WideFixed = i64;

/// Convert a 16-bit sample to Q16.16. Exact for every `i16`.
#[inline]
pub fn to_fixed(sample: i16) -> Fixed {
    (sample as Fixed) << FIXED_SHIFT
}

/// Convert Q16.16 back to a 16-bit sample
///
/// Rounds half up, then saturates to `i16::MIN..=i16::MAX`.
#[inline]
pub fn from_fixed(value: Fixed) -> i16 {
    let rounded = (value as WideFixed + FIXED_HALF as WideFixed) >> FIXED_SHIFT;
    rounded.clamp(i16::MIN as WideFixed, i16::MAX as WideFixed) as i16
}

/// Convert a real number to Q16.16, truncating toward zero.
///
/// Only used when building configurations; the detection path never touches
/// floating point. Out-of-range inputs saturate and NaN maps to zero.
pub fn real_to_fixed(value: f32) -> Fixed {
    (value * FIXED_ONE as f32) as Fixed
}

/// Convert a (possibly widened) Q16.16 value to a real number for display.
pub fn fixed_to_real(value: WideFixed) -> f32 {
    value as f32 / FIXED_ONE as f32
}

/// Convert a block of samples into `out[..samples.len()]`.
///
/// # Panics
/// If `out` is shorter than `samples`. Callers validate lengths first.
pub fn convert_signal(samples: &[i16], out: &mut [Fixed]) {
    for (dst, &sample) in out[..samples.len()].iter_mut().zip(samples) {
        *dst = to_fixed(sample);
    }
}
