use super::noise::{NoiseConfig, apply_noise};

/// Triangle rising linearly from `base` at index 0 to `peak` at `apex`, then
/// falling back to `base` at the last index
pub fn generate_triangle(len: usize, apex: usize, base: i16, peak: i16) -> Vec<i16> {
    let last = len.saturating_sub(1);
    let rise = (peak as f32) - (base as f32);

    (0..len)
        .map(|i| {
            let fraction = if i <= apex {
                if apex == 0 { 1.0 } else { i as f32 / apex as f32 }
            } else if last == apex {
                1.0
            } else {
                (last - i) as f32 / (last - apex) as f32
            };
            (base as f32 + rise * fraction).round() as i16
        })
        .collect()
}

/// Gaussian pulse `amplitude * exp(-((i - center) / width)^2)` on a constant baseline
pub fn generate_gaussian_pulse(
    len: usize,
    center: f32,
    width: f32,
    amplitude: f32,
    baseline: i16,
) -> Vec<i16> {
    (0..len)
        .map(|i| {
            let x = (i as f32 - center) / width;
            let pulse = amplitude * (-x * x).exp();
            (baseline as f32 + pulse)
                .round()
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16
        })
        .collect()
}

/// Simulated ADC capture of a sensor pulse
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AdcPulseConfig {
    pub len: usize,
    pub center: f32,
    pub width: f32,
    pub amplitude: f32,
    /// Quiescent ADC level, e.g. the midpoint of a 12-bit converter
    pub baseline: i16,
    pub noise: NoiseConfig,
}

impl Default for AdcPulseConfig {
    fn default() -> Self {
        Self {
            len: 128,
            center: 64.0,
            width: 8.0,
            amplitude: 800.0,
            baseline: 512,
            noise: NoiseConfig::default().with_uniform(20),
        }
    }
}

/// Gaussian pulse on a baseline, plus noise
pub fn generate_adc_pulse(config: &AdcPulseConfig) -> Vec<i16> {
    let mut signal = generate_gaussian_pulse(
        config.len,
        config.center,
        config.width,
        config.amplitude,
        config.baseline,
    );
    apply_noise(&mut signal, &config.noise);
    signal
}
