mod noise;
mod signal;

pub use noise::{GaussianNoiseConfig, NoiseConfig, UniformNoiseConfig, apply_noise};
pub use signal::{AdcPulseConfig, generate_adc_pulse, generate_gaussian_pulse, generate_triangle};
