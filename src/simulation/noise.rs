use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Noise added to a synthetic capture, in ADC counts
#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub uniform: Option<UniformNoiseConfig>,
    pub gaussian: Option<GaussianNoiseConfig>,
}

/// Integer noise drawn uniformly from `-amplitude..=amplitude`
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct UniformNoiseConfig {
    pub amplitude: i16,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GaussianNoiseConfig {
    pub std_dev: f32,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_uniform(mut self, amplitude: i16) -> Self {
        self.uniform = Some(UniformNoiseConfig { amplitude });
        self
    }

    pub fn with_gaussian(mut self, std_dev: f32) -> Self {
        self.gaussian = Some(GaussianNoiseConfig { std_dev });
        self
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

fn apply_uniform_noise(signal: &mut [i16], config: &UniformNoiseConfig, rng: &mut ChaCha8Rng) {
    let amplitude = config.amplitude.unsigned_abs() as i32;
    if amplitude == 0 {
        return;
    }

    for sample in signal.iter_mut() {
        let noise: i32 = rng.random_range(-amplitude..=amplitude);
        *sample = saturate(*sample as i32 + noise);
    }
}

fn apply_gaussian_noise(signal: &mut [i16], config: &GaussianNoiseConfig, rng: &mut ChaCha8Rng) {
    let Ok(normal) = Normal::new(0.0, config.std_dev as f64) else {
        log::warn!("Ignoring invalid Gaussian noise std_dev {}", config.std_dev);
        return;
    };

    for sample in signal.iter_mut() {
        let noise = normal.sample(rng).round() as i32;
        *sample = saturate(*sample as i32 + noise);
    }
}

fn saturate(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Add the configured noise to `signal` in place, saturating at the i16 range
pub fn apply_noise(signal: &mut [i16], config: &NoiseConfig) {
    let mut rng = create_rng(config.seed);

    if let Some(ref uniform) = config.uniform {
        apply_uniform_noise(signal, uniform, &mut rng);
    }

    if let Some(ref gaussian) = config.gaussian {
        apply_gaussian_noise(signal, gaussian, &mut rng);
    }
}
