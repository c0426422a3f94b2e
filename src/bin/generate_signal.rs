use anyhow::{Context, Result};
use clap::Parser;
use fixedpeak::save_wav_i16;
use fixedpeak::simulation::{AdcPulseConfig, generate_adc_pulse};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "generate_signal")]
#[command(about = "Generate synthetic ADC pulse captures as 16-bit WAV files")]
struct Args {
    /// TOML pulse/noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Number of captures to generate
    #[arg(short, long, default_value_t = 10)]
    trials: u32,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sample rate written to the WAV header in Hz
    #[arg(long, default_value_t = 8000)]
    sample_rate: u32,

    /// Samples per capture (CLI override)
    #[arg(long)]
    len: Option<usize>,

    /// Pulse centre in samples (CLI override)
    #[arg(long)]
    center: Option<f32>,

    /// Uniform noise amplitude in ADC counts (CLI override)
    #[arg(long)]
    noise: Option<i16>,

    /// Output filename prefix
    #[arg(long, default_value = "pulse")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    trial: u32,
    seed: u64,
    expected_center: f32,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    sample_rate: u32,
    pulse: AdcPulseConfig,
    files: Vec<ManifestEntry>,
}

fn load_toml_config(path: &PathBuf) -> Result<AdcPulseConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_pulse_config(base: &AdcPulseConfig, args: &Args) -> AdcPulseConfig {
    let mut config = base.clone();

    if let Some(len) = args.len {
        config.len = len;
    }
    if let Some(center) = args.center {
        config.center = center;
    }
    if let Some(amplitude) = args.noise {
        config.noise = config.noise.with_uniform(amplitude);
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::init();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let base_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        AdcPulseConfig::default()
    };
    let pulse_config = build_pulse_config(&base_config, &args);
    let base_seed = args.seed.unwrap_or(0);

    let mut manifest_entries = Vec::new();

    for trial in 0..args.trials {
        let seed = base_seed + trial as u64;
        let mut config = pulse_config.clone();
        config.noise = config.noise.with_seed(seed);

        let signal = generate_adc_pulse(&config);

        let filename = format!("{}_t{:03}.wav", args.prefix, trial);
        let filepath = args.output_dir.join(&filename);
        let filepath_str = filepath
            .to_str()
            .context("Output path is not valid UTF-8")?;

        save_wav_i16(filepath_str, &signal, args.sample_rate)
            .context("Failed to write WAV file")?;

        manifest_entries.push(ManifestEntry {
            file: filename,
            trial,
            seed,
            expected_center: config.center,
        });

        eprint!("\rGenerating: {}/{}", trial + 1, args.trials);
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            sample_rate: args.sample_rate,
            pulse: pulse_config,
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} files in {}",
        args.trials,
        args.output_dir.display()
    );
    Ok(())
}
