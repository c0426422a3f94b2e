use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rolling_stats::Stats;
use serde::Deserialize;

use fixedpeak::config::{PeakConfig, Threshold, ThresholdSettings};
use fixedpeak::output::{FrameStatus, OutputFormat, PeakOutput, create_formatter};
use fixedpeak::{MAX_SIGNAL_LENGTH, PeakFinder, load_wav_i16};

#[derive(Parser, Debug)]
#[command(name = "fixedpeak")]
#[command(about = "Find the most prominent peak in each frame of a sample capture", long_about = None)]
struct Args {
    /// Captures to scan: WAV files or text files of integer samples
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// TOML configuration file with a [thresholds] table
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Minimum prominence (e.g. "1.0" or "65536q")
    #[arg(long)]
    prominence: Option<Threshold>,

    /// Minimum gradient magnitude (e.g. "0.1" or "6553q")
    #[arg(long)]
    gradient: Option<Threshold>,

    /// Noise floor (e.g. "10.0" or "655360q")
    #[arg(long)]
    noise_floor: Option<Threshold>,

    /// Samples per analysed frame (1..=512)
    #[arg(long)]
    frame_len: Option<usize>,

    /// Print prominence statistics across all detected peaks
    #[arg(long)]
    summary: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    thresholds: Option<ThresholdSettings>,
    frame_len: Option<usize>,
}

fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_config(toml: &TomlConfig, args: &Args) -> Result<PeakConfig> {
    let mut config = toml
        .thresholds
        .unwrap_or_default()
        .to_config()
        .context("Invalid [thresholds] in config file")?;

    if let Some(t) = args.prominence {
        config = config.with_prominence_threshold(t.as_fixed());
    }
    if let Some(t) = args.gradient {
        config = config.with_gradient_threshold(t.as_fixed());
    }
    if let Some(t) = args.noise_floor {
        config = config.with_noise_floor(t.as_fixed());
    }

    Ok(config)
}

fn resolve_frame_len(toml: &TomlConfig, args: &Args) -> Result<usize> {
    let frame_len = args
        .frame_len
        .or(toml.frame_len)
        .unwrap_or(MAX_SIGNAL_LENGTH);
    if frame_len == 0 || frame_len > MAX_SIGNAL_LENGTH {
        anyhow::bail!(
            "frame length {} must be between 1 and {}",
            frame_len,
            MAX_SIGNAL_LENGTH
        );
    }
    Ok(frame_len)
}

/// Parse integer samples separated by whitespace or commas. `#` starts a comment.
fn parse_samples(text: &str) -> Result<Vec<i16>> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(|c: char| c == ',' || c.is_whitespace()))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i16>()
                .with_context(|| format!("Invalid sample value: {:?}", token))
        })
        .collect()
}

fn load_samples(path: &Path) -> Result<Vec<i16>> {
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"));

    if is_wav {
        let capture = load_wav_i16(path)
            .with_context(|| format!("Failed to read WAV file {}", path.display()))?;
        log::info!(
            "{}: {} samples at {} Hz",
            path.display(),
            capture.samples.len(),
            capture.sample_rate
        );
        Ok(capture.samples)
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        parse_samples(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn analyze_capture(
    source: &str,
    samples: &[i16],
    frame_len: usize,
    finder: &mut PeakFinder,
) -> Vec<PeakOutput> {
    if samples.is_empty() {
        log::warn!("{}: no samples", source);
        return vec![PeakOutput::from_result(source, 0, 0, &finder.find(samples))];
    }

    samples
        .chunks(frame_len)
        .enumerate()
        .map(|(n, frame)| {
            let start = n * frame_len;
            let result = finder.find(frame);
            if let Err(ref e) = result {
                log::debug!("{} frame at {}: {}", source, start, e);
            }
            PeakOutput::from_result(source, start, frame.len(), &result)
        })
        .collect()
}

fn print_summary(stats: &Stats<f32>, frames: usize) {
    eprintln!();
    eprintln!("Frames analysed: {}", frames);
    eprintln!("Peaks found:     {}", stats.count);
    if stats.count > 0 {
        eprintln!(
            "Prominence:      mean {:.2}, std {:.2}, min {:.2}, max {:.2}",
            stats.mean, stats.std_dev, stats.min, stats.max
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let config = build_config(&toml_config, &args)?;
    let frame_len = resolve_frame_len(&toml_config, &args)?;
    log::info!(
        "Thresholds: prominence {}, gradient {}, noise floor {}; frame length {}",
        Threshold::from_fixed(config.prominence_threshold),
        Threshold::from_fixed(config.gradient_threshold),
        Threshold::from_fixed(config.noise_floor),
        frame_len
    );

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut finder = PeakFinder::new(config);
    let mut stats: Stats<f32> = Stats::new();
    let mut frames = 0;

    for path in &args.files {
        let samples = load_samples(path)?;
        let source = path.display().to_string();

        for output in analyze_capture(&source, &samples, frame_len, &mut finder) {
            frames += 1;
            if output.status == FrameStatus::Peak
                && let Some(prominence) = output.prominence
            {
                stats.update(prominence);
            }
            println!("{}", formatter.format(&output));
        }
    }

    if args.summary {
        print_summary(&stats, frames);
    }

    Ok(())
}
