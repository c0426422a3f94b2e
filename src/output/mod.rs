mod csv;
mod json;
mod text;

use chrono::Utc;
use serde::Serialize;

use crate::error::{NoPeakReason, PeakError, Result};
use crate::peak_finder::PeakReport;
use crate::signal_processing::fixed_to_real;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Outcome class of one analysed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
    Peak,
    NoCandidates,
    BelowThreshold,
    TooShort,
    Invalid,
}

impl FrameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStatus::Peak => "peak",
            FrameStatus::NoCandidates => "no_candidates",
            FrameStatus::BelowThreshold => "below_threshold",
            FrameStatus::TooShort => "too_short",
            FrameStatus::Invalid => "invalid",
        }
    }
}

/// One line of detector output
#[derive(Debug, Clone, Serialize)]
pub struct PeakOutput {
    pub source: String,
    pub frame_start: usize,
    pub frame_len: usize,
    pub status: FrameStatus,
    /// Absolute sample index of the peak within the source
    pub index: Option<usize>,
    pub value: Option<i16>,
    /// Prominence in sample units; for rejected frames, the best candidate's
    pub prominence: Option<f32>,
    pub candidates: usize,
    pub truncated: bool,
}

impl PeakOutput {
    pub fn from_result(
        source: &str,
        frame_start: usize,
        frame_len: usize,
        result: &Result<PeakReport>,
    ) -> Self {
        let mut output = Self {
            source: source.to_string(),
            frame_start,
            frame_len,
            status: FrameStatus::Invalid,
            index: None,
            value: None,
            prominence: None,
            candidates: 0,
            truncated: false,
        };

        match result {
            Ok(report) => {
                output.status = FrameStatus::Peak;
                output.index = Some(frame_start + report.index);
                output.value = Some(report.value);
                output.prominence = Some(report.prominence_real());
                output.candidates = report.candidates;
                output.truncated = report.truncated;
            }
            Err(PeakError::NoPeakFound(NoPeakReason::NoCandidates)) => {
                output.status = FrameStatus::NoCandidates;
            }
            Err(PeakError::NoPeakFound(NoPeakReason::BelowThreshold {
                candidates,
                best_prominence,
            })) => {
                output.status = FrameStatus::BelowThreshold;
                output.candidates = *candidates;
                output.prominence = Some(fixed_to_real(*best_prominence));
            }
            Err(PeakError::BufferTooSmall { .. }) => {
                output.status = FrameStatus::TooShort;
            }
            Err(PeakError::InvalidInput(_)) | Err(PeakError::Config(_)) => {}
        }

        output
    }
}

pub trait Formatter: Send {
    fn format(&self, output: &PeakOutput) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
