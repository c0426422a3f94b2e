//! Fixed-point topological peak detection.
//!
//! Locates the single most prominent peak in a frame of 16-bit samples using
//! only Q16.16 integer arithmetic and fixed-size scratch memory.
//!
//! ```
//! use fixedpeak::find_prominent_peak;
//!
//! let signal = [10, 40, 70, 80, 60, 40, 70, 100, 50, 20];
//! assert_eq!(find_prominent_peak(&signal, None), Ok(7));
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod peak_finder;
pub mod signal_processing;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::{DEFAULT_PEAK_CONFIG, PeakConfig};
pub use constants::{MAX_PEAKS, MAX_SIGNAL_LENGTH};
pub use error::{NoPeakReason, PeakError, Result};
pub use peak_finder::{
    PeakFinder, PeakReport, PeakScratch, analyze_peak, find_prominent_peak,
    find_prominent_peak_buffered, peak_prominence_as_real,
};
pub use signal_processing::{Fixed, WideFixed};
pub use wav::{load_wav_i16, save_wav_i16};
