use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

/// Mono 16-bit capture loaded from a WAV file
pub struct WavCapture {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// Load the first channel of a WAV file as 16-bit samples
///
/// 16-bit integer files are read as-is. Other integer depths are rescaled to
/// 16 bits and float files are scaled from [-1, 1] with saturation.
pub fn load_wav_i16<P: AsRef<Path>>(path: P) -> Result<WavCapture, hound::Error> {
    let mut reader = WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<i16> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 16) => reader.samples::<i16>().collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits) => {
            let shift = bits as i32 - 16;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| rescale_to_i16(v, shift)))
                .collect::<Result<_, _>>()?
        }
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .map(|s| s.map(|v| (v * i16::MAX as f32) as i16))
            .collect::<Result<_, _>>()?,
    };

    let samples = interleaved.into_iter().step_by(channels).collect();

    Ok(WavCapture {
        samples,
        sample_rate: spec.sample_rate,
    })
}

fn rescale_to_i16(value: i32, shift: i32) -> i16 {
    let scaled = if shift >= 0 {
        value >> shift
    } else {
        value << -shift
    };
    scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Write mono 16-bit samples
pub fn save_wav_i16(filename: &str, samples: &[i16], sample_rate: u32) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(filename, spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;
    Ok(())
}
