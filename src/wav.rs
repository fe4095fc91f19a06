//! Mono 32-bit float WAV output and the optional peak normalization.

use std::path::Path;

use crate::error::{ExportError, Result};

/// Lower bound on the normalization peak so silent responses don't divide by zero.
pub const PEAK_FLOOR: f32 = 1e-12;

/// Scale both ears by their joint absolute peak. Returns the peak used.
pub fn peak_normalize(left: &mut [f32], right: &mut [f32]) -> f32 {
    let peak = left
        .iter()
        .chain(right.iter())
        .fold(PEAK_FLOOR, |acc, &s| acc.max(s.abs()));
    for s in left.iter_mut().chain(right.iter_mut()) {
        *s /= peak;
    }
    peak
}

pub fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels:        1,
        sample_rate,
        bits_per_sample: 32,
        sample_format:   hound::SampleFormat::Float,
    }
}

/// Write `samples` as a single-channel float WAV, replacing any existing file.
pub fn write_mono_f32(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let wrap = |source| ExportError::Wav { path: path.to_path_buf(), source };

    let mut writer = hound::WavWriter::create(path, spec(sample_rate)).map_err(wrap)?;
    for &s in samples {
        writer.write_sample(s).map_err(wrap)?;
    }
    writer.finalize().map_err(wrap)?;
    Ok(())
}
