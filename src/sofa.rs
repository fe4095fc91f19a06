//! Reading the three SOFA arrays we care about into memory.
//!
//! Only `Data.IR`, `SourcePosition` and `Data.SamplingRate` are touched; every
//! other variable or attribute in the container is ignored. Shapes are checked
//! from the variable dimensions before any values are read, so a malformed
//! file fails without materializing the IR block.

use std::path::Path;

use log::debug;

use crate::error::{ExportError, FormatError, Result};

pub const IR_VAR: &str            = "Data.IR";
pub const POSITION_VAR: &str      = "SourcePosition";
pub const SAMPLING_RATE_VAR: &str = "Data.SamplingRate";

/// Index of the left/right receiver on the `R` axis of `Data.IR`.
pub const LEFT: usize  = 0;
pub const RIGHT: usize = 1;

/// Fully materialized measurement set: `M` measurements of `R` receivers with
/// `N` samples each, plus one `(azimuth, elevation, ...)` row per measurement.
#[derive(Debug, Clone)]
pub struct MeasurementSet {
    ir:           Vec<f64>, // row-major [M, R, N]
    measurements: usize,
    receivers:    usize,
    samples:      usize,
    positions:    Vec<f64>, // row-major [M, C]
    columns:      usize,
    sample_rate:  f64,
}

/// Check the `Data.IR` / `SourcePosition` dimension lists.
///
/// Returns `(M, R, N, C)` on success. The order of checks matters: the first
/// failing one is the one reported.
pub fn validate_shapes(
    ir_shape:  &[usize],
    pos_shape: &[usize],
) -> std::result::Result<(usize, usize, usize, usize), FormatError> {
    let &[m, r, n] = ir_shape else {
        return Err(FormatError::IrRank { shape: ir_shape.to_vec() });
    };
    if r < 2 {
        return Err(FormatError::TooFewReceivers(r));
    }
    let &[rows, cols] = pos_shape else {
        return Err(FormatError::PositionRank { shape: pos_shape.to_vec() });
    };
    if rows != m {
        return Err(FormatError::PositionRows { expected: m, actual: rows });
    }
    if cols < 2 {
        return Err(FormatError::PositionColumns(cols));
    }
    Ok((m, r, n, cols))
}

/// `Data.SamplingRate` may be a scalar or a length-1 (or longer) array; the
/// first value wins. Its whole-Hz part must fit a WAV header (1..=u32::MAX).
pub fn validate_sample_rate(values: &[f64]) -> std::result::Result<f64, FormatError> {
    let fs = *values.first().ok_or(FormatError::EmptySamplingRate)?;
    let whole = fs.trunc();
    if !fs.is_finite() || whole < 1.0 || whole > f64::from(u32::MAX) {
        return Err(FormatError::InvalidSamplingRate(fs));
    }
    Ok(fs)
}

/// Every azimuth/elevation must be a real number; NaN would round to 0°.
pub fn validate_positions(positions: &[f64], columns: usize) -> std::result::Result<(), FormatError> {
    for (index, row) in positions.chunks_exact(columns).enumerate() {
        let (azimuth, elevation) = (row[0], row[1]);
        if !azimuth.is_finite() || !elevation.is_finite() {
            return Err(FormatError::NonFinitePosition { index, azimuth, elevation });
        }
    }
    Ok(())
}

impl MeasurementSet {
    /// Build a set from flat row-major buffers and their shapes.
    pub fn new(
        ir_shape:      &[usize],
        ir:            Vec<f64>,
        pos_shape:     &[usize],
        positions:     Vec<f64>,
        sampling_rate: &[f64],
    ) -> std::result::Result<Self, FormatError> {
        let (m, r, n, c) = validate_shapes(ir_shape, pos_shape)?;
        check_len(IR_VAR, m * r * n, ir.len())?;
        check_len(POSITION_VAR, m * c, positions.len())?;
        validate_positions(&positions, c)?;
        let sample_rate = validate_sample_rate(sampling_rate)?;

        Ok(Self {
            ir,
            receivers: r,
            samples: n,
            positions,
            columns: c,
            measurements: m,
            sample_rate,
        })
    }

    pub fn measurements(&self) -> usize { self.measurements }
    pub fn receivers(&self) -> usize { self.receivers }
    pub fn samples(&self) -> usize { self.samples }
    pub fn sample_rate(&self) -> f64 { self.sample_rate }

    /// Sample rate for the WAV header, truncated to whole Hz.
    pub fn wav_sample_rate(&self) -> u32 {
        self.sample_rate as u32
    }

    /// Raw `(azimuth, elevation)` in degrees for measurement `m`.
    pub fn position(&self, m: usize) -> (f64, f64) {
        let row = &self.positions[m * self.columns..(m + 1) * self.columns];
        (row[0], row[1])
    }

    /// All raw positions in measurement order.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.measurements).map(move |m| self.position(m))
    }

    /// One receiver's impulse response, narrowed to `f32`.
    pub fn channel_f32(&self, m: usize, receiver: usize) -> Vec<f32> {
        let start = (m * self.receivers + receiver) * self.samples;
        self.ir[start..start + self.samples]
            .iter()
            .map(|&v| v as f32)
            .collect()
    }
}

fn check_len(name: &'static str, expected: usize, actual: usize) -> std::result::Result<(), FormatError> {
    if expected != actual {
        return Err(FormatError::LengthMismatch { name, expected, actual });
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────
// NetCDF side
// ─────────────────────────────────────────────────────────────────────

/// Open a SOFA file read-only and load it.
///
/// The `netcdf::File` lives only for the duration of this call and is closed
/// on every return path, including validation failures.
pub fn open(path: &Path) -> Result<MeasurementSet> {
    let file = netcdf::open(path).map_err(|source| ExportError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let set = read_measurements(&file)?;
    debug!(
        "loaded {}: M={} R={} N={} fs={}",
        path.display(),
        set.measurements(),
        set.receivers(),
        set.samples(),
        set.sample_rate()
    );
    Ok(set)
}

fn read_measurements(file: &netcdf::File) -> Result<MeasurementSet> {
    let ir  = require(file, IR_VAR)?;
    let pos = require(file, POSITION_VAR)?;
    let fs  = require(file, SAMPLING_RATE_VAR)?;

    let ir_shape  = shape(&ir);
    let pos_shape = shape(&pos);
    validate_shapes(&ir_shape, &pos_shape)?;

    let ir_values  = read_f64(&ir, IR_VAR)?;
    let pos_values = read_f64(&pos, POSITION_VAR)?;
    let fs_values  = read_f64(&fs, SAMPLING_RATE_VAR)?;

    Ok(MeasurementSet::new(&ir_shape, ir_values, &pos_shape, pos_values, &fs_values)?)
}

fn require<'f>(file: &'f netcdf::File, name: &'static str) -> Result<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or(ExportError::Format(FormatError::MissingVariable(name)))
}

fn shape(var: &netcdf::Variable<'_>) -> Vec<usize> {
    var.dimensions().iter().map(|d| d.len()).collect()
}

fn read_f64(var: &netcdf::Variable<'_>, name: &'static str) -> Result<Vec<f64>> {
    var.get_values::<f64, _>(..)
        .map_err(|source| ExportError::Read { name, source })
}
