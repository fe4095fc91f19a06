use std::path::PathBuf;

use thiserror::Error;

/// A SOFA file that opened fine but does not have the arrays we need.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("SOFA missing variable '{0}'")]
    MissingVariable(&'static str),

    #[error("unexpected Data.IR shape {shape:?} (expected [M, R, N])")]
    IrRank { shape: Vec<usize> },

    #[error("expected at least 2 receivers (L/R) in Data.IR, got R={0}")]
    TooFewReceivers(usize),

    #[error("unexpected SourcePosition shape {shape:?} (expected [M, >=2])")]
    PositionRank { shape: Vec<usize> },

    #[error("SourcePosition has {actual} rows but Data.IR has M={expected}")]
    PositionRows { expected: usize, actual: usize },

    #[error("SourcePosition has {0} columns (expected >=2: azimuth, elevation)")]
    PositionColumns(usize),

    #[error("Data.SamplingRate is empty")]
    EmptySamplingRate,

    #[error("Data.SamplingRate must be between 1 and {max} Hz, got {0}", max = u32::MAX)]
    InvalidSamplingRate(f64),

    #[error("SourcePosition row {index} is not finite: azimuth {azimuth}, elevation {elevation}")]
    NonFinitePosition {
        index:     usize,
        azimuth:   f64,
        elevation: f64,
    },

    #[error("variable '{name}' holds {actual} values, shape implies {expected}")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Everything [`crate::export`] and [`crate::inspect`] can fail with.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("invalid export request: {0}")]
    InvalidRequest(String),

    #[error("cannot open SOFA file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: netcdf::Error,
    },

    #[error("cannot read variable '{name}': {source}")]
    Read {
        name: &'static str,
        #[source]
        source: netcdf::Error,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write WAV {path}: {source}")]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("cannot write manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    /// True for malformed-input errors, false for I/O-side failures.
    pub fn is_format(&self) -> bool {
        matches!(self, ExportError::Format(_))
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
