//! Export HRIR WAV pairs from a SOFA file.
//!
//! SOFA files are NetCDF containers. We read `Data.IR` `[M, R, N]`,
//! `SourcePosition` `[M, >=2]` and `Data.SamplingRate`, pick measurements by
//! rounded azimuth/elevation and write each direction as
//! `azi_<az>_ele_<el>_L.wav` + `azi_<az>_ele_<el>_R.wav` (mono, 32-bit float).

pub mod config;
pub mod error;
pub mod export;
pub mod inspect;
pub mod selection;
pub mod sofa;
pub mod wav;

pub use config::{AzimuthList, ElevationMode, ExportRequest};
pub use error::{ExportError, FormatError};
pub use export::{export, export_measurements, ExportReport};
pub use inspect::{inspect, DatasetSummary};
pub use selection::{round_degrees, Coordinates, DirectionKey};
pub use sofa::MeasurementSet;
