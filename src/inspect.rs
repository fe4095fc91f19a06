//! Read-only overview of a SOFA file: sizes, rate and the direction grid.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

use crate::{error::Result, selection::Coordinates, sofa::{self, MeasurementSet}};

#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub path:         PathBuf,
    pub measurements: usize,
    pub receivers:    usize,
    pub samples:      usize,
    pub sample_rate:  f64,
    /// Rounded azimuth → rounded elevations present.
    pub grid:         BTreeMap<i32, BTreeSet<i32>>,
}

impl DatasetSummary {
    pub fn from_set(path: &Path, set: &MeasurementSet) -> Self {
        Self {
            path:         path.to_path_buf(),
            measurements: set.measurements(),
            receivers:    set.receivers(),
            samples:      set.samples(),
            sample_rate:  set.sample_rate(),
            grid:         Coordinates::from_set(set).grid(),
        }
    }

    /// Unique rounded directions; can be less than `measurements`.
    pub fn directions(&self) -> usize {
        self.grid.values().map(BTreeSet::len).sum()
    }
}

/// Open and validate `path` without writing anything.
pub fn inspect(path: &Path) -> Result<DatasetSummary> {
    let set = sofa::open(path)?;
    Ok(DatasetSummary::from_set(path, &set))
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path.display())?;
        writeln!(
            f,
            "  M={} R={} N={} fs={} Hz, {} unique directions",
            self.measurements,
            self.receivers,
            self.samples,
            self.sample_rate,
            self.directions()
        )?;
        for (az, els) in &self.grid {
            let els: Vec<i32> = els.iter().copied().collect();
            writeln!(f, "  az {az:>4}°: elevations {els:?}")?;
        }
        Ok(())
    }
}
