//! Integer direction keys and per-azimuth measurement selection.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
};

use crate::{config::ElevationMode, sofa::MeasurementSet};

/// Round a raw angle to whole degrees, ties to even (44.5 → 44, 45.5 → 46).
pub fn round_degrees(deg: f64) -> i32 {
    deg.round_ties_even() as i32
}

/// `(azimuth, elevation)` in whole degrees. Orders by azimuth first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectionKey {
    pub azimuth:   i32,
    pub elevation: i32,
}

impl DirectionKey {
    pub fn new(azimuth: i32, elevation: i32) -> Self {
        Self { azimuth, elevation }
    }

    /// `azi_<az>_ele_<el>_L.wav` / `..._R.wav`, no padding, `-` for negatives.
    pub fn file_names(&self) -> (String, String) {
        let stem = format!("azi_{}_ele_{}", self.azimuth, self.elevation);
        (format!("{stem}_L.wav"), format!("{stem}_R.wav"))
    }

    pub fn paths(&self, dir: &Path) -> (PathBuf, PathBuf) {
        let (l, r) = self.file_names();
        (dir.join(l), dir.join(r))
    }
}

impl fmt::Display for DirectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "az {}° el {}°", self.azimuth, self.elevation)
    }
}

/// Rounded coordinates of every measurement, in array order.
#[derive(Debug, Clone, Default)]
pub struct Coordinates {
    azimuths:   Vec<i32>,
    elevations: Vec<i32>,
}

impl Coordinates {
    pub fn from_degrees(positions: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (azimuths, elevations) = positions
            .into_iter()
            .map(|(az, el)| (round_degrees(az), round_degrees(el)))
            .unzip();
        Self { azimuths, elevations }
    }

    pub fn from_set(set: &MeasurementSet) -> Self {
        Self::from_degrees(set.positions())
    }

    pub fn len(&self) -> usize { self.azimuths.len() }
    pub fn is_empty(&self) -> bool { self.azimuths.is_empty() }

    pub fn key(&self, m: usize) -> DirectionKey {
        DirectionKey::new(self.azimuths[m], self.elevations[m])
    }

    /// Indices whose rounded azimuth equals `azimuth`, in array order.
    pub fn matching_azimuth(&self, azimuth: i32) -> Vec<usize> {
        self.azimuths
            .iter()
            .enumerate()
            .filter(|&(_, &a)| a == azimuth)
            .map(|(m, _)| m)
            .collect()
    }

    /// Measurement indices to export for `azimuth`; empty if none exist.
    ///
    /// In nearest mode the closest rounded elevation is taken from the first
    /// match in array order, then every match at that elevation is kept.
    pub fn select(&self, azimuth: i32, mode: ElevationMode) -> Vec<usize> {
        let matches = self.matching_azimuth(azimuth);
        match mode {
            ElevationMode::All => matches,
            ElevationMode::Nearest(target) => {
                let target = i64::from(round_degrees(target));
                let closest = matches
                    .iter()
                    .map(|&m| self.elevations[m])
                    .min_by_key(|&el| (i64::from(el) - target).abs());
                match closest {
                    Some(el) => matches
                        .into_iter()
                        .filter(|&m| self.elevations[m] == el)
                        .collect(),
                    None => Vec::new(),
                }
            }
        }
    }

    /// Available elevations per azimuth.
    pub fn grid(&self) -> BTreeMap<i32, BTreeSet<i32>> {
        let mut out: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
        for (&az, &el) in self.azimuths.iter().zip(&self.elevations) {
            out.entry(az).or_default().insert(el);
        }
        out
    }
}
