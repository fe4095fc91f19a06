//! Export configuration: what to read, where to write, which directions.

use std::{
    collections::BTreeSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Default azimuth sweep: -90° to +90° in 10° steps.
pub const DEFAULT_AZIMUTHS: &str = "-90:90:10";

/// Range bounds in `--azimuths` must lie within ±this many degrees.
pub const MAX_RANGE_DEG: i32 = 360;

/// How elevations are picked for each requested azimuth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ElevationMode {
    /// Every elevation measured at that azimuth.
    #[default]
    All,
    /// Only the elevation closest to the target (degrees).
    Nearest(f64),
}

/// A de-duplicated, ascending set of integer azimuths.
///
/// Parses from a comma-separated list of integers and inclusive ranges
/// `start:end[:step]`, e.g. `-90:90:10`, `0,45,90` or `0:30:15,180`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AzimuthList(BTreeSet<i32>);

impl AzimuthList {
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl FromIterator<i32> for AzimuthList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        AzimuthList(iter.into_iter().collect())
    }
}

impl FromStr for AzimuthList {
    type Err = String;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut out = BTreeSet::new();
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.contains(':') {
                out.extend(parse_range(part)?);
            } else {
                out.insert(parse_deg(part)?);
            }
        }
        if out.is_empty() {
            return Err(format!("no azimuths in '{spec}'"));
        }
        Ok(AzimuthList(out))
    }
}

impl fmt::Display for AzimuthList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

fn parse_deg(s: &str) -> Result<i32, String> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| format!("bad azimuth '{s}': {e}"))
}

fn parse_range(part: &str) -> Result<Vec<i32>, String> {
    let fields: Vec<_> = part.split(':').collect();
    let (start, end, step) = match fields.as_slice() {
        [a, b]    => (parse_deg(a)?, parse_deg(b)?, 1),
        [a, b, s] => (parse_deg(a)?, parse_deg(b)?, parse_deg(s)?),
        _ => return Err(format!("bad range '{part}' (expected start:end[:step])")),
    };
    if step <= 0 {
        return Err(format!("bad range '{part}': step must be positive"));
    }
    if start > end {
        return Err(format!("bad range '{part}': start is after end"));
    }
    if start < -MAX_RANGE_DEG || end > MAX_RANGE_DEG {
        return Err(format!("bad range '{part}': bounds must be within ±{MAX_RANGE_DEG}°"));
    }
    Ok((start..=end).step_by(step as usize).collect())
}

/// One export run.
///
/// `new` fills in the defaults of the stock conversion: the -90..90 sweep,
/// all elevations, no overwrite, no normalization.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub input:     PathBuf,
    pub output:    PathBuf,
    pub azimuths:  AzimuthList,
    pub elevation: ElevationMode,
    pub overwrite: bool,
    pub normalize: bool,
    pub dry_run:   bool,
    pub manifest:  bool,
}

impl ExportRequest {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input:     input.as_ref().to_path_buf(),
            output:    output.as_ref().to_path_buf(),
            azimuths:  default_azimuths(),
            elevation: ElevationMode::All,
            overwrite: false,
            normalize: false,
            dry_run:   false,
            manifest:  false,
        }
    }

    pub fn azimuths(mut self, azimuths: impl IntoIterator<Item = i32>) -> Self {
        self.azimuths = azimuths.into_iter().collect();
        self
    }

    pub fn elevation(mut self, mode: ElevationMode) -> Self {
        self.elevation = mode;
        self
    }

    pub fn overwrite(mut self, yes: bool) -> Self {
        self.overwrite = yes;
        self
    }

    pub fn normalize(mut self, yes: bool) -> Self {
        self.normalize = yes;
        self
    }

    pub fn dry_run(mut self, yes: bool) -> Self {
        self.dry_run = yes;
        self
    }

    pub fn manifest(mut self, yes: bool) -> Self {
        self.manifest = yes;
        self
    }

    /// Reject requests that cannot select anything meaningful.
    pub fn validate(&self) -> Result<(), String> {
        if self.azimuths.is_empty() {
            return Err("no azimuths requested".into());
        }
        if let ElevationMode::Nearest(target) = self.elevation {
            if !target.is_finite() {
                return Err(format!("target elevation must be finite, got {target}"));
            }
        }
        if self.output.as_os_str().is_empty() {
            return Err("output directory is empty".into());
        }
        Ok(())
    }
}

fn default_azimuths() -> AzimuthList {
    (-90..=90).step_by(10).collect()
}
