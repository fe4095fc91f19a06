//! The export loop: select, de-duplicate, write, summarize.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    config::ExportRequest,
    error::{ExportError, Result},
    selection::{Coordinates, DirectionKey},
    sofa::{self, MeasurementSet, LEFT, RIGHT},
    wav,
};

pub const MANIFEST_FILE: &str = "manifest.csv";

/// What one export run did.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub out_dir:          PathBuf,
    pub sample_rate:      u32,
    pub samples:          usize,
    pub dry_run:          bool,
    /// Newly written (or, in a dry run, to-be-written) keys in export order.
    pub exported:         Vec<DirectionKey>,
    /// Keys left alone because an output file was already there.
    pub skipped_existing: Vec<DirectionKey>,
    /// Requested azimuths with no measurement at all.
    pub missing_azimuths: Vec<i32>,
    pub manifest:         Option<PathBuf>,
}

impl ExportReport {
    pub fn count(&self) -> usize {
        self.exported.len()
    }

    /// Exported elevations grouped by azimuth, both ascending.
    pub fn by_azimuth(&self) -> BTreeMap<i32, Vec<i32>> {
        let mut grouped: BTreeMap<i32, BTreeSet<i32>> = BTreeMap::new();
        for key in &self.exported {
            grouped.entry(key.azimuth).or_default().insert(key.elevation);
        }
        grouped
            .into_iter()
            .map(|(az, els)| (az, els.into_iter().collect()))
            .collect()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Dry run. Would export" } else { "Done. Exported" };
        writeln!(f, "{verb} {} directions into: {}", self.count(), self.out_dir.display())?;
        for (az, els) in self.by_azimuth() {
            writeln!(f, "  az {az:>4}°: elevations {els:?}")?;
        }
        if !self.skipped_existing.is_empty() {
            writeln!(f, "  {} directions already on disk (use --overwrite to replace)", self.skipped_existing.len())?;
        }
        if !self.missing_azimuths.is_empty() {
            writeln!(f, "  no measurements for azimuths {:?}", self.missing_azimuths)?;
        }
        Ok(())
    }
}

/// Run a full export: open and validate the SOFA file, then write WAV pairs.
///
/// Nothing is written if the file is malformed.
pub fn export(request: &ExportRequest) -> Result<ExportReport> {
    request.validate().map_err(ExportError::InvalidRequest)?;
    let set = sofa::open(&request.input)?;
    export_measurements(&set, request)
}

/// Export from an already loaded set. `request.input` is not consulted.
pub fn export_measurements(set: &MeasurementSet, request: &ExportRequest) -> Result<ExportReport> {
    request.validate().map_err(ExportError::InvalidRequest)?;

    let out_dir = request.output.as_path();
    if !request.dry_run {
        fs::create_dir_all(out_dir).map_err(|source| io_err(out_dir, source))?;
    }

    let coords = Coordinates::from_set(set);
    let mut report = ExportReport {
        out_dir:     out_dir.to_path_buf(),
        sample_rate: set.wav_sample_rate(),
        samples:     set.samples(),
        dry_run:     request.dry_run,
        ..Default::default()
    };
    let mut used: HashSet<DirectionKey> = HashSet::new();

    for az in request.azimuths.iter() {
        let selected = coords.select(az, request.elevation);
        if selected.is_empty() {
            warn!("No measurements found for azimuth {az}°");
            report.missing_azimuths.push(az);
            continue;
        }

        for m in selected {
            let key = coords.key(m);
            if !used.insert(key) {
                debug!("{key}: duplicate after rounding (measurement {m}), skipped");
                continue;
            }

            let (left_path, right_path) = key.paths(out_dir);
            if !request.overwrite && (exists(&left_path)? || exists(&right_path)?) {
                debug!("{key}: output exists, skipped");
                report.skipped_existing.push(key);
                continue;
            }

            if !request.dry_run {
                write_pair(set, m, request.normalize, &left_path, &right_path)?;
                info!("{key} -> {}", left_path.display());
            }
            report.exported.push(key);
        }
    }

    if request.manifest && !request.dry_run {
        let path = out_dir.join(MANIFEST_FILE);
        write_manifest(&path, &report)?;
        report.manifest = Some(path);
    }

    info!(
        "exported {} directions, {} already present, {} azimuths missing",
        report.count(),
        report.skipped_existing.len(),
        report.missing_azimuths.len()
    );
    Ok(report)
}

fn write_pair(set: &MeasurementSet, m: usize, normalize: bool, left_path: &Path, right_path: &Path) -> Result<()> {
    let mut left  = set.channel_f32(m, LEFT);
    let mut right = set.channel_f32(m, RIGHT);
    if normalize {
        let peak = wav::peak_normalize(&mut left, &mut right);
        debug!("measurement {m}: normalized by peak {peak}");
    }
    let fs = set.wav_sample_rate();
    wav::write_mono_f32(left_path, &left, fs)?;
    wav::write_mono_f32(right_path, &right, fs)?;
    Ok(())
}

/// Rewrite `manifest.csv` with one row per direction exported in this run.
pub fn write_manifest(path: &Path, report: &ExportReport) -> Result<()> {
    let wrap = |source| ExportError::Manifest { path: path.to_path_buf(), source };

    let mut keys = report.exported.clone();
    keys.sort();

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(wrap)?;
    wtr.write_record(["azimuth", "elevation", "left", "right", "sample_rate", "samples"])
        .map_err(wrap)?;
    for key in keys {
        let (l, r) = key.file_names();
        wtr.write_record([
            key.azimuth.to_string(),
            key.elevation.to_string(),
            l,
            r,
            report.sample_rate.to_string(),
            report.samples.to_string(),
        ])
        .map_err(wrap)?;
    }
    wtr.flush().map_err(|source| io_err(path, source))?;
    Ok(())
}

fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|source| io_err(path, source))
}

fn io_err(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io { path: path.to_path_buf(), source }
}
