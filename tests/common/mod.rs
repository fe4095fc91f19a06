//! SOFA fixtures written with the netcdf crate.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const FS: f64 = 44_100.0;
pub const N: usize = 8;

/// Left sample `i` of measurement `k`: alternating ±(k+1)/2.
pub fn left_sample(k: usize, i: usize) -> f64 {
    let amp = (k + 1) as f64 * 0.5;
    if i % 2 == 0 { amp } else { -amp }
}

/// Right sample `i` of measurement `k`: a ramp scaled by -(k+1)/4.
pub fn right_sample(k: usize, i: usize) -> f64 {
    -((k + 1) as f64) * 0.25 * (i as f64 / (N - 1) as f64)
}

/// Write a well-formed SOFA file with one measurement per `(azimuth, elevation)`.
pub fn write_sofa(path: &Path, positions: &[(f64, f64)]) -> PathBuf {
    write_sofa_with_rate(path, positions, false)
}

/// Like [`write_sofa`], but `Data.SamplingRate` is a zero-dimension scalar.
pub fn write_sofa_scalar_rate(path: &Path, positions: &[(f64, f64)]) -> PathBuf {
    write_sofa_with_rate(path, positions, true)
}

fn write_sofa_with_rate(path: &Path, positions: &[(f64, f64)], scalar_rate: bool) -> PathBuf {
    let m = positions.len();
    let mut ir = Vec::with_capacity(m * 2 * N);
    for k in 0..m {
        ir.extend((0..N).map(|i| left_sample(k, i)));
        ir.extend((0..N).map(|i| right_sample(k, i)));
    }
    let pos: Vec<f64> = positions.iter().flat_map(|&(a, e)| [a, e, 1.2]).collect();

    let mut nc = netcdf::create(path).unwrap();
    nc.add_dimension("M", m).unwrap();
    nc.add_dimension("R", 2).unwrap();
    nc.add_dimension("N", N).unwrap();
    nc.add_dimension("C", 3).unwrap();
    nc.add_dimension("I", 1).unwrap();
    nc.add_attribute("SOFAConventions", "SimpleFreeFieldHRIR").unwrap();

    nc.add_variable::<f64>("Data.IR", &["M", "R", "N"])
        .unwrap()
        .put_values(&ir, ..)
        .unwrap();
    nc.add_variable::<f64>("SourcePosition", &["M", "C"])
        .unwrap()
        .put_values(&pos, ..)
        .unwrap();
    if scalar_rate {
        nc.add_variable::<f64>("Data.SamplingRate", &[])
            .unwrap()
            .put_value(FS, ..)
            .unwrap();
    } else {
        nc.add_variable::<f64>("Data.SamplingRate", &["I"])
            .unwrap()
            .put_values(&[FS], ..)
            .unwrap();
    }

    path.to_path_buf()
}

/// `Data.IR` is `[M, N]` instead of `[M, R, N]`.
pub fn write_sofa_2d_ir(path: &Path, m: usize) -> PathBuf {
    let mut nc = netcdf::create(path).unwrap();
    nc.add_dimension("M", m).unwrap();
    nc.add_dimension("N", N).unwrap();
    nc.add_dimension("C", 3).unwrap();
    nc.add_dimension("I", 1).unwrap();

    nc.add_variable::<f64>("Data.IR", &["M", "N"])
        .unwrap()
        .put_values(&vec![0.1; m * N], ..)
        .unwrap();
    nc.add_variable::<f64>("SourcePosition", &["M", "C"])
        .unwrap()
        .put_values(&vec![0.0; m * 3], ..)
        .unwrap();
    nc.add_variable::<f64>("Data.SamplingRate", &["I"])
        .unwrap()
        .put_values(&[FS], ..)
        .unwrap();

    path.to_path_buf()
}

/// Well-formed IR but no `SourcePosition`.
pub fn write_sofa_without_positions(path: &Path) -> PathBuf {
    let mut nc = netcdf::create(path).unwrap();
    nc.add_dimension("M", 1).unwrap();
    nc.add_dimension("R", 2).unwrap();
    nc.add_dimension("N", N).unwrap();
    nc.add_dimension("I", 1).unwrap();

    nc.add_variable::<f64>("Data.IR", &["M", "R", "N"])
        .unwrap()
        .put_values(&vec![0.0; 2 * N], ..)
        .unwrap();
    nc.add_variable::<f64>("Data.SamplingRate", &["I"])
        .unwrap()
        .put_values(&[FS], ..)
        .unwrap();

    path.to_path_buf()
}

pub fn read_wav(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<f32>().map(|s| s.unwrap()).collect();
    (spec, samples)
}

/// Sorted file names in `dir`, empty if it does not exist.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(rd) = std::fs::read_dir(dir) else { return Vec::new() };
    let mut names: Vec<String> = rd
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
