// USAGE cargo run --release -- --input subject.sofa --output hrir_wav [--azimuths -90:90:10]

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use log::info;
use std::{path::PathBuf, time::Instant};

use sofa_to_wav::{config::DEFAULT_AZIMUTHS, export, inspect, AzimuthList, ElevationMode, ExportRequest};

// ─────────────────────────────────────────────────────────────────────
// CLI
// ─────────────────────────────────────────────────────────────────────
#[derive(Parser, Debug)]
#[command(name = "sofa_to_wav", version, about = "Export HRIR WAV pairs (L/R) from a SOFA file")]
struct Args {
    /// SOFA (NetCDF) file to read.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory for the azi_<az>_ele_<el>_{L,R}.wav files (created if missing).
    #[arg(short, long, required_unless_present = "inspect")]
    output: Option<PathBuf>,

    /// Azimuths in degrees: list and/or ranges, e.g. "-90:90:10" or "0,45,90".
    #[arg(short, long, default_value = DEFAULT_AZIMUTHS, allow_hyphen_values = true)]
    azimuths: AzimuthList,

    /// Target elevation in degrees for --nearest-elevation.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    elevation: f64,

    /// Export every elevation at each azimuth (default).
    #[arg(long, conflicts_with = "nearest_elevation")]
    all_elevations: bool,

    /// Export only the elevation closest to --elevation.
    #[arg(long)]
    nearest_elevation: bool,

    /// Replace existing WAV files.
    #[arg(long)]
    overwrite: bool,

    /// Peak-normalize each L/R pair.
    #[arg(long)]
    normalize: bool,

    /// Select and report, but write nothing.
    #[arg(long)]
    dry_run: bool,

    /// Also write manifest.csv listing the exported pairs.
    #[arg(long)]
    manifest: bool,

    /// Print dimensions, sample rate and the direction grid, then exit.
    #[arg(long)]
    inspect: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn elevation_mode(&self) -> ElevationMode {
        if self.nearest_elevation {
            ElevationMode::Nearest(self.elevation)
        } else {
            ElevationMode::All
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Simple timing helper
// ─────────────────────────────────────────────────────────────────────
fn timeit<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let t0 = Instant::now();
    let out = f();
    info!("{label:<20}{:?}", t0.elapsed());
    out
}

// ─────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────
fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if args.inspect {
        let summary = inspect(&args.input)
            .with_context(|| format!("inspecting {}", args.input.display()))?;
        print!("{summary}");
        return Ok(());
    }

    let start: DateTime<Local> = Local::now();
    println!("[{}] Starting SOFA export…", start.format("%Y-%m-%d %H:%M:%S"));

    let output = args.output.clone().ok_or_else(|| anyhow!("--output is required"))?;
    let request = ExportRequest::new(&args.input, output)
        .azimuths(args.azimuths.iter())
        .elevation(args.elevation_mode())
        .overwrite(args.overwrite)
        .normalize(args.normalize)
        .dry_run(args.dry_run)
        .manifest(args.manifest);

    let report = timeit("export", || export(&request))
        .with_context(|| format!("exporting {}", args.input.display()))?;
    print!("{report}");

    let end: DateTime<Local> = Local::now();
    println!("[{}] Finished in {}s", end.format("%Y-%m-%d %H:%M:%S"), (end - start).num_seconds());
    Ok(())
}
