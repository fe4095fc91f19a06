//! Drives the `sofa_to_wav` binary end to end.

mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin("sofa_to_wav").expect("Failed to find `sofa_to_wav` binary")
}

#[test]
fn test_cli_export_and_summary() {
    let tmp = TempDir::new().unwrap();
    let sofa = write_sofa(&tmp.path().join("s.sofa"), &[(-30.0, 0.0), (-30.0, 20.0), (30.0, 0.0)]);
    let out = tmp.path().join("wav");

    cmd()
        .arg("--input").arg(&sofa)
        .arg("--output").arg(&out)
        .arg("--azimuths").arg("-30:30:60")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 directions"))
        .stdout(predicate::str::contains("az  -30°: elevations [0, 20]"));

    assert!(out.join("azi_-30_ele_20_L.wav").exists());
    assert!(out.join("azi_30_ele_0_R.wav").exists());
}

#[test]
fn test_cli_nearest_elevation() {
    let tmp = TempDir::new().unwrap();
    let sofa = write_sofa(&tmp.path().join("s.sofa"), &[(0.0, -10.0), (0.0, 0.0), (0.0, 10.0)]);
    let out = tmp.path().join("wav");

    cmd()
        .arg("-i").arg(&sofa)
        .arg("-o").arg(&out)
        .args(["--azimuths", "0", "--nearest-elevation", "--elevation", "-7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 directions"));

    assert_eq!(list_dir(&out), vec!["azi_0_ele_-10_L.wav", "azi_0_ele_-10_R.wav"]);
}

#[test]
fn test_cli_inspect_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let sofa = write_sofa(&tmp.path().join("s.sofa"), &[(0.0, 0.0), (90.0, 0.0)]);

    cmd()
        .arg("--input").arg(&sofa)
        .arg("--inspect")
        .assert()
        .success()
        .stdout(predicate::str::contains("M=2 R=2 N=8"))
        .stdout(predicate::str::contains("az   90°: elevations [0]"));

    assert_eq!(list_dir(tmp.path()), vec!["s.sofa"]);
}

#[test]
fn test_cli_malformed_input_fails() {
    let tmp = TempDir::new().unwrap();
    let sofa = write_sofa_2d_ir(&tmp.path().join("bad.sofa"), 2);
    let out = tmp.path().join("wav");

    cmd()
        .arg("--input").arg(&sofa)
        .arg("--output").arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Data.IR"));

    assert!(list_dir(&out).is_empty());
}

#[test]
fn test_cli_rejects_bad_azimuths_and_conflicting_modes() {
    let tmp = TempDir::new().unwrap();
    let sofa = write_sofa(&tmp.path().join("s.sofa"), &[(0.0, 0.0)]);

    cmd()
        .arg("--input").arg(&sofa)
        .arg("--output").arg(tmp.path().join("wav"))
        .args(["--azimuths", "10:0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start is after end"));

    cmd()
        .arg("--input").arg(&sofa)
        .arg("--output").arg(tmp.path().join("wav"))
        .args(["--all-elevations", "--nearest-elevation"])
        .assert()
        .failure();

    cmd()
        .arg("--input").arg(&sofa)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}
