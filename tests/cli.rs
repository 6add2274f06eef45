use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use gamma_sky_viz::data::model::{SkyDataset, ENERGY_UNIT, SKY_FLUX_UNIT};
use gamma_sky_viz::data::writer::write_dataset;
use ndarray::{array, Array2};
use tempfile::TempDir;

/// Three energies over an nside 2 sky.
fn write_skies(dir: &Path, energy_unit: &str) -> PathBuf {
    let path = dir.join("gamma_skies.h5");
    let dataset = SkyDataset {
        skies: Array2::from_shape_fn((3, 48), |(e, p)| 1e-4 * (1 + e * 48 + p) as f64),
        energies: array![10.0, 100.0, 1000.0],
        energy_unit: energy_unit.to_string(),
        flux_unit: SKY_FLUX_UNIT.to_string(),
    };
    write_dataset(&path, &dataset).unwrap();
    path
}

fn run(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gamma-sky-viz"))
        .args(args)
        .output()
        .expect("failed to run gamma-sky-viz")
}

#[test]
fn saves_the_selected_energy() {
    let dir = TempDir::new().unwrap();
    let input = write_skies(dir.path(), ENERGY_UNIT);
    let output = dir.path().join("out.png");

    let result = run(&[
        input.as_os_str(),
        OsStr::new("1"),
        OsStr::new("--save"),
        output.as_os_str(),
    ]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["Available Energies:", "  0: 0.01 GeV", "  1: 0.10 GeV", "  2: 1.00 GeV"]
    );
    let image = image::open(&output).unwrap();
    assert_eq!(image.width(), 1400);
}

#[test]
fn logarithmic_plot_can_be_saved() {
    let dir = TempDir::new().unwrap();
    let input = write_skies(dir.path(), ENERGY_UNIT);
    let output = dir.path().join("log.png");

    let result = run(&[
        input.as_os_str(),
        OsStr::new("2"),
        OsStr::new("--log"),
        OsStr::new("--width"),
        OsStr::new("500"),
        OsStr::new("--save"),
        output.as_os_str(),
    ]);

    assert!(result.status.success(), "{}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(image::open(&output).unwrap().width(), 500);
}

#[test]
fn out_of_range_index_exits_with_one() {
    let dir = TempDir::new().unwrap();
    let input = write_skies(dir.path(), ENERGY_UNIT);

    for index in ["3", "-1"] {
        let result = run(&[input.as_os_str(), OsStr::new(index)]);
        assert_eq!(result.status.code(), Some(1));
        let stdout = String::from_utf8_lossy(&result.stdout);
        // the listing still comes first, the message closes it
        assert!(stdout.starts_with("Available Energies:"), "unexpected stdout: {stdout}");
        assert_eq!(
            stdout.lines().last(),
            Some(format!("error: invalid energy index \"{index}\".").as_str())
        );
    }
}

#[test]
fn wrong_energy_unit_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_skies(dir.path(), "GeV");
    let output = dir.path().join("never.png");

    let result = run(&[
        input.as_os_str(),
        OsStr::new("0"),
        OsStr::new("--save"),
        output.as_os_str(),
    ]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("wrong energy unit"));
    assert!(!String::from_utf8_lossy(&result.stdout).contains("Available Energies"));
    assert!(!output.exists());
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = run(&[dir.path().join("absent.h5").as_os_str(), OsStr::new("0")]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("absent.h5"));
}

#[test]
fn oversized_width_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_skies(dir.path(), ENERGY_UNIT);
    let output = dir.path().join("huge.png");

    let result = run(&[
        input.as_os_str(),
        OsStr::new("0"),
        OsStr::new("--width"),
        OsStr::new("4000000000"),
        OsStr::new("--save"),
        output.as_os_str(),
    ]);

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("figure width of 4000000000 px"));
    assert!(!output.exists());
}
