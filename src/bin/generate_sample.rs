use std::f64::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use scorus::healpix::pix::pix2ang_ring;
use scorus::healpix::utils::nside2npix;

use gamma_sky_viz::data::model::{SkyDataset, ENERGY_UNIT, SKY_FLUX_UNIT};
use gamma_sky_viz::data::writer::write_dataset;

const NSIDE: usize = 32;

/// Toy flux in MeV / (cm² sr s): a bright galactic ridge peaking towards the
/// centre, on top of an isotropic floor, falling off as a power law.
fn toy_flux(energy: f64, longitude: f64, latitude: f64) -> f64 {
    let gaussian = |x: f64, sigma: f64| (-x.powi(2) / (2.0 * sigma.powi(2))).exp();

    // longitude wrapped to [-π, π)
    let l = (longitude + PI).rem_euclid(2.0 * PI) - PI;
    let ridge = gaussian(latitude, 4f64.to_radians()) * (0.3 + gaussian(l, 35f64.to_radians()));
    let bulge = 0.5 * gaussian(l.hypot(latitude), 10f64.to_radians());
    let isotropic = 0.02;

    1e-3 * (energy / 100.0).powf(-0.7) * (ridge + bulge + isotropic)
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_gamma_sky.h5"));

    // 100 MeV → 1 TeV
    let energies: Array1<f64> = (0..5).map(|i| 100.0 * 10f64.powi(i)).collect();

    let npix = nside2npix(NSIDE);
    let directions: Vec<(f64, f64)> = (0..npix)
        .map(|pixel| {
            let centre = pix2ang_ring::<f64>(NSIDE, pixel);
            (centre.az, FRAC_PI_2 - centre.pol)
        })
        .collect();

    let skies = Array2::from_shape_fn((energies.len(), npix), |(e, p)| {
        let (longitude, latitude) = directions[p];
        toy_flux(energies[e], longitude, latitude)
    });

    let dataset = SkyDataset {
        skies,
        energies,
        energy_unit: ENERGY_UNIT.to_string(),
        flux_unit: SKY_FLUX_UNIT.to_string(),
    };
    write_dataset(&output_path, &dataset)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} gamma skies (nside {NSIDE}, {npix} pixels each) to {}",
        dataset.number_of_energies(),
        output_path.display()
    );
    Ok(())
}
