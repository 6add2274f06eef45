use ndarray::{Array1, Array2};

use crate::error::SkyError;

/// Dataset holding one sky per energy.
pub const SKIES_DATASET: &str = "gamma ray skies";
/// Dataset holding the energy of each sky.
pub const ENERGIES_DATASET: &str = "energies";
/// String attribute carrying the physical unit of a dataset.
pub const UNIT_ATTRIBUTE: &str = "unit";

pub const ENERGY_UNIT: &str = "MeV";
pub const SKY_FLUX_UNIT: &str = "MeV / (cm^2 sr s)";

const MEV_TO_GEV: f64 = 1e-3;

// ---------------------------------------------------------------------------
// SkyDataset – contents of a gamma sky file
// ---------------------------------------------------------------------------

/// Gamma ray skies together with their energies, as stored on disk.
#[derive(Debug, Clone)]
pub struct SkyDataset {
    /// Fluxes, one row per energy, one column per HEALPix pixel.
    pub skies: Array2<f64>,
    /// Energy of each row of `skies`.
    pub energies: Array1<f64>,
    pub energy_unit: String,
    pub flux_unit: String,
}

impl SkyDataset {
    /// Check the units and the shapes against what the viewer expects.
    ///
    /// Units are compared verbatim; the energy unit is checked first.
    pub fn validate(&self) -> Result<(), SkyError> {
        if self.energy_unit != ENERGY_UNIT {
            return Err(SkyError::UnitMismatch {
                quantity: "energy",
                expected: ENERGY_UNIT,
                found: self.energy_unit.clone(),
            });
        }
        if self.flux_unit != SKY_FLUX_UNIT {
            return Err(SkyError::UnitMismatch {
                quantity: "sky flux",
                expected: SKY_FLUX_UNIT,
                found: self.flux_unit.clone(),
            });
        }
        self.check_shape()
    }

    fn check_shape(&self) -> Result<(), SkyError> {
        if self.skies.nrows() != self.energies.len() {
            return Err(SkyError::ShapeMismatch {
                skies: self.skies.nrows(),
                energies: self.energies.len(),
            });
        }
        Ok(())
    }

    pub fn number_of_energies(&self) -> usize {
        self.energies.len()
    }

    pub fn number_of_pixels(&self) -> usize {
        self.skies.ncols()
    }

    /// One line per energy: `"  <index>: <energy> GeV"`.
    pub fn energy_listing(&self) -> Vec<String> {
        self.energies
            .iter()
            .enumerate()
            .map(|(i, energy)| format!("  {i}: {:.2} GeV", energy * MEV_TO_GEV))
            .collect()
    }

    /// Pick the sky and energy at `index`.
    pub fn select(&self, index: i64) -> Result<SelectedBin, SkyError> {
        self.check_shape()?;
        let available = self.number_of_energies();
        let position = usize::try_from(index)
            .ok()
            .filter(|&i| i < available)
            .ok_or(SkyError::EnergyIndexOutOfRange { index, available })?;

        Ok(SelectedBin {
            index: position,
            energy: self.energies[position],
            sky: self.skies.row(position).to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// SelectedBin – one sky picked by the user
// ---------------------------------------------------------------------------

/// A single energy bin, still in the units of the file.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedBin {
    pub index: usize,
    /// Energy in MeV.
    pub energy: f64,
    /// Fluxes in MeV / (cm² sr s).
    pub sky: Vec<f64>,
}
