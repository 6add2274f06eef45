use std::path::Path;

use hdf5::types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode};
use hdf5::{Attribute, File};

use super::model::{
    SelectedBin, SkyDataset, ENERGIES_DATASET, SKIES_DATASET, UNIT_ATTRIBUTE,
};
use crate::error::SkyError;

/// Longest fixed-length unit string we read.
const MAX_UNIT_LENGTH: usize = 256;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the skies of `path`, check their units and select one energy.
///
/// The available energies are printed to stdout before the index is
/// looked up, so a caller with a wrong index can pick another one.
pub fn read_data(path: &Path, energy_index: i64) -> Result<SelectedBin, SkyError> {
    let dataset = load_dataset(path)?;

    println!("Available Energies:");
    for line in dataset.energy_listing() {
        println!("{line}");
    }

    dataset.select(energy_index)
}

/// Read and validate a gamma sky file.
///
/// The file is closed again before validation starts.
pub fn load_dataset(path: &Path) -> Result<SkyDataset, SkyError> {
    let dataset = read_file(path)?;
    log::debug!(
        "{} skies of {} pixels, energy unit \"{}\", flux unit \"{}\"",
        dataset.skies.nrows(),
        dataset.number_of_pixels(),
        dataset.energy_unit,
        dataset.flux_unit
    );
    dataset.validate()?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// HDF5 reading
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<SkyDataset, SkyError> {
    log::info!("Reading gamma skies from {}", path.display());
    let file = File::open(path)?;

    let skies_dataset = file.dataset(SKIES_DATASET)?;
    let energies_dataset = file.dataset(ENERGIES_DATASET)?;

    let skies = skies_dataset.read_2d::<f64>()?;
    let energies = energies_dataset.read_1d::<f64>()?;
    let energy_unit = read_unit(&energies_dataset.attr(UNIT_ATTRIBUTE)?)?;
    let flux_unit = read_unit(&skies_dataset.attr(UNIT_ATTRIBUTE)?)?;

    Ok(SkyDataset {
        skies,
        energies,
        energy_unit,
        flux_unit,
    })
}

/// Read a scalar string attribute regardless of how it was stored.
///
/// h5py writes `str` values as variable-length UTF-8 and `bytes` values
/// as fixed-length ASCII, so both kinds turn up in practice.
fn read_unit(attribute: &Attribute) -> Result<String, SkyError> {
    let descriptor = attribute.dtype()?.to_descriptor()?;
    let unit = match descriptor {
        TypeDescriptor::VarLenUnicode => attribute
            .read_scalar::<VarLenUnicode>()?
            .as_str()
            .to_owned(),
        TypeDescriptor::VarLenAscii => attribute
            .read_scalar::<VarLenAscii>()?
            .as_str()
            .to_owned(),
        TypeDescriptor::FixedAscii(_) => attribute
            .read_scalar::<FixedAscii<MAX_UNIT_LENGTH>>()?
            .as_str()
            .to_owned(),
        TypeDescriptor::FixedUnicode(_) => attribute
            .read_scalar::<FixedUnicode<MAX_UNIT_LENGTH>>()?
            .as_str()
            .to_owned(),
        other => return Err(SkyError::UnsupportedUnitType(format!("{other:?}"))),
    };
    Ok(unit)
}
