use std::path::Path;

use hdf5::types::VarLenUnicode;
use hdf5::{Dataset, File};

use super::model::{SkyDataset, ENERGIES_DATASET, SKIES_DATASET, UNIT_ATTRIBUTE};
use crate::error::SkyError;

/// Write `dataset` in the layout read by [`super::loader::load_dataset`].
///
/// An existing file at `path` is truncated. Units are written as given,
/// without validation, so broken files can be produced on purpose.
pub fn write_dataset(path: &Path, dataset: &SkyDataset) -> Result<(), SkyError> {
    let file = File::create(path)?;

    let skies = file
        .new_dataset_builder()
        .with_data(&dataset.skies)
        .create(SKIES_DATASET)?;
    write_unit(&skies, &dataset.flux_unit)?;

    let energies = file
        .new_dataset_builder()
        .with_data(&dataset.energies)
        .create(ENERGIES_DATASET)?;
    write_unit(&energies, &dataset.energy_unit)?;

    log::info!(
        "Wrote {} skies of {} pixels to {}",
        dataset.skies.nrows(),
        dataset.number_of_pixels(),
        path.display()
    );
    Ok(())
}

fn write_unit(target: &Dataset, unit: &str) -> Result<(), SkyError> {
    let value: VarLenUnicode = unit
        .parse()
        .map_err(|e| SkyError::UnsupportedUnitType(format!("{unit:?}: {e}")))?;
    target
        .new_attr::<VarLenUnicode>()
        .shape(())
        .create(UNIT_ATTRIBUTE)?
        .write_scalar(&value)?;
    Ok(())
}
