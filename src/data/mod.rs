/// Data layer: on-disk layout, loading, and unit conversion.
///
/// Architecture:
/// ```text
///   gamma_sky .h5 file
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read arrays + unit attributes → SkyDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ SkyDataset  │  validate units, list energies, select one bin
///   └────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform  │  display units, optional logarithm → SkyMap
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod transform;
pub mod writer;
