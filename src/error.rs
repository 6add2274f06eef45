use thiserror::Error;

/// Everything that can go wrong between opening a gamma sky file and
/// writing or showing the figure.
#[derive(Debug, Error)]
pub enum SkyError {
    /// A `unit` attribute did not carry the expected physical unit.
    #[error("input file: wrong {quantity} unit (expected \"{expected}\", found \"{found}\")")]
    UnitMismatch {
        quantity: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("input file: {skies} gamma ray skies but {energies} energies")]
    ShapeMismatch { skies: usize, energies: usize },

    #[error("invalid energy index \"{index}\" ({available} energies available)")]
    EnergyIndexOutOfRange { index: i64, available: usize },

    /// The sky does not have `12 * nside^2` pixels.
    #[error("{0} sky pixels is not a valid HEALPix pixel count")]
    InvalidPixelCount(usize),

    #[error("figure width of {0} px is outside the supported range")]
    InvalidFigureSize(u32),

    #[error("unsupported unit attribute type: {0}")]
    UnsupportedUnitType(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
