use super::model::SelectedBin;

/// MeV / (cm² sr s) → GeV / (m² sr s)
pub const FLUX_TO_DISPLAY: f64 = 10.0;
/// MeV → GeV
pub const MEV_TO_GEV: f64 = 1e-3;

pub const FLUX_LABEL: &str = "Gamma ray flux / (GeV m⁻² sr⁻¹ s⁻¹)";

// ---------------------------------------------------------------------------
// SkyMap – a sky ready to be drawn
// ---------------------------------------------------------------------------

/// One sky in display units.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyMap {
    /// HEALPix RING ordered values, in display units or their logarithm.
    pub values: Vec<f64>,
    pub energy_gev: f64,
    /// Label of the colour bar.
    pub unit_label: String,
    pub logarithmic: bool,
}

impl SkyMap {
    pub fn title(&self) -> String {
        format!("Energy = {:.2} GeV", self.energy_gev)
    }
}

/// Convert a selected bin to display units, optionally taking the natural
/// logarithm of every flux.
///
/// Non-positive fluxes are not guarded against: their logarithm is `-inf`
/// or `NaN` and is drawn with the bad-value colour.
pub fn to_display_units(bin: SelectedBin, logarithmic: bool) -> SkyMap {
    let mut values: Vec<f64> = bin.sky.into_iter().map(|v| v * FLUX_TO_DISPLAY).collect();
    let energy_gev = bin.energy * MEV_TO_GEV;

    let unit_label = if logarithmic {
        values.iter_mut().for_each(|v| *v = v.ln());
        let non_finite = values.iter().filter(|v| !v.is_finite()).count();
        if non_finite > 0 {
            log::warn!("{non_finite} sky pixels have no finite logarithm");
        }
        format!("log({FLUX_LABEL})")
    } else {
        FLUX_LABEL.to_string()
    };

    SkyMap {
        values,
        energy_gev,
        unit_label,
        logarithmic,
    }
}
