use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Magma colour map
// ---------------------------------------------------------------------------

/// Samples of matplotlib's "magma" at t = 0, 1/8, …, 1.
const MAGMA: [[u8; 3]; 9] = [
    [0x00, 0x00, 0x04],
    [0x1c, 0x10, 0x44],
    [0x4f, 0x12, 0x7b],
    [0x81, 0x25, 0x81],
    [0xb5, 0x36, 0x7a],
    [0xe5, 0x50, 0x64],
    [0xfb, 0x87, 0x61],
    [0xfe, 0xc2, 0x87],
    [0xfc, 0xfd, 0xbf],
];

/// Colour for pixels without a finite value.
pub const BAD_COLOR: [u8; 3] = [0x80, 0x80, 0x80];

/// Maps values between `min` and `max` onto the magma colour map.
#[derive(Debug, Clone)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
    stops: Vec<LinSrgb>,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        let stops = MAGMA
            .iter()
            .map(|&[r, g, b]| Srgb::new(r, g, b).into_format::<f32>().into_linear())
            .collect();
        ColorScale { min, max, stops }
    }

    /// Scale spanning the finite values of `values`.
    ///
    /// Falls back to `[0, 1]` when there is no finite value at all.
    pub fn spanning(values: &[f64]) -> Self {
        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            Self::new(0.0, 1.0)
        } else {
            Self::new(min, max)
        }
    }

    /// Position of `value` in `[0, 1]`, or `None` for NaN and infinities.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON * self.max.abs().max(1.0) {
            return Some(0.5);
        }
        Some(((value - self.min) / range).clamp(0.0, 1.0))
    }

    pub fn color_for(&self, value: f64) -> [u8; 3] {
        match self.normalize(value) {
            Some(t) => self.color_at(t),
            None => BAD_COLOR,
        }
    }

    /// Colour at position `t` of the colour map.
    pub fn color_at(&self, t: f64) -> [u8; 3] {
        let last = self.stops.len() - 1;
        let x = t.clamp(0.0, 1.0) * last as f64;
        let i = (x.floor() as usize).min(last - 1);
        let mixed = self.stops[i].mix(self.stops[i + 1], (x - i as f64) as f32);
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        [rgb.red, rgb.green, rgb.blue]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_magma() {
        let scale = ColorScale::new(-1.0, 1.0);
        assert_eq!(scale.color_for(-1.0), MAGMA[0]);
        assert_eq!(scale.color_for(1.0), MAGMA[8]);
        assert_eq!(scale.color_for(0.0), MAGMA[4]);
    }

    #[test]
    fn values_outside_the_range_are_clamped() {
        let scale = ColorScale::new(0.0, 10.0);
        assert_eq!(scale.color_for(-5.0), scale.color_for(0.0));
        assert_eq!(scale.color_for(50.0), scale.color_for(10.0));
    }

    #[test]
    fn non_finite_values_get_the_bad_color() {
        let scale = ColorScale::spanning(&[1.0, f64::NAN, 3.0, f64::NEG_INFINITY]);
        assert_eq!(scale.min, 1.0);
        assert_eq!(scale.max, 3.0);
        assert_eq!(scale.color_for(f64::NAN), BAD_COLOR);
        assert_eq!(scale.color_for(f64::INFINITY), BAD_COLOR);
    }

    #[test]
    fn constant_maps_use_the_middle_color() {
        let scale = ColorScale::spanning(&[4.0, 4.0]);
        assert_eq!(scale.normalize(4.0), Some(0.5));
    }
}
