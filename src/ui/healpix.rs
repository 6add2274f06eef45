use std::f64::consts::TAU;

use scorus::coordinates::SphCoord;
use scorus::healpix::pix::ang2pix_ring;
use scorus::healpix::utils::nside2npix;

use crate::error::SkyError;

/// A full-sky map in HEALPix RING ordering.
#[derive(Debug, Clone, Copy)]
pub struct RingMap<'a> {
    nside: usize,
    values: &'a [f64],
}

impl<'a> RingMap<'a> {
    /// Wrap `values`, whose length must be `12 * nside^2`.
    pub fn new(values: &'a [f64]) -> Result<Self, SkyError> {
        let npix = values.len();
        let nside = ((npix / 12) as f64).sqrt().round() as usize;
        if npix == 0 || npix % 12 != 0 || nside2npix(nside) != npix {
            return Err(SkyError::InvalidPixelCount(npix));
        }
        Ok(RingMap { nside, values })
    }

    pub fn nside(&self) -> usize {
        self.nside
    }

    /// RING index of the pixel containing `direction`.
    pub fn pixel_at(&self, direction: SphCoord<f64>) -> usize {
        let direction = SphCoord::new(direction.pol, direction.az.rem_euclid(TAU));
        ang2pix_ring(self.nside, direction)
    }

    /// Value of the pixel containing `direction`.
    pub fn value_at(&self, direction: SphCoord<f64>) -> f64 {
        self.values[self.pixel_at(direction)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use scorus::healpix::pix::pix2ang_ring;

    const NSIDE: usize = 4;

    fn numbered_map() -> Vec<f64> {
        (0..12 * NSIDE * NSIDE).map(|i| i as f64).collect()
    }

    #[test]
    fn accepts_healpix_pixel_counts() {
        for nside in [1, 2, 16] {
            let values = vec![0.0; 12 * nside * nside];
            assert_eq!(RingMap::new(&values).unwrap().nside(), nside);
        }
    }

    #[test]
    fn rejects_other_pixel_counts() {
        for npix in [0, 11, 13, 24, 100] {
            let values = vec![0.0; npix];
            assert!(matches!(
                RingMap::new(&values),
                Err(SkyError::InvalidPixelCount(n)) if n == npix
            ));
        }
    }

    #[test]
    fn pixel_centres_look_up_their_own_value() {
        let values = numbered_map();
        let map = RingMap::new(&values).unwrap();
        for pixel in [17, 60, 95, 130] {
            let centre = pix2ang_ring::<f64>(NSIDE, pixel);
            assert_eq!(map.value_at(centre), pixel as f64);
        }
    }

    #[test]
    fn points_near_a_centre_stay_in_that_pixel() {
        let values = numbered_map();
        let map = RingMap::new(&values).unwrap();
        for pixel in [17, 60, 95, 130] {
            let centre = pix2ang_ring::<f64>(NSIDE, pixel);
            for (dpol, daz) in [(0.03, 0.0), (-0.03, 0.0), (0.0, 0.03), (0.0, -0.03)] {
                let near = SphCoord::new(centre.pol + dpol, centre.az + daz);
                assert_eq!(map.pixel_at(near), pixel, "offset ({dpol}, {daz}) from {pixel}");
            }
        }
    }

    #[test]
    fn point_below_a_shared_vertex_belongs_to_the_next_ring() {
        // Equatorial pixels of one ring meet at a vertex on the ring's own
        // latitude; just south of it lies the pixel of the ring below.
        let values = numbered_map();
        let map = RingMap::new(&values).unwrap();
        let half_step = PI / (4 * NSIDE) as f64;
        for pixel in [60, 95] {
            let centre = pix2ang_ring::<f64>(NSIDE, pixel);
            let below_vertex = SphCoord::new(centre.pol + 0.02, centre.az + half_step);

            let found = map.pixel_at(below_vertex);
            assert_ne!(found, pixel);
            assert_ne!(found, pixel + 1);

            let found_centre = pix2ang_ring::<f64>(NSIDE, found);
            assert!(found_centre.pol > centre.pol, "{found} is not south of {pixel}");
            let difference = (found_centre.az - below_vertex.az).rem_euclid(TAU);
            assert!(difference.min(TAU - difference) < 1e-9, "{found} is not centred below the vertex");
            assert_eq!(map.value_at(below_vertex), found as f64);
        }
    }
}
