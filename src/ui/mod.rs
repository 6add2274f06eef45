pub mod healpix;
pub mod panels;
pub mod plot;
