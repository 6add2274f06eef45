//! Mollweide sky maps of the gamma ray skies written by `gamma_sky`.

pub mod app;
pub mod color;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::SkyError;
