//! Analysis core for OPO wavelength-scan measurement results.
//!
//! The `data` layer loads and normalizes result files, `analysis` turns the
//! loaded records into error statistics, wavelength histograms and plot
//! series. Nothing here depends on the viewer.

pub mod analysis;
pub mod config;
pub mod data;
