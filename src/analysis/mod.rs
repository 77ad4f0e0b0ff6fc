//! Error statistics, wavelength histograms and plot series over loaded
//! scan results. Every function here is pure over its inputs.

pub mod histogram;
pub mod lookup;
pub mod report;
pub mod series;
pub mod stats;

pub use histogram::{compute_histogram, WavelengthHistogram};
pub use lookup::{find_index_by_desired_energy, find_record_by_desired_energy};
pub use report::{analyze, histogram_for_energy, summarize, AnalysisReport, HistogramView};
pub use series::EnergySeries;
pub use stats::{average_and_std_dev, compute_errors, compute_reduced_errors, ErrorSummary};
