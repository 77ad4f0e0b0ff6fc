/// Data layer: core types, loading, and outlier filtering.
///
/// Architecture:
/// ```text
///  measurement_results_<name>.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, normalize flat / nested records
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ ScanResults │  Vec<MeasurementRecord>, ordered by desired energy
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  absolute error below threshold → retained indices
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::AnalysisError;
