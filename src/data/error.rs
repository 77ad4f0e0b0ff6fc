use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("results file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("record {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("record {index}: {source}")]
    MalformedRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Statistics over zero values are undefined.
    #[error("no values to aggregate")]
    EmptyDataset,

    #[error("no record with desired energy {target} cm-1")]
    RecordNotFound { target: f64 },
}
