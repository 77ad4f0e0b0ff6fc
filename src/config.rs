use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON config file for the viewer.
pub const CONFIG_ENV: &str = "OPO_ANALYSIS_CONFIG";

/// Parameters of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory holding the measurement results files.
    pub results_dir: PathBuf,
    pub file_prefix: String,
    /// Selector appended to the prefix, e.g. `fir_2`.
    pub file_name: String,
    /// Desired energy (cm⁻¹) whose wavelength histograms are shown.
    pub desired_energy: f64,
    /// Errors at or above this value (cm⁻¹) are outliers.
    pub outlier_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("./wavelength_measurements"),
            file_prefix: "measurement_results_".to_string(),
            file_name: "fir_2".to_string(),
            desired_energy: 1524.0,
            outlier_threshold: 5.0,
        }
    }
}

impl AnalysisConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading analysis config {}", path_ref.display()))?;
        let config: AnalysisConfig = serde_json::from_str(&contents)
            .with_context(|| format!("parsing analysis config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Config from `$OPO_ANALYSIS_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// `<results_dir>/<file_prefix><file_name>.json`
    pub fn results_path(&self) -> PathBuf {
        self.results_dir
            .join(format!("{}{}.json", self.file_prefix, self.file_name))
    }
}
