use std::path::Path;

use opo_scan_viewer::analysis::report::reduced_summary;
use opo_scan_viewer::analysis::{histogram_for_energy, summarize, AnalysisReport, HistogramView};
use opo_scan_viewer::config::AnalysisConfig;
use opo_scan_viewer::data::filter::is_retained;
use opo_scan_viewer::data::loader::load_file;
use opo_scan_viewer::data::model::ScanResults;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Parameters of the current run; edited by the side panel.
    pub config: AnalysisConfig,

    /// Loaded results file (None until one loads).
    pub results: Option<ScanResults>,

    /// Statistics and series for `results`.
    pub report: Option<AnalysisReport>,

    /// Draw outliers in a separate series.
    pub highlight_outliers: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            results: None,
            report: None,
            highlight_outliers: true,
            status_message: None,
        }
    }

    /// State for a run whose report was already computed at startup.
    pub fn with_report(config: AnalysisConfig, results: ScanResults, report: AnalysisReport) -> Self {
        let mut state = Self::new(config);
        state.results = Some(results);
        state.report = Some(report);
        state
    }

    /// Load another results file and analyze it with the current config.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(results) => {
                log::info!("Loaded {} scan steps from {}", results.len(), path.display());
                if let Some(name) = file_name_for(path, &self.config.file_prefix) {
                    self.config.file_name = name;
                }
                self.set_results(results);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest newly loaded results and recompute the report.
    ///
    /// A histogram energy with no exact match only drops the histogram; the
    /// statistics and energy plots stay.
    pub fn set_results(&mut self, results: ScanResults) {
        self.status_message = None;
        self.report = match summarize(&results, &self.config) {
            Ok(mut report) => {
                match histogram_for_energy(&results, self.config.desired_energy) {
                    Ok(view) => report.histogram = view,
                    Err(e) => {
                        log::warn!("Skipping histogram: {e}");
                        self.status_message = Some(format!("No histogram: {e}"));
                    }
                }
                Some(report)
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
                None
            }
        };
        self.results = Some(results);
    }

    /// Show the wavelength histograms of another scan step.
    pub fn select_record(&mut self, index: usize) {
        let (Some(results), Some(report)) = (&self.results, &mut self.report) else {
            return;
        };
        if let Some(view) = HistogramView::for_record(results, index) {
            self.config.desired_energy = view.desired_energy;
            report.histogram = Some(view);
        }
    }

    /// Change the outlier threshold and refresh the reduced statistics.
    pub fn set_outlier_threshold(&mut self, threshold: f64) {
        self.config.outlier_threshold = threshold;
        let (Some(results), Some(report)) = (&self.results, &mut self.report) else {
            return;
        };
        report.outlier_threshold = threshold;
        report.reduced_errors = reduced_summary(results, &report.errors, threshold);
    }

    pub fn selected_record(&self) -> Option<usize> {
        self.report
            .as_ref()
            .and_then(|r| r.histogram.as_ref())
            .map(|v| v.record_index)
    }

    /// Indices of records at or above the outlier threshold.
    pub fn outlier_indices(&self) -> Vec<usize> {
        let Some(results) = &self.results else {
            return Vec::new();
        };
        results
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| !is_retained(rec, self.config.outlier_threshold))
            .map(|(i, _)| i)
            .collect()
    }
}

/// `measurement_results_fir_2.json` → `fir_2`
fn file_name_for(path: &Path, prefix: &str) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.strip_prefix(prefix).unwrap_or(stem).to_string())
}
