use std::fmt;

use crate::config::AnalysisConfig;
use crate::data::error::AnalysisError;
use crate::data::model::{FirstPass, Phase, ScanResults};

use super::histogram::{compute_histogram, WavelengthHistogram};
use super::lookup::find_index_by_desired_energy;
use super::series::EnergySeries;
use super::stats::{compute_errors, compute_reduced_errors, ErrorSummary};

/// Wavelength detail for the scan step selected by desired energy.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramView {
    pub record_index: usize,
    pub desired_energy: f64,
    pub energy: f64,
    pub desired_wl: f64,
    pub wavelength: f64,
    /// Coarse pass of nested records.
    pub first_pass: Option<FirstPass>,
    pub initial: WavelengthHistogram,
    pub final_values: WavelengthHistogram,
}

impl HistogramView {
    /// Build the view for the record at `record_index`.
    pub fn for_record(results: &ScanResults, record_index: usize) -> Option<Self> {
        let rec = results.records.get(record_index)?;
        Some(HistogramView {
            record_index,
            desired_energy: rec.desired_energy,
            energy: rec.energy,
            desired_wl: rec.desired_wl,
            wavelength: rec.wavelength,
            first_pass: rec.first_pass.clone(),
            initial: compute_histogram(rec, Phase::Initial),
            final_values: compute_histogram(rec, Phase::Final),
        })
    }

    pub fn histogram(&self, phase: Phase) -> &WavelengthHistogram {
        match phase {
            Phase::Initial => &self.initial,
            Phase::Final => &self.final_values,
        }
    }
}

/// Everything one run produces: summary numbers and plot series.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub file_name: String,
    pub outlier_threshold: f64,
    pub errors: ErrorSummary,
    /// Present when the largest error exceeded the outlier threshold.
    pub reduced_errors: Option<ErrorSummary>,
    pub energy: EnergySeries,
    pub histogram: Option<HistogramView>,
}

/// Run the full analysis over a loaded results file.
///
/// Fails with [`AnalysisError::RecordNotFound`] when the configured energy
/// lies inside the scanned range but no record requested it exactly.
pub fn analyze(
    results: &ScanResults,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let mut report = summarize(results, config)?;
    report.histogram = histogram_for_energy(results, config.desired_energy)?;
    Ok(report)
}

/// Error statistics and energy series, without the histogram view.
pub fn summarize(
    results: &ScanResults,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let errors = compute_errors(&results.records)?;
    let reduced_errors = reduced_summary(results, &errors, config.outlier_threshold);

    Ok(AnalysisReport {
        file_name: config.file_name.clone(),
        outlier_threshold: config.outlier_threshold,
        errors,
        reduced_errors,
        energy: EnergySeries::from_results(results),
        histogram: None,
    })
}

/// Histogram view for the record that requested `desired_energy`.
///
/// `Ok(None)` when the energy is outside the scanned range.
pub fn histogram_for_energy(
    results: &ScanResults,
    desired_energy: f64,
) -> Result<Option<HistogramView>, AnalysisError> {
    if !results.contains_energy(desired_energy) {
        log::info!(
            "Desired energy {desired_energy} cm-1 is outside the scanned range, skipping histogram"
        );
        return Ok(None);
    }
    let index = find_index_by_desired_energy(&results.records, desired_energy)?;
    Ok(HistogramView::for_record(results, index))
}

/// Reduced statistics, only worth computing when outliers exist.
pub fn reduced_summary(
    results: &ScanResults,
    errors: &ErrorSummary,
    threshold: f64,
) -> Option<ErrorSummary> {
    if errors.max <= threshold {
        return None;
    }
    match compute_reduced_errors(&results.records, threshold) {
        Ok(summary) => Some(summary),
        Err(e) => {
            log::warn!("Every record has an error of at least {threshold} cm-1: {e}");
            None
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Looking at {}", self.file_name)?;
        writeln!(
            f,
            "Average error: {:.3} cm-1, max error: {:.3} cm-1, min error: {:.3} cm-1",
            self.errors.average, self.errors.max, self.errors.min
        )?;
        if let Some(reduced) = &self.reduced_errors {
            writeln!(
                f,
                "Reduced - average error: {:.3} cm-1, max error: {:.3} cm-1, min error: {:.3} cm-1",
                reduced.average, reduced.max, reduced.min
            )?;
        }
        if let Some(view) = &self.histogram {
            writeln!(
                f,
                "Expected nIR wavelength: {:.3} nm, measured wavelength: {:.3} nm",
                view.desired_wl, view.wavelength
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_records;

    const RESULTS: &str = r#"[
        {"desired_energy": 1523, "energy": 1523.5, "desired_wl": 780.2, "wavelength": 780.19,
         "wl_measurements": {"initial_values": [780.3], "final_values": [780.19]}},
        {"desired_energy": 1524, "energy": 1536, "desired_wl": 780.1, "wavelength": 780.11,
         "wl_measurements": {"initial_values": [780.2, 780.2001, 780.3], "final_values": [780.11]}},
        {"desired_energy": 1525, "energy": 1527.5, "desired_wl": 780.0, "wavelength": 780.01,
         "wl_measurements": {"initial_values": [], "final_values": [780.01, 780.02]}}
    ]"#;

    #[test]
    fn report_includes_reduced_errors_and_histogram() {
        let results = parse_records(RESULTS).unwrap();
        let report = analyze(&results, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.errors.max, 12.0);
        let reduced = report.reduced_errors.unwrap();
        assert_eq!(reduced.count, 2);
        assert_eq!(reduced.max, 2.5);

        let view = report.histogram.as_ref().unwrap();
        assert_eq!(view.record_index, 1);
        assert_eq!(view.initial.bins, vec![(780.2, 2), (780.3, 1)]);
        assert_eq!(view.histogram(Phase::Final).bins, vec![(780.11, 1)]);
        assert_eq!(report.energy.len(), 3);
    }

    #[test]
    fn out_of_range_target_skips_histogram() {
        let results = parse_records(RESULTS).unwrap();
        let config = AnalysisConfig {
            desired_energy: 2000.0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&results, &config).unwrap();
        assert!(report.histogram.is_none());
    }

    #[test]
    fn in_range_target_without_exact_match_fails() {
        let results = parse_records(RESULTS).unwrap();
        let config = AnalysisConfig {
            desired_energy: 1524.5,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze(&results, &config),
            Err(AnalysisError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn summarize_keeps_stats_when_no_record_matches() {
        let results = parse_records(RESULTS).unwrap();
        let config = AnalysisConfig {
            desired_energy: 1524.5,
            ..AnalysisConfig::default()
        };
        let report = summarize(&results, &config).unwrap();
        assert_eq!(report.errors.max, 12.0);
        assert!(report.histogram.is_none());
        assert!(matches!(
            histogram_for_energy(&results, 1524.5),
            Err(AnalysisError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn histogram_view_carries_first_pass() {
        let results = parse_records(
            r#"[
            {"first": {"wavelength": 780.25, "opo_wl": 780.2, "energy": 1530.0},
             "final": {"desired_energy": 1524, "energy": 1523.0, "desired_wl": 780.2, "wavelength": 780.21,
                       "wl_measurements": {"initial": {"values": [780.25]}, "final": {"values": [780.21]}}}}
        ]"#,
        )
        .unwrap();
        let view = histogram_for_energy(&results, 1524.0).unwrap().unwrap();
        let first = view.first_pass.as_ref().unwrap();
        assert_eq!(first.energy, 1530.0);
        assert!((first.wavelength_offset() - 0.05).abs() < 1e-9);

        let flat = parse_records(RESULTS).unwrap();
        let view = histogram_for_energy(&flat, 1524.0).unwrap().unwrap();
        assert!(view.first_pass.is_none());
    }

    #[test]
    fn no_reduced_summary_below_threshold() {
        let results = parse_records(RESULTS).unwrap();
        let config = AnalysisConfig {
            outlier_threshold: 20.0,
            ..AnalysisConfig::default()
        };
        let report = analyze(&results, &config).unwrap();
        assert!(report.reduced_errors.is_none());
    }

    #[test]
    fn empty_results_cannot_be_analyzed() {
        assert!(matches!(
            analyze(&ScanResults::default(), &AnalysisConfig::default()),
            Err(AnalysisError::EmptyDataset)
        ));
    }

    #[test]
    fn display_prints_summary_lines() {
        let results = parse_records(RESULTS).unwrap();
        let text = analyze(&results, &AnalysisConfig::default())
            .unwrap()
            .to_string();
        assert!(text.contains("Looking at fir_2"));
        assert!(text.contains("Average error: 5.000 cm-1, max error: 12.000 cm-1, min error: 0.500 cm-1"));
        assert!(text.contains("Reduced - average error: 1.500 cm-1, max error: 2.500 cm-1"));
        assert!(text.contains("Expected nIR wavelength: 780.100 nm, measured wavelength: 780.110 nm"));
    }
}
