use crate::data::error::AnalysisError;
use crate::data::filter::retained_indices;
use crate::data::model::MeasurementRecord;

// ---------------------------------------------------------------------------
// ErrorSummary – how far the measured energies landed from the targets
// ---------------------------------------------------------------------------

/// Aggregate absolute energy error over a set of scan steps (cm⁻¹).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSummary {
    pub average: f64,
    pub max: f64,
    pub min: f64,
    /// Population standard deviation of the errors.
    pub std_dev: f64,
    /// Number of records that contributed.
    pub count: usize,
}

impl ErrorSummary {
    fn from_differences(differences: &[f64]) -> Result<Self, AnalysisError> {
        let (average, std_dev) = average_and_std_dev(differences)?;
        let max = differences.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = differences.iter().copied().fold(f64::INFINITY, f64::min);
        Ok(ErrorSummary {
            average,
            max,
            min,
            std_dev,
            count: differences.len(),
        })
    }
}

/// Average, max and min absolute energy error over every record.
pub fn compute_errors(records: &[MeasurementRecord]) -> Result<ErrorSummary, AnalysisError> {
    let differences: Vec<f64> = records.iter().map(MeasurementRecord::energy_error).collect();
    ErrorSummary::from_differences(&differences)
}

/// Like [`compute_errors`], ignoring records whose error is `>= threshold`.
pub fn compute_reduced_errors(
    records: &[MeasurementRecord],
    threshold: f64,
) -> Result<ErrorSummary, AnalysisError> {
    let differences: Vec<f64> = retained_indices(records, threshold)
        .into_iter()
        .map(|i| records[i].energy_error())
        .collect();
    ErrorSummary::from_differences(&differences)
}

/// Mean and population standard deviation (divides by N).
pub fn average_and_std_dev(values: &[f64]) -> Result<(f64, f64), AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Ok((mean, variance.sqrt()))
}
