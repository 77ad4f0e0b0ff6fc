use super::model::MeasurementRecord;

// ---------------------------------------------------------------------------
// Outlier filter: which scan steps count towards the reduced statistics
// ---------------------------------------------------------------------------

/// Return indices of records whose energy error is strictly below `threshold`.
///
/// A record with an error equal to the threshold is an outlier.
pub fn retained_indices(records: &[MeasurementRecord], threshold: f64) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| is_retained(rec, threshold))
        .map(|(i, _)| i)
        .collect()
}

/// Whether a single record passes the outlier filter.
pub fn is_retained(record: &MeasurementRecord, threshold: f64) -> bool {
    record.energy_error() < threshold
}
