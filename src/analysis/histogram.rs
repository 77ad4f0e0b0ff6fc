use std::collections::BTreeMap;

use crate::data::model::{MeasurementRecord, Phase};

/// Samples are bucketed on a 0.001 nm grid.
const BUCKETS_PER_NM: f64 = 1000.0;

/// Occurrence count of each distinct (rounded) wavelength seen in one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthHistogram {
    pub phase: Phase,
    /// `(wavelength nm, count)` sorted ascending by wavelength.
    pub bins: Vec<(f64, usize)>,
}

impl WavelengthHistogram {
    /// Total number of samples tallied.
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|&(_, count)| count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bins as `[wavelength, count]` points for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.bins
            .iter()
            .map(|&(wl, count)| [wl, count as f64])
            .collect()
    }
}

/// Tally the raw wavelength samples of `phase`, rounded to 3 decimals.
///
/// Rounding absorbs floating-point noise in the wavemeter readout, so samples
/// that round to the same value share a bucket. Non-finite samples are
/// dropped.
pub fn compute_histogram(record: &MeasurementRecord, phase: Phase) -> WavelengthHistogram {
    let mut tally: BTreeMap<i64, usize> = BTreeMap::new();
    for &sample in record.samples(phase) {
        match bucket_key(sample) {
            Some(key) => *tally.entry(key).or_default() += 1,
            None => log::warn!("Skipping non-finite {phase} wavelength sample {sample}"),
        }
    }

    let bins = tally
        .into_iter()
        .map(|(key, count)| (key as f64 / BUCKETS_PER_NM, count))
        .collect();

    WavelengthHistogram { phase, bins }
}

/// Wavelength in integer thousandths of a nm.
///
/// Rounds the exact binary value, so a reading stored just below a half-way
/// point (700.0005 is 700.000499...) rounds down. Scaling by 1000 first would
/// round that product up to 700000.5 and then away from zero.
fn bucket_key(wavelength: f64) -> Option<i64> {
    if !wavelength.is_finite() {
        return None;
    }
    format!("{wavelength:.3}").replace('.', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{SchemaVariant, WavelengthSamples};

    fn record_with(initial: Vec<f64>, final_values: Vec<f64>) -> MeasurementRecord {
        MeasurementRecord {
            desired_energy: 1524.0,
            energy: 1524.2,
            desired_wl: 780.123,
            wavelength: 780.124,
            wl_measurements: WavelengthSamples {
                initial,
                final_values,
            },
            first_pass: None,
            schema: SchemaVariant::Flat,
        }
    }

    #[test]
    fn close_samples_share_a_bucket() {
        let record = record_with(vec![780.1234, 780.1232, 781.0], vec![]);
        let hist = compute_histogram(&record, Phase::Initial);
        assert_eq!(hist.bins, vec![(780.123, 2), (781.0, 1)]);
        assert_eq!(hist.total_count(), 3);
    }

    #[test]
    fn half_way_readings_round_by_stored_value() {
        let record = record_with(vec![700.0005, 700.0015, 780.1235, 780.1236], vec![]);
        let hist = compute_histogram(&record, Phase::Initial);
        assert_eq!(hist.bins, vec![(700.0, 1), (700.001, 1), (780.124, 2)]);
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        let record = record_with(vec![f64::NAN, 780.5, f64::INFINITY], vec![]);
        let hist = compute_histogram(&record, Phase::Initial);
        assert_eq!(hist.bins, vec![(780.5, 1)]);
    }

    #[test]
    fn output_is_sorted_regardless_of_sample_order() {
        let record = record_with(vec![], vec![781.5, 779.25, 781.5, 780.0, 779.25, 779.25]);
        let hist = compute_histogram(&record, Phase::Final);
        assert_eq!(hist.phase, Phase::Final);
        assert_eq!(hist.bins, vec![(779.25, 3), (780.0, 1), (781.5, 2)]);
    }

    #[test]
    fn phases_are_independent() {
        let record = record_with(vec![780.0, 780.0], vec![790.0]);
        assert_eq!(compute_histogram(&record, Phase::Initial).bins, vec![(780.0, 2)]);
        assert_eq!(compute_histogram(&record, Phase::Final).bins, vec![(790.0, 1)]);
    }

    #[test]
    fn empty_phase_gives_empty_histogram() {
        let hist = compute_histogram(&record_with(vec![], vec![]), Phase::Initial);
        assert!(hist.is_empty());
        assert_eq!(hist.total_count(), 0);
    }

    #[test]
    fn points_carry_counts_as_y() {
        let hist = compute_histogram(&record_with(vec![780.5, 780.5], vec![]), Phase::Initial);
        assert_eq!(hist.points(), vec![[780.5, 2.0]]);
    }
}
