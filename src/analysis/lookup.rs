use crate::data::error::AnalysisError;
use crate::data::model::MeasurementRecord;

/// First record whose desired energy equals `target` exactly.
///
/// No tolerance is applied: `target` must be a value the scan actually
/// requested. Check [`ScanResults::contains_energy`] first when the target
/// comes from configuration.
///
/// [`ScanResults::contains_energy`]: crate::data::model::ScanResults::contains_energy
pub fn find_record_by_desired_energy(
    records: &[MeasurementRecord],
    target: f64,
) -> Result<&MeasurementRecord, AnalysisError> {
    find_index_by_desired_energy(records, target).map(|i| &records[i])
}

/// Position of the record [`find_record_by_desired_energy`] would return.
pub fn find_index_by_desired_energy(
    records: &[MeasurementRecord],
    target: f64,
) -> Result<usize, AnalysisError> {
    records
        .iter()
        .position(|rec| rec.desired_energy == target)
        .ok_or(AnalysisError::RecordNotFound { target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{SchemaVariant, WavelengthSamples};

    fn record(desired_energy: f64, energy: f64) -> MeasurementRecord {
        MeasurementRecord {
            desired_energy,
            energy,
            desired_wl: 0.0,
            wavelength: 0.0,
            wl_measurements: WavelengthSamples::default(),
            first_pass: None,
            schema: SchemaVariant::Flat,
        }
    }

    #[test]
    fn finds_first_exact_match() {
        let records = vec![
            record(1523.0, 1523.1),
            record(1524.0, 1524.2),
            record(1524.0, 1530.0),
        ];
        let found = find_record_by_desired_energy(&records, 1524.0).unwrap();
        assert_eq!(found.energy, 1524.2);
        assert_eq!(find_index_by_desired_energy(&records, 1524.0).unwrap(), 1);
    }

    #[test]
    fn near_miss_is_not_a_match() {
        let records = vec![record(1524.0, 1524.2)];
        assert!(matches!(
            find_record_by_desired_energy(&records, 1524.0001),
            Err(AnalysisError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn empty_records_fail() {
        assert!(matches!(
            find_record_by_desired_energy(&[], 1524.0),
            Err(AnalysisError::RecordNotFound { target }) if target == 1524.0
        ));
    }
}
