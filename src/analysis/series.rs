use crate::data::model::ScanResults;

/// Plot-ready energy series, one point per scan step (x = step index).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergySeries {
    pub expected: Vec<[f64; 2]>,
    pub measured: Vec<[f64; 2]>,
    pub difference: Vec<[f64; 2]>,
}

impl EnergySeries {
    pub fn from_results(results: &ScanResults) -> Self {
        let mut series = EnergySeries::default();
        for (step, rec) in results.records.iter().enumerate() {
            let x = step as f64;
            series.expected.push([x, rec.desired_energy]);
            series.measured.push([x, rec.energy]);
            series.difference.push([x, rec.energy_error()]);
        }
        series
    }

    /// Upper limit for the difference axis: three times the largest error,
    /// so the stems stay in the lower third of the plot.
    pub fn difference_axis_max(&self) -> f64 {
        let max = self
            .difference
            .iter()
            .map(|p| p[1])
            .fold(0.0_f64, f64::max);
        3.0 * max
    }

    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_records;

    #[test]
    fn one_point_per_step() {
        let results = parse_records(
            r#"[
            {"desired_energy": 100, "energy": 101, "desired_wl": 0, "wavelength": 0,
             "wl_measurements": {"initial_values": [], "final_values": []}},
            {"desired_energy": 200, "energy": 196, "desired_wl": 0, "wavelength": 0,
             "wl_measurements": {"initial_values": [], "final_values": []}}
        ]"#,
        )
        .unwrap();
        let series = EnergySeries::from_results(&results);
        assert_eq!(series.len(), 2);
        assert_eq!(series.expected, vec![[0.0, 100.0], [1.0, 200.0]]);
        assert_eq!(series.measured, vec![[0.0, 101.0], [1.0, 196.0]]);
        assert_eq!(series.difference, vec![[0.0, 1.0], [1.0, 4.0]]);
        assert_eq!(series.difference_axis_max(), 12.0);
    }

    #[test]
    fn empty_results_give_empty_series() {
        let series = EnergySeries::from_results(&ScanResults::default());
        assert!(series.is_empty());
        assert_eq!(series.difference_axis_max(), 0.0);
    }
}
