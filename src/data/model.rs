use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Phase – which stage of wavelength convergence a sample belongs to
// ---------------------------------------------------------------------------

/// The two convergence stages recorded for every scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    /// Coarse samples taken right after the OPO was moved.
    Initial,
    /// Refined samples taken once the wavelength was corrected.
    Final,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Initial, Phase::Final];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Final => write!(f, "final"),
        }
    }
}

// ---------------------------------------------------------------------------
// MeasurementRecord – one scan step
// ---------------------------------------------------------------------------

/// Which on-disk shape a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    /// All fields at the top level.
    Flat,
    /// Fields split between `first` and `final` sub-objects.
    Nested,
}

/// Coarse pass recorded before the final correction (nested files only).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirstPass {
    /// Wavelength the wavemeter read after the coarse move (nm).
    pub wavelength: f64,
    /// Wavelength the OPO reported for the same move (nm).
    pub opo_wl: f64,
    pub energy: f64,
}

impl FirstPass {
    /// How far the wavemeter reading landed from the OPO's own readout (nm).
    pub fn wavelength_offset(&self) -> f64 {
        self.wavelength - self.opo_wl
    }
}

/// Raw wavelength samples for both phases, in acquisition order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WavelengthSamples {
    pub initial: Vec<f64>,
    pub final_values: Vec<f64>,
}

impl WavelengthSamples {
    pub fn phase(&self, phase: Phase) -> &[f64] {
        match phase {
            Phase::Initial => &self.initial,
            Phase::Final => &self.final_values,
        }
    }
}

/// A single scan step, normalized from either file schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Requested energy (cm⁻¹).
    pub desired_energy: f64,
    /// Energy actually reached (cm⁻¹).
    pub energy: f64,
    /// Requested nIR wavelength (nm).
    pub desired_wl: f64,
    /// Measured nIR wavelength (nm).
    pub wavelength: f64,
    pub wl_measurements: WavelengthSamples,
    pub first_pass: Option<FirstPass>,
    pub schema: SchemaVariant,
}

impl MeasurementRecord {
    /// Absolute difference between requested and reached energy.
    pub fn energy_error(&self) -> f64 {
        (self.desired_energy - self.energy).abs()
    }

    pub fn samples(&self, phase: Phase) -> &[f64] {
        self.wl_measurements.phase(phase)
    }
}

// ---------------------------------------------------------------------------
// ScanResults – one loaded results file
// ---------------------------------------------------------------------------

/// All records of one results file, in file order.
#[derive(Debug, Clone, Default)]
pub struct ScanResults {
    pub records: Vec<MeasurementRecord>,
}

impl ScanResults {
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        ScanResults { records }
    }

    /// Number of scan steps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the file held no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Desired energy of the first and last record.
    ///
    /// Files are written in scan order, so this is the scanned range.
    pub fn desired_energy_range(&self) -> Option<(f64, f64)> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        Some((first.desired_energy, last.desired_energy))
    }

    /// Whether `target` lies inside the scanned desired-energy range.
    pub fn contains_energy(&self, target: f64) -> bool {
        self.desired_energy_range()
            .is_some_and(|(lo, hi)| lo <= target && target <= hi)
    }

    /// Whether desired energies never decrease from one record to the next.
    pub fn is_ordered(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| w[0].desired_energy <= w[1].desired_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(desired_energy: f64, energy: f64) -> MeasurementRecord {
        MeasurementRecord {
            desired_energy,
            energy,
            desired_wl: 780.0,
            wavelength: 780.0,
            wl_measurements: WavelengthSamples::default(),
            first_pass: None,
            schema: SchemaVariant::Flat,
        }
    }

    #[test]
    fn energy_error_is_absolute() {
        assert_eq!(record(100.0, 101.5).energy_error(), 1.5);
        assert_eq!(record(200.0, 198.0).energy_error(), 2.0);
    }

    #[test]
    fn range_uses_first_and_last_record() {
        let results = ScanResults::from_records(vec![
            record(1500.0, 1500.0),
            record(1524.0, 1524.0),
            record(1550.0, 1551.0),
        ]);
        assert_eq!(results.desired_energy_range(), Some((1500.0, 1550.0)));
        assert!(results.contains_energy(1500.0));
        assert!(results.contains_energy(1550.0));
        assert!(!results.contains_energy(1499.9));
        assert!(results.is_ordered());
    }

    #[test]
    fn empty_results_contain_nothing() {
        let results = ScanResults::default();
        assert!(results.is_empty());
        assert_eq!(results.desired_energy_range(), None);
        assert!(!results.contains_energy(0.0));
    }

    #[test]
    fn detects_out_of_order_records() {
        let results =
            ScanResults::from_records(vec![record(1600.0, 1600.0), record(1500.0, 1500.0)]);
        assert!(!results.is_ordered());
    }
}
