use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::AnalysisError;
use super::model::{FirstPass, MeasurementRecord, ScanResults, SchemaVariant, WavelengthSamples};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a measurement results file.
///
/// The file is a JSON array of scan steps. Two record shapes coexist in
/// older and newer files; a record is treated as nested when it carries a
/// `"final"` key:
///
/// ```json
/// [
///   { "desired_energy": 1524, "energy": 1524.3, "desired_wl": 780.1, "wavelength": 780.09,
///     "wl_measurements": { "initial_values": [...], "final_values": [...] } },
///   { "first": { "wavelength": 780.2, "opo_wl": 780.0, "energy": 1530.1 },
///     "final": { "desired_energy": 1525, "energy": 1525.2, "desired_wl": 780.0, "wavelength": 780.01,
///                "wl_measurements": { "initial": { "values": [...] }, "final": { "values": [...] } } } }
/// ]
/// ```
pub fn load_file(path: &Path) -> Result<ScanResults, AnalysisError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            AnalysisError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AnalysisError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let root: JsonValue = serde_json::from_str(&text).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let results = records_from_json(&root)?;
    log::debug!("Read {} records from {}", results.len(), path.display());
    Ok(results)
}

/// Same as [`load_file`] but over an in-memory document.
pub fn parse_records(text: &str) -> Result<ScanResults, AnalysisError> {
    let root: JsonValue = serde_json::from_str(text).map_err(|source| AnalysisError::Parse {
        path: "<memory>".into(),
        source,
    })?;
    records_from_json(&root)
}

fn records_from_json(root: &JsonValue) -> Result<ScanResults, AnalysisError> {
    let rows = root.as_array().ok_or(AnalysisError::NotAnArray)?;

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .ok_or(AnalysisError::NotAnObject { index })?;

        let record = if obj.contains_key("final") {
            NestedRecord::deserialize(row).map(MeasurementRecord::from)
        } else {
            FlatRecord::deserialize(row).map(MeasurementRecord::from)
        }
        .map_err(|source| AnalysisError::MalformedRecord { index, source })?;

        records.push(record);
    }

    let results = ScanResults::from_records(records);
    if !results.is_ordered() {
        log::warn!("Records are not ordered by desired energy; range checks use file order");
    }
    Ok(results)
}

// ---------------------------------------------------------------------------
// Flat schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FlatRecord {
    desired_energy: f64,
    energy: f64,
    desired_wl: f64,
    wavelength: f64,
    wl_measurements: FlatSamples,
}

#[derive(Deserialize)]
struct FlatSamples {
    initial_values: Vec<f64>,
    final_values: Vec<f64>,
}

impl From<FlatRecord> for MeasurementRecord {
    fn from(raw: FlatRecord) -> Self {
        MeasurementRecord {
            desired_energy: raw.desired_energy,
            energy: raw.energy,
            desired_wl: raw.desired_wl,
            wavelength: raw.wavelength,
            wl_measurements: WavelengthSamples {
                initial: raw.wl_measurements.initial_values,
                final_values: raw.wl_measurements.final_values,
            },
            first_pass: None,
            schema: SchemaVariant::Flat,
        }
    }
}

// ---------------------------------------------------------------------------
// Nested schema
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct NestedRecord {
    first: FirstPass,
    #[serde(rename = "final")]
    final_step: NestedStep,
}

#[derive(Deserialize)]
struct NestedStep {
    desired_energy: f64,
    energy: f64,
    desired_wl: f64,
    wavelength: f64,
    wl_measurements: NestedSamples,
}

#[derive(Deserialize)]
struct NestedSamples {
    initial: SampleBlock,
    #[serde(rename = "final")]
    final_block: SampleBlock,
}

#[derive(Deserialize)]
struct SampleBlock {
    values: Vec<f64>,
}

impl From<NestedRecord> for MeasurementRecord {
    fn from(raw: NestedRecord) -> Self {
        let step = raw.final_step;
        MeasurementRecord {
            desired_energy: step.desired_energy,
            energy: step.energy,
            desired_wl: step.desired_wl,
            wavelength: step.wavelength,
            wl_measurements: WavelengthSamples {
                initial: step.wl_measurements.initial.values,
                final_values: step.wl_measurements.final_block.values,
            },
            first_pass: Some(raw.first),
            schema: SchemaVariant::Nested,
        }
    }
}
