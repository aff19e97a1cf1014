//! CSV ingestion of patient vital-sign records.
//!
//! Rows that fail to convert are dropped and reported individually; only a
//! failure to access the input as a whole aborts the load.

use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::record::PatientRecord;

/// Header columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "patient_id",
    "age",
    "systolic_bp",
    "heart_rate",
    "oxygen_saturation",
    "temperature",
];

/// Failure that prevents any record from being loaded.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to read patient data: {source}")]
    Read { source: csv::Error },
    #[display("missing required column '{column}'")]
    MissingColumn {
        #[error(not(source))]
        column: &'static str,
    },
}

impl LoadError {
    /// Whether the input file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Open { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// A row that was dropped during loading.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RowError {
    #[display("line {line}: invalid value ({message})")]
    InvalidValue {
        line: u64,
        #[error(not(source))]
        message: String,
    },
    #[display("line {line}: duplicate patient_id {patient_id}")]
    DuplicatePatientId { line: u64, patient_id: i64 },
}

impl RowError {
    /// 1-based line of the offending row in the input.
    #[must_use]
    pub fn line(&self) -> u64 {
        match self {
            Self::InvalidValue { line, .. } | Self::DuplicatePatientId { line, .. } => *line,
        }
    }
}

/// Records accepted from one input, with the rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedPatients {
    pub records: Vec<PatientRecord>,
    pub errors: Vec<RowError>,
}

/// Load patient records from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the patient vitals CSV file
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be opened; malformed rows
/// do not fail the load.
pub fn load_patients<P>(path: P) -> Result<LoadedPatients, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;

    let loaded = load_patients_from_reader(BufReader::new(file))?;
    tracing::info!(
        path = %path.display(),
        records = loaded.records.len(),
        dropped = loaded.errors.len(),
        "loaded patient records"
    );
    Ok(loaded)
}

/// Load patient records from any CSV byte source.
///
/// Surrounding whitespace in fields is ignored, as are columns beyond
/// [`REQUIRED_COLUMNS`]. An input without any header yields no records.
pub fn load_patients_from_reader<R>(reader: R) -> Result<LoadedPatients, LoadError>
where
    R: io::Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| LoadError::Read { source })?
        .clone();
    if headers.is_empty() {
        tracing::debug!("input has no header row");
        return Ok(LoadedPatients::default());
    }
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(LoadError::MissingColumn { column });
    }

    let mut loaded = LoadedPatients::default();
    let mut seen_ids = HashSet::new();
    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(LoadError::Read { source: err }),
            Err(err) => {
                let line = err.position().map_or(0, csv::Position::line);
                loaded.reject(RowError::InvalidValue {
                    line,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let line = row.position().map_or(0, csv::Position::line);
        match row.deserialize::<PatientRecord>(Some(&headers)) {
            Ok(patient) if !patient.temperature.is_finite() => {
                loaded.reject(RowError::InvalidValue {
                    line,
                    message: format!("temperature must be finite, got {}", patient.temperature),
                });
            }
            Ok(patient) if !seen_ids.insert(patient.patient_id) => {
                loaded.reject(RowError::DuplicatePatientId {
                    line,
                    patient_id: patient.patient_id,
                });
            }
            Ok(patient) => loaded.records.push(patient),
            Err(err) => loaded.reject(RowError::InvalidValue {
                line,
                message: err.to_string(),
            }),
        }
    }

    Ok(loaded)
}

impl LoadedPatients {
    fn reject(&mut self, error: RowError) {
        tracing::warn!(line = error.line(), %error, "dropping patient row");
        self.errors.push(error);
    }
}
