//! Patient vitals ingestion, risk classification and cohort reporting.
//!
//! # Overview
//!
//! A run of the analyzer follows one pipeline:
//!
//! 1. **Load Records** ([`loader::load_patients`]): parse CSV rows into
//!    [`record::PatientRecord`]s, dropping malformed rows
//! 2. **Compute Limits** ([`risk::RiskLimits`]): derive IQR outlier fences
//!    for heart rate and temperature over the cohort
//! 3. **Select and Label** ([`risk::select_high_risk`],
//!    [`risk::classify_severity`]): flag statistical outliers, then tier
//!    them with the fixed clinical thresholds
//! 4. **Report** ([`report::CohortReport`]): collect statistics, flagged
//!    patients and the heart-rate histogram for display
//!
//! Nothing here performs I/O except the loader, and nothing runs on its own:
//! the binary crate drives the pipeline.
//!
//! # Example
//!
//! ```
//! use vitals_analysis::{loader, report::CohortReport};
//!
//! let csv = "\
//! patient_id,age,systolic_bp,heart_rate,oxygen_saturation,temperature
//! 1,34,118,72,98,36.8
//! 2,51,135,80,97,37.1
//! 3,67,182,128,93,38.9
//! ";
//! let loaded = loader::load_patients_from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(loaded.records.len(), 3);
//!
//! let report = CohortReport::build(&loaded.records).unwrap();
//! assert_eq!(report.patient_count, 3);
//! ```

pub mod loader;
pub mod record;
pub mod report;
pub mod risk;
