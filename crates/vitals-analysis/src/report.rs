//! Cohort summary report.
//!
//! [`CohortReport`] holds everything the summary shows as plain data, so it
//! can be rendered as text, serialized to JSON, or charted.

use std::{
    fmt,
    io::{self, Write},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use vitals_stats::{descriptive::DescriptiveStats, histogram::Histogram};

use crate::{
    record::PatientRecord,
    risk::{self, RiskLimits, Severity},
};

/// Number of bins in the heart-rate histogram.
pub const HISTOGRAM_BINS: usize = 10;

const SEPARATOR_WIDTH: usize = 40;

/// Summary statistics and risk screening for one cohort.
#[derive(Debug, Clone, Serialize)]
pub struct CohortReport {
    pub generated_at: DateTime<Utc>,
    pub patient_count: usize,
    pub heart_rate: DescriptiveStats<i32>,
    pub temperature: DescriptiveStats<f64>,
    pub risk: RiskSection,
    pub heart_rate_histogram: Histogram,
}

/// Outcome of the statistical high-risk screening.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskSection {
    /// Fences were computed; `flagged` lists the patients outside them.
    Screened {
        limits: RiskLimits,
        flagged: Vec<FlaggedPatient>,
    },
    /// The cohort is too small for quartiles.
    Unavailable { reason: String },
}

impl RiskSection {
    fn screen(patients: &[PatientRecord]) -> Self {
        match RiskLimits::from_cohort(patients, &RiskLimits::SCREENED_VITALS) {
            Ok(limits) => {
                let flagged = risk::select_high_risk(patients, &limits)
                    .into_iter()
                    .map(FlaggedPatient::from)
                    .collect::<Vec<_>>();
                tracing::debug!(flagged = flagged.len(), "outlier screening done");
                Self::Screened { limits, flagged }
            }
            Err(err) => {
                tracing::warn!(%err, "skipping outlier screening");
                Self::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Flagged patients, empty when screening was unavailable.
    #[must_use]
    pub fn flagged(&self) -> &[FlaggedPatient] {
        match self {
            Self::Screened { flagged, .. } => flagged,
            Self::Unavailable { .. } => &[],
        }
    }
}

/// A statistically flagged patient with its fixed-threshold severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlaggedPatient {
    pub patient_id: i64,
    pub heart_rate: i32,
    pub temperature: f64,
    pub severity: Severity,
}

impl From<&PatientRecord> for FlaggedPatient {
    fn from(patient: &PatientRecord) -> Self {
        Self {
            patient_id: patient.patient_id,
            heart_rate: patient.heart_rate,
            temperature: patient.temperature,
            severity: risk::classify_severity(patient),
        }
    }
}

impl CohortReport {
    /// Builds the report, or returns `None` for an empty cohort.
    #[must_use]
    pub fn build(patients: &[PatientRecord]) -> Option<Self> {
        let heart_rate = DescriptiveStats::new(patients.iter().map(|p| p.heart_rate))?;
        let temperature = DescriptiveStats::new(patients.iter().map(|p| p.temperature))?;
        let risk = RiskSection::screen(patients);
        let heart_rate_histogram =
            Histogram::new(patients.iter().map(|p| p.heart_rate), HISTOGRAM_BINS);

        Some(Self {
            generated_at: Utc::now(),
            patient_count: patients.len(),
            heart_rate,
            temperature,
            risk,
            heart_rate_histogram,
        })
    }

    /// Writes the human-readable summary.
    pub fn write_text<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let separator = "-".repeat(SEPARATOR_WIDTH);

        writeln!(w)?;
        writeln!(w, "Health Clinic Summary Report")?;
        writeln!(w, "{separator}")?;
        write_vital_stats(w, "Heart Rate", &self.heart_rate)?;
        writeln!(w)?;
        write_vital_stats(w, "Temperature", &self.temperature)?;

        writeln!(w)?;
        writeln!(w, "High-Risk Patients")?;
        writeln!(w, "{separator}")?;
        match &self.risk {
            RiskSection::Screened { limits, flagged } => {
                for (vital, bounds) in limits.iter() {
                    writeln!(
                        w,
                        "{} fences: [{:.2}, {:.2}]",
                        vital.label(),
                        bounds.lower_fence(),
                        bounds.upper_fence()
                    )?;
                }
                if flagged.is_empty() {
                    writeln!(w, "No abnormal patients detected.")?;
                }
                for patient in flagged {
                    writeln!(
                        w,
                        "ID {} | HR {} | Temp {:?} | {}",
                        patient.patient_id, patient.heart_rate, patient.temperature, patient.severity
                    )?;
                }
            }
            RiskSection::Unavailable { reason } => {
                writeln!(w, "Outlier screening unavailable: {reason}")?;
            }
        }
        Ok(())
    }
}

/// A measurement type shown in the summary statistics.
trait SummaryValue: Copy + Into<f64> + fmt::Debug {
    /// Whether values of this type are whole numbers.
    const INTEGRAL: bool;
}

impl SummaryValue for i32 {
    const INTEGRAL: bool = true;
}

impl SummaryValue for f64 {
    const INTEGRAL: bool = false;
}

fn write_vital_stats<W, T>(w: &mut W, label: &str, stats: &DescriptiveStats<T>) -> io::Result<()>
where
    W: Write + ?Sized,
    T: SummaryValue,
{
    writeln!(w, "{label} Mean: {:.2}", stats.mean)?;
    // An odd count of whole numbers has a measured value as its median;
    // otherwise the median is a float and keeps its decimal point.
    if T::INTEGRAL && stats.count % 2 == 1 {
        writeln!(w, "{label} Median: {}", stats.median)?;
    } else {
        writeln!(w, "{label} Median: {:?}", stats.median)?;
    }
    writeln!(w, "{label} Mode: {}", stats.mode)?;
    Ok(())
}
