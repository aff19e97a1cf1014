//! Patient risk rules.
//!
//! Two independent rules live here:
//!
//! - [`classify_severity`] tiers a single patient against fixed clinical
//!   thresholds.
//! - [`select_high_risk`] picks the patients whose vitals are statistical
//!   outliers relative to their cohort, using [`RiskLimits`].
//!
//! The report composes them: severity is only shown for selected patients.

use std::collections::BTreeMap;

use serde::Serialize;
use vitals_stats::{StatsError, outlier::OutlierBounds};

use crate::record::{PatientRecord, Vital};

pub const CRITICAL_HEART_RATE: i32 = 120;
pub const CRITICAL_TEMPERATURE: f64 = 39.5;
pub const CRITICAL_SYSTOLIC_BP: i32 = 180;

/// Heart rate must exceed this value (strictly) to be high risk.
pub const HIGH_HEART_RATE: i32 = 100;
pub const HIGH_TEMPERATURE: f64 = 38.0;
pub const HIGH_SYSTOLIC_BP: i32 = 140;

/// Fixed-threshold clinical risk tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[display("Normal")]
    Normal,
    #[display("High Risk")]
    HighRisk,
    #[display("Critical")]
    Critical,
}

/// Tier a patient by heart rate, temperature and systolic blood pressure.
///
/// Critical thresholds are checked first; a patient meeting any of them is
/// critical regardless of the other vitals.
#[must_use]
pub fn classify_severity(patient: &PatientRecord) -> Severity {
    let PatientRecord {
        heart_rate,
        temperature,
        systolic_bp,
        ..
    } = *patient;

    if heart_rate >= CRITICAL_HEART_RATE
        || temperature >= CRITICAL_TEMPERATURE
        || systolic_bp >= CRITICAL_SYSTOLIC_BP
    {
        Severity::Critical
    } else if heart_rate > HIGH_HEART_RATE
        || temperature >= HIGH_TEMPERATURE
        || systolic_bp >= HIGH_SYSTOLIC_BP
    {
        Severity::HighRisk
    } else {
        Severity::Normal
    }
}

/// Cohort-relative outlier fences, one set per vital sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskLimits {
    bounds: BTreeMap<Vital, OutlierBounds<f64>>,
}

impl RiskLimits {
    /// Vitals screened by the summary report.
    pub const SCREENED_VITALS: [Vital; 2] = [Vital::HeartRate, Vital::Temperature];

    /// Computes outlier bounds for each of `vitals` over the cohort.
    ///
    /// Fails when the cohort is too small for quartiles to exist.
    pub fn from_cohort(patients: &[PatientRecord], vitals: &[Vital]) -> Result<Self, StatsError> {
        let bounds = vitals
            .iter()
            .map(|&vital| {
                let bounds = OutlierBounds::new(patients.iter().map(|p| p.vital(vital)))?;
                Ok((vital, bounds))
            })
            .collect::<Result<_, StatsError>>()?;
        Ok(Self { bounds })
    }

    /// Fences per screened vital, in `Vital` order.
    pub fn iter(&self) -> impl Iterator<Item = (Vital, &OutlierBounds<f64>)> + '_ {
        self.bounds.iter().map(|(vital, bounds)| (*vital, bounds))
    }

    /// Whether any screened vital of `patient` falls outside its fences.
    #[must_use]
    pub fn is_outside(&self, patient: &PatientRecord) -> bool {
        self.bounds
            .iter()
            .any(|(vital, bounds)| bounds.is_outlier(patient.vital(*vital)))
    }
}

/// Patients with at least one vital outside the cohort's fences, in input order.
#[must_use]
pub fn select_high_risk<'a>(
    patients: &'a [PatientRecord],
    limits: &RiskLimits,
) -> Vec<&'a PatientRecord> {
    patients.iter().filter(|p| limits.is_outside(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(patient_id: i64, heart_rate: i32, temperature: f64, systolic_bp: i32) -> PatientRecord {
        PatientRecord {
            patient_id,
            age: 50,
            systolic_bp,
            heart_rate,
            oxygen_saturation: 97,
            temperature,
        }
    }

    fn cohort() -> Vec<PatientRecord> {
        let heart_rates = [70, 72, 74, 76, 78, 80, 82, 150];
        let temperatures = [36.8, 36.9, 37.0, 37.0, 37.1, 37.2, 36.9, 37.0];
        (1..)
            .zip(heart_rates.into_iter().zip(temperatures))
            .map(|(id, (hr, temp))| patient(id, hr, temp, 120))
            .collect()
    }

    #[test]
    fn test_heart_rate_critical() {
        assert_eq!(classify_severity(&patient(1, 125, 37.0, 120)), Severity::Critical);
    }

    #[test]
    fn test_heart_rate_high_risk() {
        assert_eq!(classify_severity(&patient(1, 105, 37.0, 120)), Severity::HighRisk);
    }

    #[test]
    fn test_normal() {
        assert_eq!(classify_severity(&patient(1, 72, 36.8, 118)), Severity::Normal);
    }

    #[test]
    fn test_threshold_edges() {
        assert_eq!(classify_severity(&patient(1, 120, 37.0, 120)), Severity::Critical);
        assert_eq!(classify_severity(&patient(1, 100, 37.0, 120)), Severity::Normal);
        assert_eq!(classify_severity(&patient(1, 101, 37.0, 120)), Severity::HighRisk);
        assert_eq!(classify_severity(&patient(1, 80, 38.0, 120)), Severity::HighRisk);
        assert_eq!(classify_severity(&patient(1, 80, 39.5, 120)), Severity::Critical);
        assert_eq!(classify_severity(&patient(1, 80, 37.0, 140)), Severity::HighRisk);
        assert_eq!(classify_severity(&patient(1, 80, 37.0, 180)), Severity::Critical);
    }

    #[test]
    fn test_critical_checked_first() {
        assert_eq!(classify_severity(&patient(1, 105, 39.6, 150)), Severity::Critical);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Normal.to_string(), "Normal");
        assert_eq!(Severity::HighRisk.to_string(), "High Risk");
        assert_eq!(Severity::Critical.to_string(), "Critical");
    }

    #[test]
    fn test_select_heart_rate_outlier() {
        let patients = cohort();
        let limits = RiskLimits::from_cohort(&patients, &RiskLimits::SCREENED_VITALS).unwrap();

        let (vital, hr_bounds) = limits.iter().next().unwrap();
        assert_eq!(vital, Vital::HeartRate);
        assert_eq!(hr_bounds.q1(), 73.0);
        assert_eq!(hr_bounds.q3(), 81.0);
        assert_eq!(hr_bounds.upper_fence(), 93.0);

        let flagged = select_high_risk(&patients, &limits);
        let ids = flagged.iter().map(|p| p.patient_id).collect::<Vec<_>>();
        assert_eq!(ids, [8]);
        assert_eq!(classify_severity(flagged[0]), Severity::Critical);
    }

    #[test]
    fn test_select_temperature_outlier_keeps_fixed_severity() {
        let mut patients = cohort();
        patients.push(patient(9, 78, 39.0, 120));
        let limits = RiskLimits::from_cohort(&patients, &RiskLimits::SCREENED_VITALS).unwrap();

        let flagged = select_high_risk(&patients, &limits);
        let labelled = flagged
            .iter()
            .map(|p| (p.patient_id, classify_severity(p)))
            .collect::<Vec<_>>();
        assert_eq!(labelled, [(8, Severity::Critical), (9, Severity::HighRisk)]);
    }

    #[test]
    fn test_only_screened_vitals_are_checked() {
        let mut patients = cohort();
        patients[0].systolic_bp = 220;
        let limits = RiskLimits::from_cohort(&patients, &[Vital::Temperature]).unwrap();
        assert!(select_high_risk(&patients, &limits).is_empty());
        let vitals = limits.iter().map(|(vital, _)| vital).collect::<Vec<_>>();
        assert_eq!(vitals, [Vital::Temperature]);
    }

    #[test]
    fn test_limits_need_two_patients() {
        let patients = [patient(1, 80, 37.0, 120)];
        assert_eq!(
            RiskLimits::from_cohort(&patients, &RiskLimits::SCREENED_VITALS).unwrap_err(),
            StatsError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }
}
