use std::fmt;

use serde::{Deserialize, Serialize};

/// One patient's vital signs, as loaded from a single CSV row.
///
/// Records are immutable once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: i64,
    pub age: i32,
    pub systolic_bp: i32,
    pub heart_rate: i32,
    pub oxygen_saturation: i32,
    pub temperature: f64,
}

impl PatientRecord {
    /// Returns the value of a vital sign as `f64`.
    #[must_use]
    pub fn vital(&self, vital: Vital) -> f64 {
        match vital {
            Vital::Age => f64::from(self.age),
            Vital::SystolicBp => f64::from(self.systolic_bp),
            Vital::HeartRate => f64::from(self.heart_rate),
            Vital::OxygenSaturation => f64::from(self.oxygen_saturation),
            Vital::Temperature => self.temperature,
        }
    }
}

/// Numeric measurement columns of a [`PatientRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    Age,
    SystolicBp,
    HeartRate,
    OxygenSaturation,
    Temperature,
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.column(), f)
    }
}

impl Vital {
    /// Column name in the input file.
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::SystolicBp => "systolic_bp",
            Self::HeartRate => "heart_rate",
            Self::OxygenSaturation => "oxygen_saturation",
            Self::Temperature => "temperature",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::SystolicBp => "Systolic BP",
            Self::HeartRate => "Heart Rate",
            Self::OxygenSaturation => "Oxygen Saturation",
            Self::Temperature => "Temperature",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vital_accessor() {
        let patient = PatientRecord {
            patient_id: 1,
            age: 40,
            systolic_bp: 120,
            heart_rate: 75,
            oxygen_saturation: 98,
            temperature: 36.9,
        };
        assert_eq!(patient.vital(Vital::HeartRate), 75.0);
        assert_eq!(patient.vital(Vital::Temperature), 36.9);
        assert_eq!(patient.vital(Vital::SystolicBp), 120.0);
    }

    #[test]
    fn test_vital_serializes_as_column_name() {
        for vital in [
            Vital::Age,
            Vital::SystolicBp,
            Vital::HeartRate,
            Vital::OxygenSaturation,
            Vital::Temperature,
        ] {
            let json = serde_json::to_string(&vital).unwrap();
            assert_eq!(json, format!("\"{}\"", vital.column()));
        }
    }
}
