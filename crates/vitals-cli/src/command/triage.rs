use std::{
    collections::BTreeMap,
    io::{self, Write},
};

use anyhow::Context;
use clap::Args;
use vitals_analysis::{
    record::PatientRecord,
    risk::{self, Severity},
};

use crate::util;

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct TriageArg {
    /// Hide patients whose severity is Normal
    #[arg(long)]
    pub at_risk_only: bool,
}

pub(crate) fn run(arg: &TriageArg) -> anyhow::Result<()> {
    let loaded = util::load_cohort(util::DATA_PATH);
    let mut stdout = io::stdout().lock();
    write_triage(&loaded.records, arg.at_risk_only, &mut stdout)
        .context("Failed to write triage table to stdout")?;
    Ok(())
}

fn write_triage<W>(patients: &[PatientRecord], at_risk_only: bool, w: &mut W) -> io::Result<()>
where
    W: Write,
{
    if patients.is_empty() {
        writeln!(w, "Patients loaded: 0")?;
        return Ok(());
    }

    writeln!(
        w,
        "  {:>6} {:>5} {:>6} {:>5}  {}",
        "ID", "HR", "Temp", "SBP", "Severity"
    )?;
    writeln!(w, "  {}", "-".repeat(40))?;

    let mut counts = BTreeMap::<Severity, usize>::new();
    for patient in patients {
        let severity = risk::classify_severity(patient);
        *counts.entry(severity).or_default() += 1;
        if at_risk_only && severity == Severity::Normal {
            continue;
        }
        writeln!(
            w,
            "  {:>6} {:>5} {:>6?} {:>5}  {severity}",
            patient.patient_id, patient.heart_rate, patient.temperature, patient.systolic_bp
        )?;
    }

    let summary = counts
        .iter()
        .rev()
        .map(|(severity, count)| format!("{severity}: {count}"))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(w)?;
    writeln!(w, "Patients: {} ({summary})", patients.len())?;
    Ok(())
}
