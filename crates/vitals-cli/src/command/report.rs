//! Summary report command
//!
//! Loads the cohort, prints the summary statistics and the high-risk list,
//! then displays the heart-rate histogram.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, ValueEnum};
use vitals_analysis::{record::PatientRecord, report::CohortReport};

use crate::{ui, util};

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct ReportArg {
    /// How to display the heart-rate histogram
    #[arg(long, value_enum, default_value_t)]
    pub histogram: HistogramDisplay,

    /// Also save the report as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum HistogramDisplay {
    /// Interactive bar chart in the terminal (close with q/Esc)
    #[default]
    Window,
    /// Plain-text bar chart on stdout
    Text,
    /// Do not show the histogram
    #[value(name = "none")]
    Hidden,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let loaded = util::load_cohort(util::DATA_PATH);

    let report = {
        let mut stdout = io::stdout().lock();
        let report = write_summary(&loaded.records, &mut stdout)
            .context("Failed to write report to stdout")?;
        stdout.flush().context("Failed to flush stdout")?;
        report
    };
    let Some(report) = report else {
        tracing::info!("no patients loaded, skipping report");
        return Ok(());
    };

    if let Some(path) = &arg.json {
        util::save_json(&report, path)?;
        tracing::info!(path = %path.display(), "report saved");
    }

    match arg.histogram {
        HistogramDisplay::Window => ui::histogram::show(&report.heart_rate_histogram)?,
        HistogramDisplay::Text => {
            let mut stdout = io::stdout().lock();
            ui::histogram::write_text(&report.heart_rate_histogram, &mut stdout)
                .context("Failed to write histogram to stdout")?;
        }
        HistogramDisplay::Hidden => {}
    }

    Ok(())
}

/// Print the load count and, for a non-empty cohort, the summary report.
///
/// Returns the report so the caller can chart or save it.
fn write_summary<W>(patients: &[PatientRecord], w: &mut W) -> io::Result<Option<CohortReport>>
where
    W: Write,
{
    writeln!(w, "Patients loaded: {}", patients.len())?;
    let Some(report) = CohortReport::build(patients) else {
        return Ok(None);
    };
    report.write_text(w)?;
    Ok(Some(report))
}
