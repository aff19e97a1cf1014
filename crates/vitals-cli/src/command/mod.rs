use clap::{ArgAction, Parser, Subcommand};

use self::{report::ReportArg, triage::TriageArg};
use crate::logging;

mod report;
mod triage;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to do with the loaded patients (defaults to `report`)
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Print the cohort summary report and show the heart-rate histogram
    Report(#[clap(flatten)] ReportArg),
    /// Print every patient with its severity tier
    Triage(#[clap(flatten)] TriageArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.verbose, args.quiet);

    match args.mode.unwrap_or(Mode::Report(ReportArg::default())) {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Triage(arg) => triage::run(&arg)?,
    }
    Ok(())
}
