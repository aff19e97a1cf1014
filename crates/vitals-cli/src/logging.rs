use std::io;

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// Stdout carries the report, so the default level is `warn`: dropped rows
/// and load failures are visible, progress messages are not.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::new(level_directive(verbose, quiet));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn level_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
