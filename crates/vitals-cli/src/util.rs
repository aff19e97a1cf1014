use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use vitals_analysis::loader::{self, LoadedPatients};

/// Location of the patient vitals file, relative to the working directory.
pub const DATA_PATH: &str = "data/patient_vitals.csv";

/// Load the cohort for this run.
///
/// A file that cannot be loaded at all is reported and treated as an empty
/// cohort, which ends the run without a report.
pub fn load_cohort<P>(path: P) -> LoadedPatients
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match loader::load_patients(path) {
        Ok(loaded) => loaded,
        Err(err) if err.is_not_found() => {
            tracing::error!(path = %path.display(), "File not found.");
            LoadedPatients::default()
        }
        Err(err) => {
            tracing::error!(path = %path.display(), "{err}");
            LoadedPatients::default()
        }
    }
}

/// Write `value` as pretty-printed JSON to `path`.
pub fn save_json<T>(value: &T, path: &Path) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}
