// src/file.rs

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::data::{LeadersByCountry, total_leaders};
use crate::error::OutputError;
use crate::export;

/// What ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveSummary {
    pub path: PathBuf,
    pub leaders: usize,
    pub countries: usize,
}

/// Write the dataset in the configured format, then read it back and
/// check it matches. Returns the final path written to.
pub fn save_and_verify(export: &ExportOptions, data: &LeadersByCountry) -> Result<SaveSummary, OutputError> {
    let path = export.out_path();
    write_dataset(&path, export.format, data)?;

    let reread = read_dataset(&path, export.format)?;
    let matches = match export.format {
        ExportFormat::Json => &reread == data,
        // CSV drops countries without rows; compare the flattened form.
        ExportFormat::Csv => export::flatten(&reread) == export::flatten(data),
    };
    if !matches {
        return Err(OutputError::Mismatch(path));
    }

    let summary = SaveSummary { path, leaders: total_leaders(data), countries: data.len() };
    info!(
        "{} verified: {} leaders from {} countries",
        summary.path.display(),
        summary.leaders,
        summary.countries
    );
    Ok(summary)
}

/// Ensure parent dir exists; create/truncate file; write everything.
pub fn write_dataset(path: &Path, format: ExportFormat, data: &LeadersByCountry) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut out = BufWriter::new(File::create(path)?); // truncate/overwrite
    match format {
        ExportFormat::Json => {
            export::write_json(&mut out, data)?;
            writeln!(out)?;
        }
        ExportFormat::Csv => export::write_csv(&mut out, data)?,
    }
    out.flush()?;
    Ok(())
}

pub fn read_dataset(path: &Path, format: ExportFormat) -> Result<LeadersByCountry, OutputError> {
    let input = BufReader::new(File::open(path)?);
    Ok(match format {
        ExportFormat::Json => export::read_json(input)?,
        ExportFormat::Csv => export::group(export::read_csv(input)?),
    })
}

pub fn ensure_directory(dir: &Path) -> Result<(), OutputError> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
