use bml::snapshot::BankSnapshot;

use std::{
    fs::{self, File},
    path::Path,
};

use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, Trim};

pub fn build_csv_reader(filepath: &Path) -> Result<Reader<File>> {
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(filepath)
        .with_context(|| format!("Couldn't open command file: {filepath:?}"))?;

    Ok(reader)
}

/// Reads a saved bank state. A state file that doesn't exist yet means a fresh bank.
pub fn read_snapshot(filepath: &Path) -> Result<Option<BankSnapshot>> {
    if !filepath.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(filepath)
        .with_context(|| format!("Couldn't read state file: {filepath:?}"))?;

    let snapshot = serde_json::from_str(&json)
        .with_context(|| format!("Couldn't parse state file: {filepath:?}"))?;

    Ok(Some(snapshot))
}
