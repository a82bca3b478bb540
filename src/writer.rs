use bml::snapshot::BankSnapshot;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use csv::Writer;

pub fn build_csv_writer() -> Writer<Vec<u8>> {
    Writer::from_writer(vec![])
}

pub fn write_to_string(writer: Writer<Vec<u8>>) -> Result<String> {
    let utf8 = writer.into_inner()?;
    let string = String::from_utf8(utf8)?;
    Ok(string)
}

pub fn write_snapshot(filepath: &Path, snapshot: &BankSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;

    fs::write(filepath, json).with_context(|| format!("Couldn't write state file: {filepath:?}"))?;

    Ok(())
}
