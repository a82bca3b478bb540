mod args;
mod config;
mod reader;
mod writer;

use bml::clock::SystemClock;
use bml::input::InputCommand;
use bml::{Bank, DEFAULT_BANK_NAME};

use std::{path::Path, sync::Arc};

use anyhow::Result;

fn main() -> Result<()> {
    config::configure_app()?;

    log::debug!("Application configured. Beginning process...");

    let args = args::parse_input_args()?;
    log::debug!("Parsed input args: {args:?}");

    let bank = load_bank(args.state.as_deref())?;

    process_commands(&bank, &args.commands)?;

    if let Some(state) = &args.state {
        log::debug!("Saving bank state to {state:?}");
        writer::write_snapshot(state, &bank.snapshot())?;
    }

    log::debug!("Process complete. Beginning report...");

    report_to_std_out(&bank)?;

    log::debug!("Application finished successfully!");

    Ok(())
}

/// Restore the bank from the state file if there is one, otherwise start empty
fn load_bank(state: Option<&Path>) -> Result<Bank> {
    let snapshot = match state {
        Some(path) => reader::read_snapshot(path)?,
        None => None,
    };

    let bank = match snapshot {
        Some(snapshot) => Bank::restore(snapshot, Arc::new(SystemClock))?,
        None => Bank::new(DEFAULT_BANK_NAME),
    };

    log::debug!("Loaded {} with {} accounts", bank.name(), bank.all_accounts().len());

    Ok(bank)
}

/// Read the command script and run every command in order. Bad rows and rejected commands are
/// logged and skipped. Listings go to stderr, keeping stdout for the report.
fn process_commands(bank: &Bank, commands: &Path) -> Result<()> {
    let mut rdr = reader::build_csv_reader(commands)?;

    log::debug!("Deserializing reader...");
    for record in rdr.deserialize::<InputCommand>() {
        log::debug!("Parsing record into InputCommand: {record:?}");
        let input = match record {
            Ok(input) => input,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        let command = match input.parse_command() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        match command.execute(bank) {
            Ok(lines) => lines.iter().for_each(|line| eprintln!("{line}")),
            Err(e) => log::warn!("{e}"),
        }
    }

    Ok(())
}

/// Build report from results, and write report to stdout
fn report_to_std_out(bank: &Bank) -> Result<()> {
    let report = bank.build_report();
    log::debug!("Successfully built reports for {} accounts", report.len());

    let mut wtr = writer::build_csv_writer();

    log::debug!("Serializing reports...");
    for account_report in report.iter() {
        log::debug!("Serializing report: {account_report:?}");
        wtr.serialize(account_report)?;
    }

    let output = writer::write_to_string(wtr)?;

    log::debug!("Writing to stdout: {output:?}");
    print!("{output}");

    Ok(())
}
