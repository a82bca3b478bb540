use std::{
    env,
    fs,
    path::PathBuf,
};

use anyhow::{Context, Result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Couldn't parse input arguments: {0}")]
    Parse(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

#[derive(Debug)]
pub struct InputArgs {
    /// CSV command script to run
    pub commands: PathBuf,

    /// Where bank state is loaded from and saved back to, if anywhere
    pub state: Option<PathBuf>,
}

/// Parses the input arguments: a required, existing command script, then an optional state file
pub fn parse_input_args() -> Result<InputArgs> {
    let mut args = env::args().skip(1);

    let filename = args
        .next()
        .ok_or_else(|| InputArgsError::Parse("First argument must be the command file.".to_string()))?;

    let commands = fs::canonicalize(&filename)
        .with_context(|| InputArgsError::FileNotFound(filename))?;

    let state = args.next().map(PathBuf::from);

    if let Some(extra) = args.next() {
        Err(InputArgsError::Parse(format!("Unexpected argument: {extra}")))?
    }

    Ok(InputArgs { commands, state })
}
