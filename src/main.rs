use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use solflat::error::FlattenError;
use solflat::flatten;

mod telemetry;

/// Flatten multi-file Solidity sources into one self-contained file
///
/// solflat resolves every import of the given entry files (project files and
/// node_modules packages alike), orders the whole dependency closure so each
/// file appears after everything it imports, reconciles the per-file
/// `pragma solidity` declarations into a single one, and emits one
/// concatenated source with import lines stripped.
///
/// Must be run inside a Truffle project (a directory tree containing
/// truffle.js or truffle-config.js); all paths in the output are relative to
/// that project root.
///
/// EXAMPLES:
///
///   solflat contracts/MyToken.sol
///
///   solflat contracts/MyToken.sol contracts/Crowdsale.sol \
///       --output build/flat/Combined.sol
#[derive(Parser)]
#[command(name = "solflat")]
#[command(version, about)]
struct Cli {
    /// Entry source files to flatten
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Write output here instead of stdout (parent directories are created,
    /// an existing file is overwritten)
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let entries: Vec<&Path> = cli.files.iter().map(PathBuf::as_path).collect();

    match cli.output {
        Some(target) => {
            let mut file = open_output(&target)?;
            flatten::flatten_to_writer(&entries, &cwd, &mut file)?;
            file.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            flatten::flatten_to_writer(&entries, &cwd, &mut lock)?;
            lock.flush()?;
        }
    }
    Ok(())
}

/// Open the output file, creating parent directories as needed and
/// truncating any existing file.
fn open_output(target: &Path) -> Result<fs::File, FlattenError> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| FlattenError::InvalidOutputTarget {
            path: target.to_owned(),
            detail: format!("could not create parent directory: {err}"),
        })?;
    }
    fs::File::create(target).map_err(|err| FlattenError::InvalidOutputTarget {
        path: target.to_owned(),
        detail: format!("could not open for writing: {err}"),
    })
}
