use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI: one subcommand per library helper.
#[derive(Parser, Debug)]
#[command(name = "fsutil", version, about = "Filesystem convenience helpers")]
pub struct Cli {
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the directory a path implies (the parent, when it names a file).
    Ensure { path: PathBuf },
    /// Print whether a path exists; exits non-zero when it does not.
    Exists { path: PathBuf },
    /// Write text to a file, creating parent directories. Reads stdin when TEXT is omitted.
    Write {
        path: PathBuf,
        text: Option<String>,
    },
    /// Print a text file.
    Read { path: PathBuf },
    /// Pretty-print a JSON file.
    Json { path: PathBuf },
    /// Copy a file, creating the destination's parent directories.
    Copy { from: PathBuf, to: PathBuf },
    /// List files below ROOT with one of the given extensions.
    Scan {
        root: PathBuf,
        /// Extension to match, e.g. `.json` or `json`. Repeatable; defaults to the config.
        #[arg(short = 'e', long = "ext")]
        extensions: Vec<String>,
    },
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
