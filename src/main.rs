use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(
    name = "loupe",
    version,
    about = "Loupe — counting-loop analysis for .lp sources"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and analyze, reporting all diagnostics
    Check {
        /// Input .lp file or directory
        input: PathBuf,
    },
    /// Report every recognized counting loop
    Loops {
        /// Input .lp file or directory
        input: PathBuf,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report lint warnings only (exit 1 if any)
    Lint {
        /// Input .lp file or directory
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Check { input } => cli::check::cmd_check(&input),
        Command::Loops { input, json } => cli::loops::cmd_loops(&input, json),
        Command::Lint { input } => cli::lint::cmd_lint(&input),
    }
}
