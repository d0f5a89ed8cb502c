//! `hygh` command-line entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use hygh::{OutputFormat, check_config_file, render_rules};
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line options for the HYGH startup gate.
#[derive(Parser)]
#[command(name = "hygh", version, about = "Employee-mode config checks for HYGH")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a config file; exits 1 on rule violations, 2 if unreadable
    Check {
        /// Path to a JSON5 config file
        path: PathBuf,
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the rules enforced under employee mode
    Rules,
}

fn main() -> anyhow::Result<ExitCode> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Check { path, format } => {
            debug!("checking config (path={}, format={:?})", path.display(), format);
            let report = check_config_file(&path, format)?;
            stdout
                .write_all(report.output.as_bytes())
                .context("failed to write report")?;
            Ok(ExitCode::from(report.status.exit_code()))
        }
        Command::Rules => {
            stdout
                .write_all(render_rules().as_bytes())
                .context("failed to write rules")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
