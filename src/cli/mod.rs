use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::application::LoanService;
use crate::domain::{calculate_interest, BlockHeight};
use crate::io::{Exporter, ReplayOptions, Replayer, Script, ScriptFormat, SnapshotFormat};

/// loan-ledger - In-memory loan ledger
#[derive(Parser)]
#[command(name = "loan-ledger")]
#[command(about = "Replay loan ledger scripts against an in-memory ledger")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a script of ledger operations and print each outcome
    Replay {
        /// Script file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Script format: json, csv (default: from file extension, else json)
        #[arg(short, long)]
        format: Option<String>,

        /// Validate the script without running it
        #[arg(long)]
        dry_run: bool,

        /// Print the ledger after the run: json, csv
        #[arg(long)]
        snapshot: Option<String>,
    },

    /// Show the interest credited for a number of elapsed blocks
    Interest {
        /// Elapsed blocks since the last accrual
        #[arg(allow_negative_numbers = true)]
        elapsed: BlockHeight,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.execute(stdin.lock(), stdout.lock())
    }

    /// Dispatch the command, reading scripts from `input` when no file is
    /// given and writing all results to `out`.
    pub fn execute<R: Read, W: Write>(self, input: R, mut out: W) -> Result<()> {
        match self.command {
            Commands::Replay {
                input: path,
                format,
                dry_run,
                snapshot,
            } => {
                let format = resolve_format(format.as_deref(), path.as_deref())?;
                let snapshot = snapshot
                    .as_deref()
                    .map(|s| {
                        SnapshotFormat::from_str(s).ok_or_else(|| {
                            anyhow::anyhow!("Invalid snapshot format '{}'. Valid formats: json, csv", s)
                        })
                    })
                    .transpose()?;

                let script = match &path {
                    Some(path) => {
                        let file = File::open(path)
                            .with_context(|| format!("Failed to open script: {}", path))?;
                        Script::read(file, format)
                    }
                    None => Script::read(input, format),
                }
                .context("Failed to parse script")?;

                run_replay(&script, dry_run, snapshot, &mut out)?;
            }

            Commands::Interest { elapsed } => {
                writeln!(out, "{}", calculate_interest(0, elapsed))?;
            }
        }

        Ok(())
    }
}

fn resolve_format(format: Option<&str>, path: Option<&str>) -> Result<ScriptFormat> {
    match format {
        Some(f) => ScriptFormat::from_str(f)
            .ok_or_else(|| anyhow::anyhow!("Invalid script format '{}'. Valid formats: json, csv", f)),
        None => Ok(path
            .and_then(|p| ScriptFormat::from_path(Path::new(p)))
            .unwrap_or(ScriptFormat::Json)),
    }
}

fn run_replay<W: Write>(
    script: &Script,
    dry_run: bool,
    snapshot: Option<SnapshotFormat>,
    out: &mut W,
) -> Result<()> {
    let mut service = LoanService::in_memory();
    let options = ReplayOptions { dry_run };
    let result = Replayer::new(&mut service).run(script, &options);

    if dry_run {
        writeln!(out, "Validation successful: {} operations", script.len())?;
        return Ok(());
    }

    for step in &result.steps {
        writeln!(out, "{}", serde_json::to_string(&step.outcome)?)?;
    }
    log::info!(
        "replayed {} operations: {} ok, {} failed",
        result.steps.len(),
        result.succeeded,
        result.failed
    );

    if let Some(format) = snapshot {
        Exporter::new(&service).export(&mut *out, format)?;
    }

    Ok(())
}
