use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::policy::SelectionPolicy;
use crate::record::{MutantRecord, format_record};
use crate::trace::{ProgramTrace, replay};
use crate::ui::Ui;

/// Top-level CLI arguments for the `const-mutant` binary.
#[derive(Debug, Parser)]
#[command(
    name = "const-mutant",
    version,
    about = "Constant-replacement mutant generation for C-family sources"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands supported by `const-mutant`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a traversal trace and emit mutant records.
    Mutate {
        /// Path to a JSON traversal trace produced by the parser front end.
        #[arg(long)]
        input: PathBuf,

        /// Print every mutant record, not just the summary.
        #[arg(long, short = 'v')]
        verbose: bool,

        /// Emit a machine-readable JSON report to stdout.
        #[arg(long)]
        json: bool,
    },

    /// Classify option tokens and print the resulting selection policy.
    Policy {
        /// Raw option tokens, as they would appear in a configuration file.
        tokens: Vec<String>,
    },
}

/// Machine-readable report for one replayed trace.
///
/// In `--json` mode we print this to stdout as pretty JSON.
#[derive(Debug, Serialize)]
pub struct MutationReport {
    /// Tool name, stable across versions.
    pub tool: &'static str,

    /// Current crate version.
    pub version: &'static str,

    /// Literals the traversal visited.
    pub visited: usize,

    /// Literals that passed the eligibility predicates.
    pub eligible: usize,

    /// Visited literals inside loop bodies.
    pub literals_in_loops: usize,

    /// Mutant records in emission order.
    pub mutants: Vec<MutantRecord>,
}

/// Parse CLI arguments and dispatch the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Mutate {
            input,
            verbose,
            json,
        } => {
            let ui = Ui::new(json);

            ui.heading("const-mutant: mutate");
            ui.line(format!("trace: {:?}", input));

            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read trace file {:?}", input))?;
            let trace: ProgramTrace = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse trace file {:?}", input))?;

            let outcome = replay(&trace);

            ui.summary(
                outcome.visited,
                outcome.eligible,
                outcome.literals_in_loops,
                outcome.records.len(),
            );

            if verbose {
                for (idx, record) in outcome.records.iter().enumerate() {
                    ui.line(format_record(idx + 1, record));
                }
            }

            if json {
                let report = MutationReport {
                    tool: "const-mutant",
                    version: env!("CARGO_PKG_VERSION"),
                    visited: outcome.visited,
                    eligible: outcome.eligible,
                    literals_in_loops: outcome.literals_in_loops,
                    mutants: outcome.records,
                };

                let json = serde_json::to_string_pretty(&report).context("serialize report")?;
                println!("{json}");
            }

            Ok(())
        }

        Command::Policy { tokens } => {
            let policy = SelectionPolicy::from_tokens(&tokens);

            let json = serde_json::to_string_pretty(&policy).context("serialize policy")?;
            println!("{json}");

            Ok(())
        }
    }
}
