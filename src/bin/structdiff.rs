//! structdiff - list the structured changes between two YAML files
//!
//! Prints the change log as a YAML report on stdout.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use structdiff::{DiffConfig, MappingOrder, MovePairing, diff_documents_with_config, from_yaml_file, write_changes};

/// Environment variable holding an `EnvFilter` directive
const LOG_ENV: &str = "STRUCTDIFF_LOG";

#[derive(Parser)]
#[command(
    name = "structdiff",
    about = "List the structured changes between two YAML files",
    version
)]
struct Cli {
    /// Old document
    old: PathBuf,

    /// New document
    new: PathBuf,

    /// Pair moved scalars with the closest deleted index
    #[arg(long)]
    nearest_moves: bool,

    /// Ignore key order when hashing mappings
    #[arg(long)]
    unordered_mappings: bool,

    /// Exit with status 1 when any change is found
    #[arg(long)]
    fail_on_change: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> DiffConfig {
        DiffConfig {
            move_pairing: if self.nearest_moves {
                MovePairing::Nearest
            } else {
                MovePairing::FirstMatch
            },
            mapping_order: if self.unordered_mappings {
                MappingOrder::Unordered
            } else {
                MappingOrder::Ordered
            },
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns whether any change was reported
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let old = from_yaml_file(&cli.old).with_context(|| format!("loading {}", cli.old.display()))?;
    let new = from_yaml_file(&cli.new).with_context(|| format!("loading {}", cli.new.display()))?;

    let config = cli.config();
    debug!(?config, old = %cli.old.display(), new = %cli.new.display(), "comparing");
    let changes = diff_documents_with_config(&old, &new, config);

    let mut stdout = std::io::stdout().lock();
    write_changes(&changes, &mut stdout).context("writing report")?;
    stdout.flush().context("writing report")?;
    Ok(!changes.is_empty())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(changed) if changed && cli.fail_on_change => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
