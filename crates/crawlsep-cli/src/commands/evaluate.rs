//! Evaluate command implementation.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use crawlsep_core::{load_policy_from_file, resolve_policy_path};
use crawlsep_engine::{summarize_policy, OutputFormat};

/// Arguments for the evaluate command.
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to the policy JSON file
    pub path: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, env = "CRAWL_SEP_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Runs the evaluate command.
pub fn run(args: &EvaluateArgs) -> Result<()> {
    let Some(path) = &args.path else {
        bail!("Provide a policy JSON file.");
    };
    let path = resolve_policy_path(path)?;
    info!(path = %path.display(), format = %args.format, "Evaluating policy");

    let policy = load_policy_from_file(&path)?;
    let summary = summarize_policy(&policy);

    let mut stdout = io::stdout().lock();
    args.format.reporter().report(&summary, &mut stdout)?;
    Ok(())
}
