//! Validate command implementation.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use crawlsep_core::{load_policy_from_file, resolve_policy_path};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the policy JSON file
    pub path: Option<PathBuf>,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runs the validate command.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let Some(path) = &args.path else {
        bail!("Provide a policy JSON file.");
    };
    let path = resolve_policy_path(path)?;
    info!(path = %path.display(), "Validating policy");

    let policy = load_policy_from_file(&path)?;

    if args.verbose {
        println!("Validating: {}", path.display());
        println!("  Site: {}", policy.site);
        println!(
            "  Groups: {}",
            policy.user_agents.group_names().collect::<Vec<_>>().join(", ")
        );
        println!("  Rules: {}", policy.rules.len());
    }

    println!("Policy is valid.");
    Ok(())
}
