//! Sample command implementation.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crawlsep_core::{resolve_policy_path, write_sample};

/// Arguments for the sample command.
#[derive(Args)]
pub struct SampleArgs {
    /// Where to write the sample policy
    pub path: Option<PathBuf>,
}

/// Runs the sample command.
pub fn run(args: &SampleArgs) -> Result<()> {
    let Some(path) = &args.path else {
        bail!("Provide a path for the sample policy.");
    };
    let path = resolve_policy_path(path)?;

    write_sample(&path)?;
    println!("Sample policy written to {}", path.display());
    Ok(())
}
