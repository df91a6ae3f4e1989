//! CLI commands and argument parsing.

pub mod evaluate;
pub mod sample;
pub mod validate;

use clap::{Parser, Subcommand};

/// crawl-sep - Crawler separation and fairness checks for access policies
#[derive(Parser)]
#[command(name = "crawl-sep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate separation and fairness of a policy
    Evaluate(evaluate::EvaluateArgs),

    /// Check that a policy file is well-formed
    Validate(validate::ValidateArgs),

    /// Write a sample policy
    Sample(sample::SampleArgs),

    /// Print version information
    Version,
}
