//! crawl-sep CLI - Command-line interface for crawler access policy evaluation.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crawlsep=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Evaluate(args)) => commands::evaluate::run(&args),
        Some(Commands::Validate(args)) => commands::validate::run(&args),
        Some(Commands::Sample(args)) => commands::sample::run(&args),
        Some(Commands::Version) => {
            println!("crawl-sep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
