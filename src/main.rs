//! Converso - dynamic conversational networks from TV series annotations
//!
//! Usage:
//!   converso generate annotations.json network.graphml
//!   converso stats annotations.json        Per-pair interaction totals
//!   converso analyze annotations.json      Speaker centrality and roles
//!   converso --help                        Show all commands

use anyhow::Result;
use clap::Parser;

use converso::cli::output::OutputMode;
use converso::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tracing to stderr, so piped stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("converso=info".parse()?),
        )
        .init();

    let mode = OutputMode::from_json_flag(cli.json);
    converso::cli::execute(&cli.command, mode)?;

    Ok(())
}
