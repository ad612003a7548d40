//! CLI interface for Converso.

pub mod handlers;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use output::OutputMode;

use crate::ConversoError;

/// Converso - dynamic conversational networks from TV series annotations
#[derive(Parser)]
#[command(name = "converso", version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the smoothed dynamic network from an annotation file
    Generate {
        /// Input annotation file (JSON)
        input: PathBuf,
        /// Output graph file
        output: PathBuf,
        /// Output format (graphml, json)
        #[arg(long, default_value = "graphml")]
        format: String,
        /// Maximum silence in seconds between interacting turns
        #[arg(long)]
        silence_threshold: Option<f64>,
        /// Sigmoid steepness for bounding smoothed weights
        #[arg(long)]
        mu: Option<f64>,
        /// TOML file with tunables
        #[arg(long, env = "CONVERSO_CONFIG")]
        config: Option<PathBuf>,
        /// Disable the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Per-pair interaction statistics of the raw network
    Stats {
        /// Input annotation file (JSON)
        input: PathBuf,
        /// Maximum pairs listed
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Maximum silence in seconds between interacting turns
        #[arg(long)]
        silence_threshold: Option<f64>,
        /// TOML file with tunables
        #[arg(long, env = "CONVERSO_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Centrality analysis of the aggregated speaker network
    Analyze {
        /// Input annotation file (JSON)
        input: PathBuf,
        /// Centrality metric (degree, betweenness, closeness, all)
        #[arg(long, default_value = "degree")]
        metric: String,
        /// Maximum speakers listed
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Maximum silence in seconds between interacting turns
        #[arg(long)]
        silence_threshold: Option<f64>,
        /// TOML file with tunables
        #[arg(long, env = "CONVERSO_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Dispatch a parsed command to its handler.
pub fn execute(command: &Commands, mode: OutputMode) -> Result<(), ConversoError> {
    match command {
        Commands::Generate {
            input,
            output,
            format,
            silence_threshold,
            mu,
            config,
            no_progress,
        } => handlers::generate::run(
            input,
            output,
            format,
            *silence_threshold,
            *mu,
            config.as_deref(),
            *no_progress,
            mode,
        ),
        Commands::Stats {
            input,
            limit,
            silence_threshold,
            config,
        } => handlers::stats::run(input, *limit, *silence_threshold, config.as_deref(), mode),
        Commands::Analyze {
            input,
            metric,
            limit,
            silence_threshold,
            config,
        } => handlers::analyze::run(
            input,
            metric,
            *limit,
            *silence_threshold,
            config.as_deref(),
            mode,
        ),
    }
}
