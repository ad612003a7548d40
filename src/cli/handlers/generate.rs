//! Handler for the `generate` command.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::cli::output::{output_json, print_kv, print_success, OutputMode};
use crate::config::NetworkConfig;
use crate::models::annotation::Corpus;
use crate::services::export::{export_network, GraphFormat};
use crate::services::pipeline::generate_network;
use crate::services::progress::{NoopProgressReporter, ProgressReporter};
use crate::ConversoError;

/// Progress reporter backed by an indicatif bar, one tick per pair.
struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(ProgressStyle::default_bar());
        Self { bar }
    }
}

impl ProgressReporter for BarReporter {
    fn report(&self, current: f64, total: f64, message: Option<String>) {
        if total > 0.0 {
            self.bar.set_position((current / total * 100.0) as u64);
        }
        if let Some(msg) = message {
            self.bar.set_message(msg);
        }
    }
}

impl Drop for BarReporter {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[derive(Debug, Serialize)]
struct GenerateSummary {
    speakers: usize,
    pairs: usize,
    scenes: usize,
    edges_written: usize,
    output: String,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &Path,
    output: &Path,
    format: &str,
    silence_threshold: Option<f64>,
    mu: Option<f64>,
    config: Option<&Path>,
    no_progress: bool,
    mode: OutputMode,
) -> Result<(), ConversoError> {
    let format: GraphFormat = format.parse()?;
    let config = NetworkConfig::load(config)?.with_overrides(silence_threshold, mu);
    let corpus = Corpus::from_path(input)?;

    let progress: Box<dyn ProgressReporter> = if no_progress || mode == OutputMode::Json {
        Box::new(NoopProgressReporter)
    } else {
        Box::new(BarReporter::new())
    };

    let network = generate_network(corpus, &config, progress.as_ref())?;
    drop(progress);

    export_network(&network.smoothed, output, format)?;

    let summary = GenerateSummary {
        speakers: network.raw.speaker_count(),
        pairs: network.raw.pair_count(),
        scenes: network.raw.scene_count(),
        edges_written: network.smoothed.edge_count(),
        output: output.display().to_string(),
    };

    match mode {
        OutputMode::Json => output_json(&summary),
        OutputMode::Human => {
            print_success(&format!("network written to {}", summary.output));
            print_kv("speakers", &summary.speakers.to_string());
            print_kv("pairs", &summary.pairs.to_string());
            print_kv("scenes", &summary.scenes.to_string());
            print_kv("edges", &summary.edges_written.to_string());
        }
    }

    Ok(())
}
