//! Handler for the `stats` command.

use std::path::Path;

use serde::Serialize;

use crate::cli::output::{output_json_list, print_table, OutputMode};
use crate::config::NetworkConfig;
use crate::models::annotation::Corpus;
use crate::services::interaction::build_interaction_network;
use crate::services::pipeline::assemble_scene_turns;
use crate::ConversoError;

#[derive(Debug, Serialize)]
struct PairStats {
    first: String,
    second: String,
    scenes: usize,
    total_seconds: f64,
}

pub fn run(
    input: &Path,
    limit: usize,
    silence_threshold: Option<f64>,
    config: Option<&Path>,
    mode: OutputMode,
) -> Result<(), ConversoError> {
    let config = NetworkConfig::load(config)?.with_overrides(silence_threshold, None);
    let corpus = Corpus::from_path(input)?;

    let (scene_turns, _) = assemble_scene_turns(corpus, config.silence_threshold);
    let network = build_interaction_network(&scene_turns);

    let mut rows: Vec<PairStats> = network
        .pairs()
        .map(|(pair, timeline)| PairStats {
            first: pair.first().to_string(),
            second: pair.second().to_string(),
            scenes: timeline.len(),
            total_seconds: timeline.values().sum(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total_seconds
            .partial_cmp(&a.total_seconds)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows.truncate(limit);

    match mode {
        OutputMode::Json => output_json_list(&rows),
        OutputMode::Human => print_table(
            &["Pair", "Scenes", "Seconds"],
            rows.iter()
                .map(|r| {
                    vec![
                        format!("{} <-> {}", r.first, r.second),
                        r.scenes.to_string(),
                        format!("{:.1}", r.total_seconds),
                    ]
                })
                .collect(),
        ),
    }

    Ok(())
}
