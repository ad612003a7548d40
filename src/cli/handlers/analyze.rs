//! Handler for the `analyze` command.

use std::path::Path;

use crate::cli::output::{output_json_list, print_table, OutputMode};
use crate::config::NetworkConfig;
use crate::models::annotation::Corpus;
use crate::services::analytics::{compute_centrality, CentralityMetric};
use crate::services::interaction::build_interaction_network;
use crate::services::pipeline::assemble_scene_turns;
use crate::ConversoError;

pub fn run(
    input: &Path,
    metric: &str,
    limit: usize,
    silence_threshold: Option<f64>,
    config: Option<&Path>,
    mode: OutputMode,
) -> Result<(), ConversoError> {
    let metric: CentralityMetric = metric.parse()?;
    let config = NetworkConfig::load(config)?.with_overrides(silence_threshold, None);
    let corpus = Corpus::from_path(input)?;

    let (scene_turns, _) = assemble_scene_turns(corpus, config.silence_threshold);
    let network = build_interaction_network(&scene_turns);
    let results = compute_centrality(&network, &[metric], limit)?;

    match mode {
        OutputMode::Json => output_json_list(&results),
        OutputMode::Human => print_table(
            &["Speaker", "Degree", "Betweenness", "Closeness", "Role", "Seconds"],
            results
                .iter()
                .map(|r| {
                    vec![
                        r.speaker.clone(),
                        format!("{:.3}", r.degree),
                        format!("{:.3}", r.betweenness),
                        format!("{:.3}", r.closeness),
                        r.narrative_role.clone(),
                        format!("{:.1}", r.total_seconds),
                    ]
                })
                .collect(),
        ),
    }

    Ok(())
}
