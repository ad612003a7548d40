//! End-to-end corpus-to-network pipeline.
//!
//! Concatenates all episodes in season order into one global scene
//! sequence, resolves interlocutors per scene, then builds and smooths the
//! interaction network. The stages run strictly in order; each consumes
//! the previous stage's output by value.

use tracing::info;

use crate::config::NetworkConfig;
use crate::models::annotation::{episode_label, Corpus};
use crate::models::network::{InteractionNetwork, SmoothedNetwork};
use crate::models::turn::SpeechTurn;
use crate::services::interaction::build_interaction_network;
use crate::services::interlocutors::estimate_interlocutors;
use crate::services::progress::ProgressReporter;
use crate::services::scenes::assign_turns_to_scenes;
use crate::services::smoothing::narrative_smoothing;
use crate::ConversoError;

/// Output of the full pipeline.
pub struct GeneratedNetwork {
    pub raw: InteractionNetwork,
    pub smoothed: SmoothedNetwork,
    /// Episode label per global scene index.
    pub scene_mapping: Vec<String>,
}

/// Assign turns to scenes and resolve interlocutors for every episode,
/// returning all scenes in global order plus the episode label of each.
pub fn assemble_scene_turns(
    corpus: Corpus,
    silence_threshold: f64,
) -> (Vec<Vec<SpeechTurn>>, Vec<String>) {
    let mut all_scene_turns: Vec<Vec<SpeechTurn>> = Vec::new();
    let mut scene_mapping: Vec<String> = Vec::new();

    for (season_idx, season) in corpus.seasons.into_iter().enumerate() {
        for (episode_idx, episode) in season.episodes.into_iter().enumerate() {
            let label = episode_label(season_idx, episode_idx);
            let scene_starts: Vec<f64> =
                episode.data.scenes.iter().map(|s| s.start).collect();

            let scene_turns = assign_turns_to_scenes(
                &scene_starts,
                episode.data.speech_segments,
                episode.duration,
            );
            let scene_turns = estimate_interlocutors(scene_turns, silence_threshold);

            info!(
                episode = %label,
                scenes = scene_turns.len(),
                turns = scene_turns.iter().map(Vec::len).sum::<usize>(),
                "episode assembled"
            );

            scene_mapping.extend(std::iter::repeat(label).take(scene_turns.len()));
            all_scene_turns.extend(scene_turns);
        }
    }

    (all_scene_turns, scene_mapping)
}

/// Run the full pipeline: estimate interlocutors, build the raw network,
/// and smooth it.
pub fn generate_network(
    corpus: Corpus,
    config: &NetworkConfig,
    progress: &dyn ProgressReporter,
) -> Result<GeneratedNetwork, ConversoError> {
    let (scene_turns, scene_mapping) = assemble_scene_turns(corpus, config.silence_threshold);

    let raw = build_interaction_network(&scene_turns);
    info!(
        scenes = raw.scene_count(),
        speakers = raw.speaker_count(),
        pairs = raw.pair_count(),
        "raw interaction network built"
    );

    let smoothed = narrative_smoothing(&raw, &scene_mapping, config.mu, progress)?;
    info!(
        pairs = smoothed.pair_count(),
        edges = smoothed.edge_count(),
        "narrative smoothing complete"
    );

    Ok(GeneratedNetwork {
        raw,
        smoothed,
        scene_mapping,
    })
}
