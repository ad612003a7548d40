//! Narrative smoothing of sparse interaction evidence.
//!
//! Characters co-occur only in some scenes, so the raw network is bursty.
//! For every interacting pair this pass fills the scenes between and around
//! their co-occurrences with a decaying strength signal: a relationship
//! fades in proportion to how much each member was engaged with other
//! characters in the meantime. The resulting raw values, which can go
//! negative, are compressed into [0, 1] through a sigmoid, so a fully
//! undecayed silence still reads as the neutral strength 0.5.
//!
//! Each pair's timeline is computed independently from the others; the
//! loop is a deterministic single pass over the sorted pair set.

use ndarray::{Array1, Zip};
use tracing::debug;

use crate::models::network::{InteractionNetwork, PairKey, SmoothedEdge, SmoothedNetwork};
use crate::services::progress::ProgressReporter;
use crate::utils::math::{cumulative_sum, reverse_cumulative_sum, sigmoid};
use crate::ConversoError;

/// Interpolate every pair's relationship weight across all scenes.
///
/// `scene_mapping` assigns an episode label to each global scene index and
/// must cover exactly the network's scene count. Every output edge carries
/// the label of its scene.
pub fn narrative_smoothing(
    raw: &InteractionNetwork,
    scene_mapping: &[String],
    mu: f64,
    progress: &dyn ProgressReporter,
) -> Result<SmoothedNetwork, ConversoError> {
    if scene_mapping.len() != raw.scene_count() {
        return Err(ConversoError::Validation(format!(
            "scene mapping covers {} scenes but the network has {}",
            scene_mapping.len(),
            raw.scene_count()
        )));
    }

    let mut smoothed = SmoothedNetwork::new();
    let pair_count = raw.pair_count();

    for (idx, (pair, occurrences)) in raw.pairs().enumerate() {
        progress.step(idx + 1, pair_count, &pair.to_string());
        debug!(pair = %pair, occurrences = occurrences.len(), "smoothing pair");
        smooth_pair(raw, pair, occurrences, scene_mapping, mu, &mut smoothed);
    }

    Ok(smoothed)
}

fn smooth_pair(
    raw: &InteractionNetwork,
    pair: &PairKey,
    occurrences: &std::collections::BTreeMap<usize, f64>,
    scene_mapping: &[String],
    mu: f64,
    smoothed: &mut SmoothedNetwork,
) {
    let scene_indices: Vec<usize> = occurrences.keys().copied().collect();
    let Some((&first_scene, &last_scene)) = scene_indices.first().zip(scene_indices.last())
    else {
        return;
    };
    let weight_at = |scene: usize| occurrences.get(&scene).copied().unwrap_or(0.0);
    let add = |smoothed: &mut SmoothedNetwork, scene: usize, raw_weight: f64| {
        smoothed.add_edge(
            pair.clone(),
            scene,
            SmoothedEdge {
                weight: sigmoid(raw_weight, mu),
                episode: scene_mapping[scene].clone(),
            },
        );
    };

    // Relation weight before the first occurrence: narrative anticipation.
    // The first occurrence's strength, decayed backward by the cumulative
    // alternative engagement of both members. Without any engagement in
    // the window there is no narrative information to extend, so no edges.
    let before: Vec<f64> = (0..first_scene)
        .map(|scene| raw.combined_engagement(pair, scene))
        .collect();
    if let Some(onset) = before.iter().position(|&t| t > 0.0) {
        let anticipation = reverse_cumulative_sum(&Array1::from_vec(before))
            .mapv(|cum| weight_at(first_scene) - cum);
        for scene in onset..first_scene {
            add(smoothed, scene, anticipation[scene]);
        }
    }

    // Occurrences themselves, and the scenes strictly between consecutive
    // occurrences: persistence of the last occurrence decays forward,
    // anticipation of the next decays backward, and each intermediate
    // scene takes whichever signal decays more slowly.
    for (k, &left) in scene_indices.iter().enumerate() {
        add(smoothed, left, weight_at(left));

        if let Some(&right) = scene_indices.get(k + 1) {
            let separation: Vec<f64> = (left + 1..right)
                .map(|scene| raw.combined_engagement(pair, scene))
                .collect();
            if separation.is_empty() {
                continue;
            }
            let separation = Array1::from_vec(separation);
            let persistence =
                cumulative_sum(&separation).mapv(|cum| weight_at(left) - cum);
            let anticipation =
                reverse_cumulative_sum(&separation).mapv(|cum| weight_at(right) - cum);
            let weights =
                Zip::from(&persistence).and(&anticipation).map_collect(|&p, &a| p.max(a));
            for (offset, &raw_weight) in weights.iter().enumerate() {
                add(smoothed, left + 1 + offset, raw_weight);
            }
        }
    }

    // Relation weight after the last occurrence: forward persistence,
    // extended only up to the last scene where either member still shows
    // alternative engagement. Beyond that point the relationship is
    // considered narratively ended, not merely silent.
    let after: Vec<f64> = (last_scene + 1..raw.scene_count())
        .map(|scene| raw.combined_engagement(pair, scene))
        .collect();
    if let Some(tail) = after.iter().rposition(|&t| t > 0.0) {
        let persistence =
            cumulative_sum(&Array1::from_vec(after)).mapv(|cum| weight_at(last_scene) - cum);
        for k in 0..=tail {
            add(smoothed, last_scene + 1 + k, persistence[k]);
        }
    }
}
