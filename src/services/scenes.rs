//! Assignment of speech turns to the scenes they most overlap.

use crate::models::turn::SpeechTurn;

/// Distribute an episode's speech turns over its scenes.
///
/// Scene ends are derived from the next scene's start; the last scene ends
/// at the episode duration. A turn is assigned to the scene it overlaps for
/// more than half its own duration, via a single forward walk over both
/// sequences. Scenes without any turn are kept as empty slots so scene
/// indices stay aligned with the episode mapping built later. Turns lying
/// wholly past the last scene's end are dropped.
pub fn assign_turns_to_scenes(
    scene_starts: &[f64],
    turns: Vec<SpeechTurn>,
    episode_duration: f64,
) -> Vec<Vec<SpeechTurn>> {
    let mut scenes: Vec<Vec<SpeechTurn>> = Vec::with_capacity(scene_starts.len());
    if scene_starts.is_empty() {
        return scenes;
    }

    let mut scene_ends: Vec<f64> = scene_starts[1..].to_vec();
    scene_ends.push(episode_duration);

    let mut turns = turns.into_iter().peekable();
    for scene_end in scene_ends {
        let mut assigned = Vec::new();
        while turns
            .peek()
            .is_some_and(|turn| scene_end - turn.start > turn.duration() / 2.0)
        {
            if let Some(turn) = turns.next() {
                assigned.push(turn);
            }
        }
        scenes.push(assigned);
    }
    scenes
}
