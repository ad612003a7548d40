//! Aggregation of interlocutor-tagged speech turns into the raw
//! interaction network.

use tracing::debug;

use crate::models::network::InteractionNetwork;
use crate::models::turn::{SpeechTurn, UNKNOWN_SPEAKER};

/// Build the raw network of co-speaking time per scene.
///
/// `scene_turns` holds every scene of the corpus in global scene order,
/// with interlocutors resolved. Each turn contributes its full duration to
/// the edge between its speaker and each of its interlocutors, accumulated
/// per scene. Unknown speakers and self references contribute nothing.
pub fn build_interaction_network(scene_turns: &[Vec<SpeechTurn>]) -> InteractionNetwork {
    let mut network = InteractionNetwork::new(scene_turns.len());

    for (scene_idx, turns) in scene_turns.iter().enumerate() {
        for turn in turns {
            let Some(interlocutors) = &turn.interlocutors else {
                debug!(
                    speaker = %turn.speaker,
                    scene = scene_idx,
                    "turn without resolved interlocutors, skipping"
                );
                continue;
            };
            let duration = turn.duration();
            for interlocutor in interlocutors {
                if turn.speaker == UNKNOWN_SPEAKER || interlocutor == UNKNOWN_SPEAKER {
                    continue;
                }
                if *interlocutor == turn.speaker {
                    debug!(
                        speaker = %turn.speaker,
                        scene = scene_idx,
                        "self-addressed turn, skipping"
                    );
                    continue;
                }
                network.add_interaction(&turn.speaker, interlocutor, scene_idx, duration);
            }
        }
    }

    network
}
