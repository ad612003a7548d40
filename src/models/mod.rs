pub mod annotation;
pub mod network;
pub mod turn;

pub use annotation::{episode_label, Corpus, Episode, EpisodeData, SceneMarker, Season};
pub use network::{InteractionNetwork, PairKey, SmoothedEdge, SmoothedNetwork};
pub use turn::{
    flatten_speaker_turns, group_speaker_turns, SpeakerTurn, SpeechTurn, UNKNOWN_SPEAKER,
};
