//! Fixture builders for corpus-level tests.

use converso::models::{Corpus, Episode, EpisodeData, SceneMarker, Season, SpeechTurn};

pub fn turn(speaker: &str, start: f64, end: f64) -> SpeechTurn {
    SpeechTurn::new(speaker, start, end)
}

pub fn annotated(speaker: &str, start: f64, end: f64, interlocutors: &[&str]) -> SpeechTurn {
    let mut turn = SpeechTurn::new(speaker, start, end);
    turn.interlocutors = Some(interlocutors.iter().map(|s| s.to_string()).collect());
    turn
}

pub fn episode(scene_starts: &[f64], duration: f64, turns: Vec<SpeechTurn>) -> Episode {
    Episode {
        duration,
        data: EpisodeData {
            scenes: scene_starts.iter().map(|&start| SceneMarker { start }).collect(),
            speech_segments: turns,
        },
    }
}

pub fn corpus(episodes: Vec<Episode>) -> Corpus {
    Corpus {
        seasons: vec![Season { episodes }],
    }
}
