//! Annotation corpus schema and loading.
//!
//! The input is a single JSON file listing seasons, episodes, scene start
//! times, and timestamped speech segments. Unknown fields are ignored so
//! richer annotation files load as-is.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::turn::SpeechTurn;
use crate::utils::paths::expand_tilde;
use crate::ConversoError;

/// A full annotated corpus: every season of a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub episodes: Vec<Episode>,
}

/// One annotated episode: total duration plus its scene and speech data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Episode duration in seconds; bounds the last scene.
    pub duration: f64,
    pub data: EpisodeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeData {
    /// Scene boundaries, given by start time only; each scene ends where
    /// the next begins and the last ends at the episode duration.
    pub scenes: Vec<SceneMarker>,
    /// Speech turns in temporal order.
    pub speech_segments: Vec<SpeechTurn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneMarker {
    pub start: f64,
}

impl Corpus {
    /// Load a corpus from a JSON annotation file. A leading `~` in the
    /// path expands to the user's home directory.
    pub fn from_path(path: &Path) -> Result<Self, ConversoError> {
        let path = expand_tilde(path);
        let raw = fs::read_to_string(&path).map_err(|e| {
            ConversoError::Annotation(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Total number of episodes across all seasons.
    pub fn episode_count(&self) -> usize {
        self.seasons.iter().map(|s| s.episodes.len()).sum()
    }
}

/// Episode label in `S01E03` form, from 0-based season and episode ordinals.
pub fn episode_label(season: usize, episode: usize) -> String {
    format!("S{:02}E{:02}", season + 1, episode + 1)
}
