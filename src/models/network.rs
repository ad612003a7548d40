//! Interaction networks over speakers, keyed by scene.
//!
//! Both networks are undirected multigraphs with one parallel edge per
//! scene. Rather than a general graph structure, each pair's data is kept
//! as a sorted scene-to-weight timeline, and per-speaker engagement totals
//! are kept as dense per-scene arrays so the smoother's cumulative scans
//! are plain array walks.

use std::collections::BTreeMap;

use serde::Serialize;

/// Canonical unordered speaker pair; the two names are kept in
/// lexicographic order so `(a, b)` and `(b, a)` collapse to one key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.first, self.second)
    }
}

/// Raw network of co-speaking time: per pair, seconds of mutual
/// interlocution accumulated per scene.
#[derive(Debug, Clone)]
pub struct InteractionNetwork {
    scene_count: usize,
    pairs: BTreeMap<PairKey, BTreeMap<usize, f64>>,
    /// Per speaker, total interaction seconds with anyone, per scene.
    engagement: BTreeMap<String, Vec<f64>>,
}

impl InteractionNetwork {
    pub fn new(scene_count: usize) -> Self {
        Self {
            scene_count,
            pairs: BTreeMap::new(),
            engagement: BTreeMap::new(),
        }
    }

    /// Total number of scene slots across the corpus, including empty ones.
    pub fn scene_count(&self) -> usize {
        self.scene_count
    }

    /// Record `seconds` of interaction between `a` and `b` in `scene`.
    pub fn add_interaction(&mut self, a: &str, b: &str, scene: usize, seconds: f64) {
        debug_assert!(scene < self.scene_count, "scene index out of range");
        let n = self.scene_count;
        *self
            .pairs
            .entry(PairKey::new(a, b))
            .or_default()
            .entry(scene)
            .or_insert(0.0) += seconds;
        for speaker in [a, b] {
            self.engagement
                .entry(speaker.to_string())
                .or_insert_with(|| vec![0.0; n])[scene] += seconds;
        }
    }

    pub fn speakers(&self) -> impl Iterator<Item = &str> {
        self.engagement.keys().map(String::as_str)
    }

    pub fn speaker_count(&self) -> usize {
        self.engagement.len()
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Iterate interacting pairs with their scene-to-seconds timelines,
    /// in deterministic pair order; scene keys iterate sorted.
    pub fn pairs(&self) -> impl Iterator<Item = (&PairKey, &BTreeMap<usize, f64>)> {
        self.pairs.iter()
    }

    pub fn pair_timeline(&self, a: &str, b: &str) -> Option<&BTreeMap<usize, f64>> {
        self.pairs.get(&PairKey::new(a, b))
    }

    /// Seconds `speaker` spent interacting with anyone during `scene`.
    pub fn engagement(&self, speaker: &str, scene: usize) -> f64 {
        self.engagement
            .get(speaker)
            .and_then(|per_scene| per_scene.get(scene))
            .copied()
            .unwrap_or(0.0)
    }

    /// Combined engagement of both members of `pair` during `scene`; the
    /// smoother's alternative-engagement signal.
    pub fn combined_engagement(&self, pair: &PairKey, scene: usize) -> f64 {
        self.engagement(&pair.first, scene) + self.engagement(&pair.second, scene)
    }

    /// Total interaction seconds of `speaker` across all scenes.
    pub fn total_engagement(&self, speaker: &str) -> f64 {
        self.engagement
            .get(speaker)
            .map(|per_scene| per_scene.iter().sum())
            .unwrap_or(0.0)
    }
}

/// One smoothed edge: bounded strength plus the episode the scene is in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedEdge {
    pub weight: f64,
    pub episode: String,
}

/// Smoothed network: per pair, a contiguous scene-to-strength timeline
/// spanning the pair's interaction horizon.
#[derive(Debug, Clone, Default)]
pub struct SmoothedNetwork {
    pairs: BTreeMap<PairKey, BTreeMap<usize, SmoothedEdge>>,
}

impl SmoothedNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, pair: PairKey, scene: usize, edge: SmoothedEdge) {
        self.pairs.entry(pair).or_default().insert(scene, edge);
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&PairKey, &BTreeMap<usize, SmoothedEdge>)> {
        self.pairs.iter()
    }

    pub fn pair_timeline(&self, a: &str, b: &str) -> Option<&BTreeMap<usize, SmoothedEdge>> {
        self.pairs.get(&PairKey::new(a, b))
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Speakers appearing in at least one edge, sorted.
    pub fn speakers(&self) -> Vec<&str> {
        let mut speakers: Vec<&str> = self
            .pairs
            .keys()
            .flat_map(|pair| [pair.first(), pair.second()])
            .collect();
        speakers.sort_unstable();
        speakers.dedup();
        speakers
    }

    pub fn edge_count(&self) -> usize {
        self.pairs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
