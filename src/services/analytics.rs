//! Centrality metrics over the aggregated speaker network.
//!
//! Collapses the per-scene multigraph into one undirected edge per
//! interacting pair and computes degree, betweenness, and closeness
//! centrality to surface structural protagonists, narrative hubs, and
//! bridging characters.

use graphrs::{algorithms::centrality, Edge, Graph, GraphSpecs, Node};
use std::collections::HashMap;

use crate::models::network::InteractionNetwork;
use crate::ConversoError;

/// Centrality scores and derived role for a single speaker.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SpeakerCentrality {
    pub speaker: String,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    /// Total interaction seconds across the whole corpus.
    pub total_seconds: f64,
    pub narrative_role: String,
}

/// Centrality metric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralityMetric {
    Degree,
    Betweenness,
    Closeness,
    All,
}

impl std::str::FromStr for CentralityMetric {
    type Err = ConversoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "degree" => Ok(Self::Degree),
            "betweenness" => Ok(Self::Betweenness),
            "closeness" => Ok(Self::Closeness),
            "all" => Ok(Self::All),
            other => Err(ConversoError::Validation(format!(
                "unknown centrality metric '{}' (expected degree, betweenness, closeness, or all)",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure functions
// ---------------------------------------------------------------------------

/// Assign a narrative role based on centrality scores.
pub(crate) fn assign_narrative_role(degree: f64, betweenness: f64, _closeness: f64) -> String {
    if degree == 0.0 {
        "isolated".to_string()
    } else if degree > 0.5 {
        "hub".to_string()
    } else if betweenness > 0.3 && degree < 0.5 {
        "bridge".to_string()
    } else if degree < 0.2 && betweenness < 0.1 {
        "peripheral".to_string()
    } else {
        "connected".to_string()
    }
}

// ---------------------------------------------------------------------------
// Centrality computation
// ---------------------------------------------------------------------------

/// Compute centrality metrics for every speaker in the network.
///
/// Results are sorted by the first requested metric, descending, and
/// truncated to `limit`.
pub fn compute_centrality(
    network: &InteractionNetwork,
    metrics: &[CentralityMetric],
    limit: usize,
) -> Result<Vec<SpeakerCentrality>, ConversoError> {
    let speakers: Vec<String> = network.speakers().map(str::to_string).collect();
    if speakers.is_empty() {
        return Ok(Vec::new());
    }

    if speakers.len() == 1 {
        return Ok(vec![SpeakerCentrality {
            speaker: speakers[0].clone(),
            degree: 0.0,
            betweenness: 0.0,
            closeness: 0.0,
            total_seconds: network.total_engagement(&speakers[0]),
            narrative_role: "isolated".to_string(),
        }]);
    }

    let graph = build_graph(network, &speakers)?;

    let should_compute_degree =
        metrics.contains(&CentralityMetric::Degree) || metrics.contains(&CentralityMetric::All);
    let should_compute_betweenness = metrics.contains(&CentralityMetric::Betweenness)
        || metrics.contains(&CentralityMetric::All);
    let should_compute_closeness = metrics.contains(&CentralityMetric::Closeness)
        || metrics.contains(&CentralityMetric::All);

    let degree_scores = if should_compute_degree {
        compute_degree_centrality(&graph, &speakers)
    } else {
        HashMap::new()
    };

    let betweenness_scores = if should_compute_betweenness {
        match centrality::betweenness::betweenness_centrality(&graph, false, true) {
            Ok(scores) => scores,
            Err(e) => {
                return Err(ConversoError::Graph(format!(
                    "betweenness centrality error: {:?}",
                    e
                )))
            }
        }
    } else {
        HashMap::new()
    };

    let closeness_scores = if should_compute_closeness {
        match centrality::closeness::closeness_centrality(&graph, false, true) {
            Ok(scores) => scores,
            Err(e) => {
                return Err(ConversoError::Graph(format!(
                    "closeness centrality error: {:?}",
                    e
                )))
            }
        }
    } else {
        HashMap::new()
    };

    let mut results: Vec<SpeakerCentrality> = speakers
        .iter()
        .map(|speaker| {
            let degree = degree_scores.get(speaker).copied().unwrap_or(0.0);
            let betweenness = betweenness_scores.get(speaker).copied().unwrap_or(0.0);
            let closeness = closeness_scores.get(speaker).copied().unwrap_or(0.0);
            SpeakerCentrality {
                speaker: speaker.clone(),
                degree,
                betweenness,
                closeness,
                total_seconds: network.total_engagement(speaker),
                narrative_role: assign_narrative_role(degree, betweenness, closeness),
            }
        })
        .collect();

    let primary_metric = metrics.first().copied().unwrap_or(CentralityMetric::Degree);
    let key = |r: &SpeakerCentrality| match primary_metric {
        CentralityMetric::Degree | CentralityMetric::All => r.degree,
        CentralityMetric::Betweenness => r.betweenness,
        CentralityMetric::Closeness => r.closeness,
    };
    results.sort_by(|a, b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);

    Ok(results)
}

/// Build an undirected graph with one edge per interacting pair.
fn build_graph(
    network: &InteractionNetwork,
    speakers: &[String],
) -> Result<Graph<String, ()>, ConversoError> {
    let mut graph = Graph::<String, ()>::new(GraphSpecs::undirected());

    for speaker in speakers {
        graph.add_node(Node::from_name(speaker.clone()));
    }

    for (pair, _) in network.pairs() {
        let edge = Edge::new(pair.first().to_string(), pair.second().to_string());
        if let Err(e) = graph.add_edge(edge) {
            return Err(ConversoError::Graph(format!("failed to add edge: {:?}", e)));
        }
    }

    Ok(graph)
}

/// Compute degree centrality by iterating the edge list once.
fn compute_degree_centrality(
    graph: &Graph<String, ()>,
    speakers: &[String],
) -> HashMap<String, f64> {
    let n = speakers.len();
    if n <= 1 {
        return speakers.iter().map(|s| (s.clone(), 0.0)).collect();
    }

    let mut degree: HashMap<&String, usize> = HashMap::new();
    for edge in graph.get_all_edges() {
        *degree.entry(&edge.u).or_default() += 1;
        *degree.entry(&edge.v).or_default() += 1;
    }

    let norm = (n - 1) as f64;
    speakers
        .iter()
        .map(|s| {
            let d = degree.get(s).copied().unwrap_or(0) as f64;
            (s.clone(), d / norm)
        })
        .collect()
}
