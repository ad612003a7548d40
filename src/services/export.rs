//! Serialization of the smoothed network to graph exchange formats.
//!
//! GraphML mirrors the layout downstream network tools expect: node
//! elements plus one parallel edge element per scene, each carrying scene,
//! weight, and episode attributes. The JSON form is the same data as a
//! flat node list and edge list.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::network::SmoothedNetwork;
use crate::utils::paths::expand_tilde;
use crate::ConversoError;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    GraphMl,
    Json,
}

impl std::str::FromStr for GraphFormat {
    type Err = ConversoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graphml" => Ok(Self::GraphMl),
            "json" => Ok(Self::Json),
            other => Err(ConversoError::Validation(format!(
                "unknown graph format '{}' (expected graphml or json)",
                other
            ))),
        }
    }
}

/// Flat, serde-friendly view of the smoothed multigraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkExport {
    /// Speaker ids appearing in at least one edge.
    pub nodes: Vec<String>,
    /// One entry per parallel edge, keyed by scene.
    pub edges: Vec<EdgeExport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub source: String,
    pub target: String,
    /// Global scene index, the parallel-edge key.
    pub scene: usize,
    pub weight: f64,
    pub episode: String,
}

impl NetworkExport {
    pub fn from_network(network: &SmoothedNetwork) -> Self {
        let nodes = network
            .speakers()
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut edges = Vec::with_capacity(network.edge_count());
        for (pair, timeline) in network.pairs() {
            for (&scene, edge) in timeline {
                edges.push(EdgeExport {
                    source: pair.first().to_string(),
                    target: pair.second().to_string(),
                    scene,
                    weight: edge.weight,
                    episode: edge.episode.clone(),
                });
            }
        }
        Self { nodes, edges }
    }
}

/// Write the smoothed network to `path` in the requested format.
pub fn export_network(
    network: &SmoothedNetwork,
    path: &Path,
    format: GraphFormat,
) -> Result<(), ConversoError> {
    let path = expand_tilde(path);
    let export = NetworkExport::from_network(network);
    let content = match format {
        GraphFormat::GraphMl => to_graphml(&export),
        GraphFormat::Json => serde_json::to_string_pretty(&export)
            .map_err(|e| ConversoError::Export(e.to_string()))?,
    };
    fs::write(&path, content)
        .map_err(|e| ConversoError::Export(format!("cannot write {}: {}", path.display(), e)))?;
    info!(
        nodes = export.nodes.len(),
        edges = export.edges.len(),
        path = %path.display(),
        "network exported"
    );
    Ok(())
}

fn to_graphml(export: &NetworkExport) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    out.push_str(
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
    );
    out.push_str("  <key id=\"d0\" for=\"edge\" attr.name=\"scene\" attr.type=\"long\"/>\n");
    out.push_str("  <key id=\"d1\" for=\"edge\" attr.name=\"weight\" attr.type=\"double\"/>\n");
    out.push_str("  <key id=\"d2\" for=\"edge\" attr.name=\"episode\" attr.type=\"string\"/>\n");
    out.push_str("  <graph edgedefault=\"undirected\">\n");
    for node in &export.nodes {
        let _ = writeln!(out, "    <node id=\"{}\"/>", xml_escape(node));
    }
    for (id, edge) in export.edges.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">",
            id,
            xml_escape(&edge.source),
            xml_escape(&edge.target)
        );
        let _ = writeln!(out, "      <data key=\"d0\">{}</data>", edge.scene);
        let _ = writeln!(out, "      <data key=\"d1\">{}</data>", edge.weight);
        let _ = writeln!(
            out,
            "      <data key=\"d2\">{}</data>",
            xml_escape(&edge.episode)
        );
        out.push_str("    </edge>\n");
    }
    out.push_str("  </graph>\n");
    out.push_str("</graphml>\n");
    out
}

/// Escape the five XML special characters in attribute and text content.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::network::{PairKey, SmoothedEdge};

    fn sample_network() -> SmoothedNetwork {
        let mut network = SmoothedNetwork::new();
        network.add_edge(
            PairKey::new("alice", "bob"),
            0,
            SmoothedEdge {
                weight: 0.52,
                episode: "S01E01".to_string(),
            },
        );
        network.add_edge(
            PairKey::new("alice", "bob"),
            1,
            SmoothedEdge {
                weight: 0.5,
                episode: "S01E02".to_string(),
            },
        );
        network
    }

    #[test]
    fn test_export_view_flattens_edges() {
        let export = NetworkExport::from_network(&sample_network());
        assert_eq!(export.nodes, vec!["alice", "bob"]);
        assert_eq!(export.edges.len(), 2);
        assert_eq!(export.edges[0].scene, 0);
        assert_eq!(export.edges[1].episode, "S01E02");
    }

    #[test]
    fn test_graphml_contains_parallel_edges() {
        let graphml = to_graphml(&NetworkExport::from_network(&sample_network()));
        assert!(graphml.contains("<node id=\"alice\"/>"));
        assert!(graphml.contains("<node id=\"bob\"/>"));
        assert_eq!(graphml.matches("source=\"alice\" target=\"bob\"").count(), 2);
        assert!(graphml.contains("<data key=\"d1\">0.52</data>"));
        assert!(graphml.contains("<data key=\"d2\">S01E02</data>"));
    }

    #[test]
    fn test_graphml_escapes_speaker_names() {
        let mut network = SmoothedNetwork::new();
        network.add_edge(
            PairKey::new("m&m's", "bob"),
            0,
            SmoothedEdge {
                weight: 0.5,
                episode: "S01E01".to_string(),
            },
        );
        let graphml = to_graphml(&NetworkExport::from_network(&network));
        assert!(graphml.contains("m&amp;m&apos;s"));
        assert!(!graphml.contains("m&m"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("graphml".parse::<GraphFormat>().unwrap(), GraphFormat::GraphMl);
        assert_eq!("JSON".parse::<GraphFormat>().unwrap(), GraphFormat::Json);
        assert!("gexf".parse::<GraphFormat>().is_err());
    }
}
