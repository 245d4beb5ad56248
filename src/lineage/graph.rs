//! Bounded-depth, cycle-safe lineage traversal over a set of inferred
//! flows, for visualization (`GetAssetLineage`).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::flow::{InferredFlow, ResourceType};

/// A node in a traversed lineage subgraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageNode {
    pub arn: String,
    pub name: String,
    pub resource_type: ResourceType,
}

/// An edge in a traversed lineage subgraph, carrying the originating
/// flow's metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageEdge {
    pub source_arn: String,
    pub target_arn: String,
    pub flow_type: super::flow::FlowType,
    pub confidence: f64,
}

/// The result of [`LineageGraph::get_asset_lineage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineageSubgraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
}

/// An adjacency index over a set of [`InferredFlow`]s, keyed by ARN, used
/// for bounded-depth bidirectional traversal.
pub struct LineageGraph {
    /// Outgoing and incoming edges, both indexed by ARN so traversal can
    /// walk in either direction without a second pass over the flow list.
    outgoing: HashMap<String, Vec<InferredFlow>>,
    incoming: HashMap<String, Vec<InferredFlow>>,
}

impl LineageGraph {
    /// Builds a graph index from a flat list of flows.
    #[must_use]
    pub fn new(flows: Vec<InferredFlow>) -> Self {
        let mut outgoing: HashMap<String, Vec<InferredFlow>> = HashMap::new();
        let mut incoming: HashMap<String, Vec<InferredFlow>> = HashMap::new();
        for flow in flows {
            outgoing
                .entry(flow.source_arn.clone())
                .or_default()
                .push(flow.clone());
            incoming.entry(flow.target_arn.clone()).or_default().push(flow);
        }
        Self { outgoing, incoming }
    }

    /// Traverses both directions from `arn` up to `max_hops`, tracking a
    /// visited set so cycles terminate the walk rather than looping
    /// forever. Unknown assets (no flow names them) surface as a node
    /// with `name == arn` and `resource_type == Unknown`.
    #[must_use]
    pub fn get_asset_lineage(&self, arn: &str, max_hops: usize) -> LineageSubgraph {
        let mut visited: HashSet<String> = HashSet::new();
        let mut nodes: HashMap<String, LineageNode> = HashMap::new();
        let mut edges: Vec<LineageEdge> = Vec::new();

        nodes.insert(
            arn.to_string(),
            LineageNode {
                arn: arn.to_string(),
                name: arn.to_string(),
                resource_type: ResourceType::Unknown,
            },
        );
        visited.insert(arn.to_string());

        let mut frontier = vec![arn.to_string()];
        for _ in 0..max_hops {
            if frontier.is_empty() {
                break;
            }
            let mut next_frontier = Vec::new();
            for current in &frontier {
                for flow in self.outgoing.get(current).into_iter().flatten() {
                    visit_neighbor(&flow.target_arn, flow.target_type, &flow.target_name, &mut visited, &mut nodes, &mut next_frontier);
                    edges.push(edge_from(flow));
                }
                for flow in self.incoming.get(current).into_iter().flatten() {
                    visit_neighbor(&flow.source_arn, flow.source_type, &flow.source_name, &mut visited, &mut nodes, &mut next_frontier);
                    edges.push(edge_from(flow));
                }
            }
            frontier = next_frontier;
        }

        edges.sort_by(|a, b| (a.source_arn.as_str(), a.target_arn.as_str()).cmp(&(b.source_arn.as_str(), b.target_arn.as_str())));
        edges.dedup_by(|a, b| a.source_arn == b.source_arn && a.target_arn == b.target_arn && a.flow_type == b.flow_type);

        LineageSubgraph {
            nodes: nodes.into_values().collect(),
            edges,
        }
    }
}

fn visit_neighbor(
    neighbor_arn: &str,
    neighbor_type: ResourceType,
    neighbor_name: &str,
    visited: &mut HashSet<String>,
    nodes: &mut HashMap<String, LineageNode>,
    next_frontier: &mut Vec<String>,
) {
    nodes.entry(neighbor_arn.to_string()).or_insert_with(|| LineageNode {
        arn: neighbor_arn.to_string(),
        name: neighbor_name.to_string(),
        resource_type: neighbor_type,
    });
    if visited.insert(neighbor_arn.to_string()) {
        next_frontier.push(neighbor_arn.to_string());
    }
}

fn edge_from(flow: &InferredFlow) -> LineageEdge {
    LineageEdge {
        source_arn: flow.source_arn.clone(),
        target_arn: flow.target_arn.clone(),
        flow_type: flow.flow_type,
        confidence: flow.confidence,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────
