//! Graph construction from line snapshots.
//!
//! `create_graph` turns an ordered collection of lines into a weighted
//! directed graph over stations. The graph is built fresh per query and
//! never cached: it is cheap relative to search, and a fresh build means
//! no shared state between concurrent callers.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::domain::{Line, LineId, Station, StationId};

use super::edge::SegmentEdge;
use super::weighting::Weighting;

/// Error from graph construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    /// A segment produced a weight unusable for shortest-path search
    #[error("segment {up} -> {down} on line {line} has invalid weight {weight}")]
    InvalidWeight {
        line: LineId,
        up: StationId,
        down: StationId,
        weight: f64,
    },
}

/// A weighted directed graph over stations, ready for path search.
///
/// Vertices are stations keyed by id; edges wrap the segments they were
/// built from. Two segments over the same directed station pair stay as
/// distinct parallel edges, and search prefers the lighter one.
#[derive(Debug, Clone)]
pub struct RailGraph {
    graph: DiGraph<Arc<Station>, SegmentEdge>,
    nodes: HashMap<StationId, NodeIndex>,
    weighting: Weighting,
}

impl RailGraph {
    /// Returns the vertex for a station id, if the station is on any line.
    pub fn node(&self, id: StationId) -> Option<NodeIndex> {
        self.nodes.get(&id).copied()
    }

    /// Returns the station at a vertex.
    pub fn station(&self, node: NodeIndex) -> &Arc<Station> {
        &self.graph[node]
    }

    /// Returns the weighting the graph was built with.
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Returns the underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<Arc<Station>, SegmentEdge> {
        &self.graph
    }

    /// Returns the number of stations in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Build a weighted directed graph from a snapshot of lines.
///
/// Every segment of every line becomes one edge, pointed and weighted
/// per `weighting`; both endpoint stations are added as vertices, keyed
/// by id so that lines sharing a station share a vertex. The input is
/// only read; line order does not affect the result beyond vertex and
/// edge iteration order.
///
/// # Errors
///
/// Returns [`BuildError::InvalidWeight`] if a segment yields a negative
/// or non-finite weight. Snapshots arrive from external storage and may
/// bypass the domain constructors, so the weight is re-checked here
/// rather than trusted.
pub fn create_graph(lines: &[Line], weighting: Weighting) -> Result<RailGraph, BuildError> {
    let mut graph = DiGraph::new();
    let mut nodes: HashMap<StationId, NodeIndex> = HashMap::new();

    for line in lines {
        for segment in line.segments() {
            let weight = weighting.weight(segment);
            if !weight.is_finite() || weight < 0.0 {
                return Err(BuildError::InvalidWeight {
                    line: segment.line(),
                    up: segment.up().id(),
                    down: segment.down().id(),
                    weight,
                });
            }

            let (source, target) = weighting.endpoints(segment);
            let source = intern(&mut graph, &mut nodes, source);
            let target = intern(&mut graph, &mut nodes, target);
            graph.add_edge(source, target, SegmentEdge::new(Arc::clone(segment), weight));
        }
    }

    debug!(
        lines = lines.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        ?weighting,
        "built rail graph"
    );

    Ok(RailGraph {
        graph,
        nodes,
        weighting,
    })
}

/// Add a station vertex if its id is not present yet.
fn intern(
    graph: &mut DiGraph<Arc<Station>, SegmentEdge>,
    nodes: &mut HashMap<StationId, NodeIndex>,
    station: Arc<Station>,
) -> NodeIndex {
    *nodes
        .entry(station.id())
        .or_insert_with(|| graph.add_node(station))
}
