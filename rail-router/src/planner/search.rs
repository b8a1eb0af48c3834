//! Shortest-path and ranked-alternatives search.
//!
//! `find_path` runs a single shortest-path query over the graph's
//! non-negative weights. `find_paths` ranks loopless alternatives with
//! Yen's algorithm, seeded by the shortest path. Results come back as
//! domain [`Route`] values whose segments are read straight off the
//! traversed edges.

use std::collections::HashSet;
use std::sync::Arc;

use petgraph::algo::astar;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::{EdgeFiltered, EdgeRef};
use tracing::{debug, trace};

use crate::domain::{Route, Station, StationId};
use crate::graph::{RailGraph, SegmentEdge};

use super::config::SearchConfig;

/// Error from path search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Source and target are the same station
    #[error("source and target are the same station: {0}")]
    SameStation(StationId),

    /// A requested station is not a vertex of the graph
    #[error("station {0} is not on any line in the network")]
    UnknownStation(StationId),

    /// The target cannot be reached from the source
    #[error("no route from station {origin} to station {target}")]
    PathNotFound {
        origin: StationId,
        target: StationId,
    },
}

/// A walk through the graph: the vertex sequence and the edges taken.
#[derive(Debug, Clone)]
struct GraphPath {
    nodes: Vec<NodeIndex>,
    edges: Vec<EdgeIndex>,
    cost: f64,
}

/// Path engine over a built rail graph.
///
/// Queries never mutate the graph or the lines it was built from; each
/// call runs to completion with its own private search state.
#[derive(Debug, Clone)]
pub struct Planner {
    config: SearchConfig,
}

impl Planner {
    /// Create a new planner.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Find the minimum-weight route between two stations.
    ///
    /// # Errors
    ///
    /// Returns `Err` if source and target are the same station, if either
    /// is not a vertex of the graph, or if the target is unreachable.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use rail_router::domain::{Line, LineId, Station, StationId};
    /// use rail_router::graph::{Weighting, create_graph};
    /// use rail_router::planner::{Planner, SearchConfig};
    ///
    /// let ashford = Arc::new(Station::new(StationId(1), "Ashford"));
    /// let brentwood = Arc::new(Station::new(StationId(2), "Brentwood"));
    ///
    /// let mut line = Line::new(LineId(1), "Eastern");
    /// line.add_segment(Arc::clone(&ashford), Arc::clone(&brentwood), 4.0, 6.0).unwrap();
    ///
    /// let graph = create_graph(&[line], Weighting::Distance).unwrap();
    /// let planner = Planner::new(SearchConfig::default());
    ///
    /// let route = planner.find_path(&graph, StationId(1), StationId(2)).unwrap();
    /// assert_eq!(route.total_distance(), 4.0);
    /// ```
    pub fn find_path(
        &self,
        graph: &RailGraph,
        source: StationId,
        target: StationId,
    ) -> Result<Route, SearchError> {
        let (from, to) = endpoints(graph, source, target)?;
        debug!(%source, %target, "shortest path search");

        let path = shortest_path(graph, from, to, &HashSet::new(), &HashSet::new())
            .ok_or(SearchError::PathNotFound { origin: source, target })?;

        Ok(assemble(graph, &path))
    }

    /// Find routes between two stations, sorted ascending by total
    /// weight.
    ///
    /// The first element always equals the [`Planner::find_path`] result;
    /// the alternatives are loopless and differ from each other in their
    /// station sequence. At most `max_routes` routes are returned.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Planner::find_path`].
    pub fn find_paths(
        &self,
        graph: &RailGraph,
        source: StationId,
        target: StationId,
    ) -> Result<Vec<Route>, SearchError> {
        let (from, to) = endpoints(graph, source, target)?;
        debug!(%source, %target, max_routes = self.config.max_routes, "ranked path search");

        let shortest = shortest_path(graph, from, to, &HashSet::new(), &HashSet::new())
            .ok_or(SearchError::PathNotFound { origin: source, target })?;
        let paths = k_shortest(graph, to, shortest, self.config.max_routes);

        Ok(paths.iter().map(|path| assemble(graph, path)).collect())
    }
}

/// Resolve the query endpoints to graph vertices, in search order.
fn endpoints(
    graph: &RailGraph,
    source: StationId,
    target: StationId,
) -> Result<(NodeIndex, NodeIndex), SearchError> {
    if source == target {
        return Err(SearchError::SameStation(source));
    }
    let source_node = graph
        .node(source)
        .ok_or(SearchError::UnknownStation(source))?;
    let target_node = graph
        .node(target)
        .ok_or(SearchError::UnknownStation(target))?;

    // A reversed weighting points every edge backwards, so the search runs
    // from the target and the route reads target-to-source.
    if graph.weighting().is_reversed() {
        Ok((target_node, source_node))
    } else {
        Ok((source_node, target_node))
    }
}

/// Minimum-weight walk between two vertices, ignoring banned vertices and
/// edges.
fn shortest_path(
    graph: &RailGraph,
    from: NodeIndex,
    to: NodeIndex,
    banned_nodes: &HashSet<NodeIndex>,
    banned_edges: &HashSet<EdgeIndex>,
) -> Option<GraphPath> {
    let inner = graph.graph();
    let filtered = EdgeFiltered::from_fn(inner, |edge| {
        !banned_edges.contains(&edge.id())
            && !banned_nodes.contains(&edge.source())
            && !banned_nodes.contains(&edge.target())
    });

    let (cost, nodes) = astar(
        &filtered,
        from,
        |node| node == to,
        |edge| edge.weight().weight(),
        |_| 0.0,
    )?;

    let edges = nodes
        .windows(2)
        .map(|pair| cheapest_edge(inner, pair[0], pair[1], banned_edges))
        .collect::<Option<Vec<_>>>()?;

    Some(GraphPath { nodes, edges, cost })
}

/// Cheapest allowed edge between two adjacent vertices of a found walk.
/// This is the same choice the search itself makes among parallel edges.
fn cheapest_edge(
    graph: &DiGraph<Arc<Station>, SegmentEdge>,
    a: NodeIndex,
    b: NodeIndex,
    banned_edges: &HashSet<EdgeIndex>,
) -> Option<EdgeIndex> {
    graph
        .edges_connecting(a, b)
        .filter(|edge| !banned_edges.contains(&edge.id()))
        .min_by(|x, y| x.weight().weight().total_cmp(&y.weight().weight()))
        .map(|edge| edge.id())
}

/// Yen's loopless k-shortest-paths, seeded with the shortest path.
///
/// Each round takes the latest accepted path, tries a deviation at every
/// station along it, and accepts the cheapest candidate found so far.
/// Candidates are compared by cost, then by vertex sequence, so the
/// ranking is deterministic for a given topology.
fn k_shortest(
    graph: &RailGraph,
    to: NodeIndex,
    shortest: GraphPath,
    max_routes: usize,
) -> Vec<GraphPath> {
    let inner = graph.graph();
    let mut accepted = vec![shortest];
    let mut candidates: Vec<GraphPath> = Vec::new();

    while accepted.len() < max_routes {
        // Safe: seeded with the shortest path
        let prev = accepted.last().unwrap().clone();

        for i in 0..prev.nodes.len() - 1 {
            let spur = prev.nodes[i];
            let root_nodes = &prev.nodes[..=i];
            let root_edges = &prev.edges[..i];
            let root_cost: f64 = root_edges.iter().map(|&edge| inner[edge].weight()).sum();

            // A deviation must leave every accepted route that shares this
            // root, so ban the hop each of them takes next (all parallel
            // edges of it: alternatives differ in their station sequence,
            // not merely in the segment ridden between the same stations).
            let mut banned_edges: HashSet<EdgeIndex> = HashSet::new();
            for path in &accepted {
                if path.nodes.len() > i + 1 && path.nodes[..=i] == *root_nodes {
                    banned_edges.extend(
                        inner
                            .edges_connecting(path.nodes[i], path.nodes[i + 1])
                            .map(|edge| edge.id()),
                    );
                }
            }

            // Keep spur paths loopless: the root before the spur station
            // must not be revisited.
            let banned_nodes: HashSet<NodeIndex> = root_nodes[..i].iter().copied().collect();

            let Some(tail) = shortest_path(graph, spur, to, &banned_nodes, &banned_edges) else {
                continue;
            };

            let mut nodes = root_nodes.to_vec();
            nodes.extend_from_slice(&tail.nodes[1..]);
            let mut edges = root_edges.to_vec();
            edges.extend_from_slice(&tail.edges);
            let candidate = GraphPath {
                nodes,
                edges,
                cost: root_cost + tail.cost,
            };

            let seen = accepted
                .iter()
                .chain(candidates.iter())
                .any(|path| path.nodes == candidate.nodes);
            if !seen {
                trace!(cost = candidate.cost, "ranked search candidate");
                candidates.push(candidate);
            }
        }

        if candidates.is_empty() {
            break;
        }
        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.nodes.cmp(&b.nodes)));
        accepted.push(candidates.remove(0));
    }

    accepted
}

/// Turn a graph walk back into a domain route.
fn assemble(graph: &RailGraph, path: &GraphPath) -> Route {
    let stations = path
        .nodes
        .iter()
        .map(|&node| Arc::clone(graph.station(node)))
        .collect();
    let segments = path
        .edges
        .iter()
        .map(|&edge| Arc::clone(graph.graph()[edge].segment()))
        .collect();

    // Safe: a search walk visits stations joined by the edges it took
    Route::new(stations, segments, path.cost).expect("search walk must form a connected route")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{Line, LineId};
    use crate::graph::{Weighting, create_graph};
    use proptest::prelude::*;

    /// A single line chaining stations 0..=n with the given measures.
    fn chain(measures: &[(f64, f64)]) -> Vec<Line> {
        let stations: Vec<_> = (0..=measures.len() as u64)
            .map(|id| Arc::new(Station::new(StationId(id), format!("station {id}"))))
            .collect();

        let mut line = Line::new(LineId(1), "Chain");
        for (i, &(distance, duration)) in measures.iter().enumerate() {
            line.add_segment(
                Arc::clone(&stations[i]),
                Arc::clone(&stations[i + 1]),
                distance,
                duration,
            )
            .unwrap();
        }
        vec![line]
    }

    fn measures() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.1f64..100.0, 0.1f64..100.0), 1..12)
    }

    proptest! {
        /// On a chain there is exactly one route and it walks every station.
        #[test]
        fn chain_walks_whole_line(measures in measures()) {
            let lines = chain(&measures);
            let last = measures.len() as u64;
            let planner = Planner::new(SearchConfig::default());

            let graph = create_graph(&lines, Weighting::Distance).unwrap();
            let route = planner.find_path(&graph, StationId(0), StationId(last)).unwrap();

            let visited: Vec<u64> = route.stations().iter().map(|s| s.id().0).collect();
            let expected: Vec<u64> = (0..=last).collect();
            prop_assert_eq!(visited, expected);

            let total: f64 = measures.iter().map(|&(d, _)| d).sum();
            prop_assert!((route.total_weight() - total).abs() < 1e-9);
            prop_assert!((route.total_distance() - total).abs() < 1e-9);

            let ranked = planner.find_paths(&graph, StationId(0), StationId(last)).unwrap();
            prop_assert_eq!(ranked.len(), 1);
        }

        /// A reversed weighting mirrors the forward station ordering.
        #[test]
        fn reversed_is_mirror(measures in measures()) {
            let lines = chain(&measures);
            let last = measures.len() as u64;
            let planner = Planner::new(SearchConfig::default());

            let forward = create_graph(&lines, Weighting::Distance).unwrap();
            let reversed = create_graph(&lines, Weighting::DistanceReversed).unwrap();

            let forward_route = planner.find_path(&forward, StationId(0), StationId(last)).unwrap();
            let reversed_route = planner.find_path(&reversed, StationId(0), StationId(last)).unwrap();

            let mut mirrored: Vec<u64> =
                forward_route.stations().iter().map(|s| s.id().0).collect();
            mirrored.reverse();
            let reversed_ids: Vec<u64> =
                reversed_route.stations().iter().map(|s| s.id().0).collect();
            prop_assert_eq!(reversed_ids, mirrored);
            prop_assert!(
                (reversed_route.total_weight() - forward_route.total_weight()).abs() < 1e-9
            );
        }
    }
}
