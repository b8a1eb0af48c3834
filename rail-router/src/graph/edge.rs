//! Graph edge adapter.

use std::sync::Arc;

use crate::domain::Segment;

/// Wraps a segment for use as a graph edge.
///
/// The wrapped `Arc<Segment>` is how query results trace back to line
/// data: a route's segment sequence is read straight off the traversed
/// edges, so it can never contain a synthesized placeholder. The weight
/// is derived exactly once, at graph build time, and never recomputed
/// mid-search.
#[derive(Debug, Clone)]
pub struct SegmentEdge {
    segment: Arc<Segment>,
    weight: f64,
}

impl SegmentEdge {
    pub(crate) fn new(segment: Arc<Segment>, weight: f64) -> Self {
        Self { segment, weight }
    }

    /// Returns the segment this edge was built from.
    pub fn segment(&self) -> &Arc<Segment> {
        &self.segment
    }

    /// Returns the derived edge weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}
