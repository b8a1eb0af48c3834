//! Weighting strategies.
//!
//! A weighting decides two things about every segment: which numeric
//! attribute becomes the edge weight, and which way the edge points.
//! Adding a criterion is a one-variant addition here.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Segment, Station};

/// Selects the segment attribute used as edge weight, and the edge
/// direction.
///
/// `DistanceReversed` weighs segments like `Distance` but points every
/// edge the opposite way, so the resulting station ordering is the mirror
/// image of the forward ordering on the same topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weighting {
    /// Weight by segment distance, edges up -> down
    #[serde(rename = "BY_DISTANCE")]
    Distance,
    /// Weight by segment distance, edges down -> up
    #[serde(rename = "BY_DISTANCE_REVERSED")]
    DistanceReversed,
    /// Weight by segment travel duration, edges up -> down
    #[serde(rename = "BY_DURATION")]
    Duration,
}

impl Weighting {
    /// The numeric weight of `segment` under this criterion.
    pub fn weight(self, segment: &Segment) -> f64 {
        match self {
            Weighting::Distance | Weighting::DistanceReversed => segment.distance(),
            Weighting::Duration => segment.duration(),
        }
    }

    /// Source and target stations of the graph edge for `segment`.
    pub fn endpoints(self, segment: &Segment) -> (Arc<Station>, Arc<Station>) {
        match self {
            Weighting::Distance | Weighting::Duration => {
                (Arc::clone(segment.up()), Arc::clone(segment.down()))
            }
            Weighting::DistanceReversed => (Arc::clone(segment.down()), Arc::clone(segment.up())),
        }
    }

    /// Returns true when this criterion points edges against the stored
    /// segment direction.
    pub fn is_reversed(self) -> bool {
        matches!(self, Weighting::DistanceReversed)
    }
}
