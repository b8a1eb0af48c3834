//! Domain error types.
//!
//! These errors represent validation failures in the domain layer:
//! malformed segments, broken line chains and inconsistent routes.

use super::StationId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A segment measure is zero, negative or non-finite
    #[error("segment {up} -> {down}: {field} must be positive and finite, got {value}")]
    InvalidMeasure {
        up: StationId,
        down: StationId,
        field: &'static str,
        value: f64,
    },

    /// A segment does not continue where the line left off
    #[error("segment must start at station {expected} where the line ends, not at {found}")]
    BrokenChain {
        expected: StationId,
        found: StationId,
    },

    /// A route needs at least two stations
    #[error("route must visit at least two stations")]
    EmptyRoute,

    /// Station and segment counts don't line up
    #[error("route with {stations} stations cannot have {segments} segments")]
    SegmentCountMismatch { stations: usize, segments: usize },

    /// A segment does not join the stations it sits between
    #[error("segment {up} -> {down} does not join stations {a} and {b}")]
    RouteNotConnected {
        up: StationId,
        down: StationId,
        a: StationId,
        b: StationId,
    },
}
