//! Rail segment type.
//!
//! A `Segment` is the atomic piece of track data: a directed connection
//! between two adjacent stations on one line. Segments use `Arc` sharing
//! so that graph edges and query results always point back at the same
//! allocation the line snapshot supplied.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DomainError, LineId, Station, StationId};

/// A directed connection between two adjacent stations on one line.
///
/// Carries the distance and travel duration of the hop and the id of the
/// owning line, so a segment appearing in a query result is always
/// traceable to real line data.
///
/// # Invariants
///
/// - `distance` and `duration` are strictly positive and finite
/// - directed from `up` to `down`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    line: LineId,
    up: Arc<Station>,
    down: Arc<Station>,
    distance: f64,
    duration: f64,
}

impl Segment {
    /// Construct a segment, validating its measures.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `distance` or `duration` is zero, negative or
    /// non-finite.
    pub fn new(
        line: LineId,
        up: Arc<Station>,
        down: Arc<Station>,
        distance: f64,
        duration: f64,
    ) -> Result<Self, DomainError> {
        check_measure("distance", distance, &up, &down)?;
        check_measure("duration", duration, &up, &down)?;

        Ok(Self {
            line,
            up,
            down,
            distance,
            duration,
        })
    }

    /// Returns the id of the line this segment belongs to.
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Returns the station this segment departs from.
    pub fn up(&self) -> &Arc<Station> {
        &self.up
    }

    /// Returns the station this segment arrives at.
    pub fn down(&self) -> &Arc<Station> {
        &self.down
    }

    /// Returns the segment distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns the segment travel duration.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns true when this segment connects `a` and `b`, in either
    /// direction.
    ///
    /// Route validation uses this rather than insisting on the up -> down
    /// orientation, because a reversed weighting walks segments against
    /// their stored direction.
    pub fn joins(&self, a: StationId, b: StationId) -> bool {
        (self.up.id() == a && self.down.id() == b) || (self.up.id() == b && self.down.id() == a)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.up.name(), self.down.name())
    }
}

fn check_measure(
    field: &'static str,
    value: f64,
    up: &Station,
    down: &Station,
) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidMeasure {
            up: up.id(),
            down: down.id(),
            field,
            value,
        })
    }
}
