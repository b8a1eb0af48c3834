//! Rail line type.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{DomainError, Segment, Station};

/// Externally-assigned identifier of a line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A named rail line: an ordered chain of segments.
///
/// Lines are owned by external storage; the planner reads a snapshot and
/// never mutates it. Segments can only be appended through
/// [`Line::add_segment`], which keeps the chain connected.
///
/// # Invariants
///
/// - each segment departs from the station the previous segment arrived at
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rail_router::domain::{Line, LineId, Station, StationId};
///
/// let ashford = Arc::new(Station::new(StationId(1), "Ashford"));
/// let brentwood = Arc::new(Station::new(StationId(2), "Brentwood"));
/// let croydon = Arc::new(Station::new(StationId(3), "Croydon"));
///
/// let mut line = Line::new(LineId(1), "Eastern");
/// line.add_segment(Arc::clone(&ashford), Arc::clone(&brentwood), 4.0, 6.0).unwrap();
/// line.add_segment(Arc::clone(&brentwood), croydon, 2.5, 4.0).unwrap();
///
/// // The chain must continue from Croydon, not from Ashford.
/// assert!(line.add_segment(ashford, brentwood, 1.0, 1.0).is_err());
/// assert_eq!(line.segments().len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    id: LineId,
    name: String,
    segments: Vec<Arc<Segment>>,
}

impl Line {
    /// Create an empty line.
    pub fn new(id: LineId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Append a segment to the end of the line.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the segment does not start where the line
    /// currently ends, or if a measure is zero, negative or non-finite.
    pub fn add_segment(
        &mut self,
        up: Arc<Station>,
        down: Arc<Station>,
        distance: f64,
        duration: f64,
    ) -> Result<(), DomainError> {
        if let Some(last) = self.segments.last() {
            if last.down().id() != up.id() {
                return Err(DomainError::BrokenChain {
                    expected: last.down().id(),
                    found: up.id(),
                });
            }
        }

        let segment = Segment::new(self.id, up, down, distance, duration)?;
        self.segments.push(Arc::new(segment));
        Ok(())
    }

    /// Returns the line id.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the segments in chain order.
    pub fn segments(&self) -> &[Arc<Segment>] {
        &self.segments
    }

    /// Returns true if the line has no segments yet.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} segments)", self.name, self.segments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;

    fn station(id: u64, name: &str) -> Arc<Station> {
        Arc::new(Station::new(StationId(id), name))
    }

    #[test]
    fn chain_of_segments() {
        let mut line = Line::new(LineId(1), "Eastern");
        line.add_segment(station(1, "Ashford"), station(2, "Brentwood"), 3.0, 3.0)
            .unwrap();
        line.add_segment(station(2, "Brentwood"), station(3, "Croydon"), 5.0, 2.0)
            .unwrap();

        assert_eq!(line.segments().len(), 2);
        assert_eq!(line.segments()[0].down().id(), StationId(2));
        assert_eq!(line.segments()[1].up().id(), StationId(2));
        assert!(line.segments().iter().all(|s| s.line() == LineId(1)));
    }

    #[test]
    fn broken_chain_rejected() {
        let mut line = Line::new(LineId(1), "Eastern");
        line.add_segment(station(1, "Ashford"), station(2, "Brentwood"), 3.0, 3.0)
            .unwrap();

        let result = line.add_segment(station(5, "Elsewhere"), station(6, "Nowhere"), 1.0, 1.0);

        assert!(matches!(
            result,
            Err(DomainError::BrokenChain {
                expected: StationId(2),
                found: StationId(5),
            })
        ));
        // The failed append must not have touched the line.
        assert_eq!(line.segments().len(), 1);
    }

    #[test]
    fn invalid_measure_rejected() {
        let mut line = Line::new(LineId(1), "Eastern");
        let result = line.add_segment(station(1, "Ashford"), station(2, "Brentwood"), -2.0, 3.0);

        assert!(matches!(result, Err(DomainError::InvalidMeasure { .. })));
        assert!(line.is_empty());
    }

    #[test]
    fn display() {
        let mut line = Line::new(LineId(1), "Eastern");
        line.add_segment(station(1, "Ashford"), station(2, "Brentwood"), 3.0, 3.0)
            .unwrap();

        assert_eq!(format!("{line}"), "Eastern (1 segments)");
    }

    #[test]
    fn deserializes_from_snapshot() {
        let line: Line = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Eastern",
                "segments": [{
                    "line": 1,
                    "up": {"id": 1, "name": "Ashford"},
                    "down": {"id": 2, "name": "Brentwood"},
                    "distance": 3.0,
                    "duration": 4.0
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(line.id(), LineId(1));
        assert_eq!(line.segments().len(), 1);
        assert_eq!(line.segments()[0].distance(), 3.0);
    }
}
