//! Route type.
//!
//! A `Route` is the answer to a path query: the stations visited in
//! order, plus the segments traversed between them. The segments are
//! shared references into the line snapshot the query ran against, so a
//! route never contains synthesized or placeholder track data.

use std::sync::Arc;

use serde::Serialize;

use super::{DomainError, LineId, Segment, Station};

/// A complete route from a source station to a target station.
///
/// # Invariants
///
/// - at least two stations
/// - exactly one segment per adjacent station pair
/// - each segment joins the pair it sits between (in either direction,
///   because a reversed weighting walks segments backwards)
///
/// Routes are immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    stations: Vec<Arc<Station>>,
    segments: Vec<Arc<Segment>>,
    total_weight: f64,
}

impl Route {
    /// Construct a route, validating that the segments actually connect
    /// the station sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are fewer than two stations, if the segment
    /// count is not one less than the station count, or if a segment does
    /// not join the stations on either side of it.
    pub fn new(
        stations: Vec<Arc<Station>>,
        segments: Vec<Arc<Segment>>,
        total_weight: f64,
    ) -> Result<Self, DomainError> {
        if stations.len() < 2 {
            return Err(DomainError::EmptyRoute);
        }
        if segments.len() + 1 != stations.len() {
            return Err(DomainError::SegmentCountMismatch {
                stations: stations.len(),
                segments: segments.len(),
            });
        }
        for (i, segment) in segments.iter().enumerate() {
            let a = stations[i].id();
            let b = stations[i + 1].id();
            if !segment.joins(a, b) {
                return Err(DomainError::RouteNotConnected {
                    up: segment.up().id(),
                    down: segment.down().id(),
                    a,
                    b,
                });
            }
        }

        Ok(Self {
            stations,
            segments,
            total_weight,
        })
    }

    /// Returns the stations visited, in order.
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    /// Returns the segments traversed, in order.
    pub fn segments(&self) -> &[Arc<Segment>] {
        &self.segments
    }

    /// Returns the first station of the route.
    pub fn origin(&self) -> &Station {
        // Safe: validated to hold at least two stations
        self.stations.first().unwrap()
    }

    /// Returns the last station of the route.
    pub fn destination(&self) -> &Station {
        // Safe: validated to hold at least two stations
        self.stations.last().unwrap()
    }

    /// Returns the total weight of the route under the criterion the
    /// query was run with.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Returns the sum of segment distances.
    pub fn total_distance(&self) -> f64 {
        self.segments.iter().map(|s| s.distance()).sum()
    }

    /// Returns the sum of segment travel durations.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration()).sum()
    }

    /// Returns the ids of the lines the route travels over, deduplicated,
    /// in first-crossed order.
    pub fn lines(&self) -> Vec<LineId> {
        let mut lines = Vec::new();
        for segment in &self.segments {
            if !lines.contains(&segment.line()) {
                lines.push(segment.line());
            }
        }
        lines
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::StationId;
    use proptest::prelude::*;

    fn station(id: u64) -> Arc<Station> {
        Arc::new(Station::new(StationId(id), format!("station {id}")))
    }

    /// Strategy for a connected chain of (distance, duration) measures.
    fn measures() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.1f64..1000.0, 0.1f64..1000.0), 1..20)
    }

    proptest! {
        /// Totals are the exact fold over the segment sequence.
        #[test]
        fn totals_are_exact_sums(measures in measures()) {
            let stations: Vec<_> = (0..=measures.len() as u64).map(station).collect();
            let segments: Vec<_> = measures
                .iter()
                .enumerate()
                .map(|(i, &(d, t))| {
                    Arc::new(
                        Segment::new(
                            LineId(1),
                            Arc::clone(&stations[i]),
                            Arc::clone(&stations[i + 1]),
                            d,
                            t,
                        )
                        .unwrap(),
                    )
                })
                .collect();

            let route = Route::new(stations, segments, 0.0).unwrap();

            let expected_distance: f64 = measures.iter().map(|&(d, _)| d).sum();
            let expected_duration: f64 = measures.iter().map(|&(_, t)| t).sum();
            prop_assert_eq!(route.total_distance(), expected_distance);
            prop_assert_eq!(route.total_duration(), expected_duration);
        }

        /// A chain of any length validates and keeps its endpoints.
        #[test]
        fn chain_routes_validate(measures in measures()) {
            let last = measures.len() as u64;
            let stations: Vec<_> = (0..=last).map(station).collect();
            let segments: Vec<_> = measures
                .iter()
                .enumerate()
                .map(|(i, &(d, t))| {
                    Arc::new(
                        Segment::new(
                            LineId(1),
                            Arc::clone(&stations[i]),
                            Arc::clone(&stations[i + 1]),
                            d,
                            t,
                        )
                        .unwrap(),
                    )
                })
                .collect();

            let route = Route::new(stations, segments, 0.0).unwrap();

            prop_assert_eq!(route.origin().id(), StationId(0));
            prop_assert_eq!(route.destination().id(), StationId(last));
            prop_assert_eq!(route.segments().len(), route.stations().len() - 1);
        }
    }
}
