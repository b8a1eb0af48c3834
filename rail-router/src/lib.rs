//! Multi-line rail network path finding.
//!
//! Builds a weighted directed graph from a snapshot of rail lines and
//! answers "how do I get from station A to station B" under selectable
//! optimization criteria (shortest distance or shortest travel time),
//! either as the single best route or as a ranked list of alternatives.

pub mod domain;
pub mod graph;
pub mod planner;
