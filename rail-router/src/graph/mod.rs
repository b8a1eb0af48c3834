//! Weighted directed graph construction over rail lines.
//!
//! A snapshot of lines plus a [`Weighting`] become a [`RailGraph`]: one
//! vertex per distinct station, one edge per segment, each edge wrapping
//! the segment it came from.

mod build;
mod edge;
mod weighting;

pub use build::{BuildError, RailGraph, create_graph};
pub use edge::SegmentEdge;
pub use weighting::Weighting;
