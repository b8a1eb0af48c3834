//! Station types.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Externally-assigned identifier of a station.
///
/// Ids are allocated by the storage layer that owns the network data;
/// the planner only ever compares them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stop in the rail network.
///
/// Identity is carried by the id alone: the same station is referenced
/// from every line that calls at it, and a renamed station is still the
/// same vertex. Equality and hashing therefore ignore the display name,
/// which makes `Station` safe to use as a graph vertex key.
///
/// # Examples
///
/// ```
/// use rail_router::domain::{Station, StationId};
///
/// let a = Station::new(StationId(1), "Ashford");
/// let renamed = Station::new(StationId(1), "Ashford International");
/// let other = Station::new(StationId(2), "Brentwood");
///
/// assert_eq!(a, renamed);
/// assert_ne!(a, other);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    id: StationId,
    name: String,
}

impl Station {
    /// Create a station with an externally-assigned id.
    pub fn new(id: StationId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the station id.
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
