//! Search configuration.

/// Configuration parameters for path search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of routes a ranked search returns.
    /// The shortest route is always included, even with a cap of zero.
    pub max_routes: usize,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_routes: usize) -> Self {
        Self { max_routes }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_routes: 10 }
    }
}
