//! Homematch - matching service for property listings and buyer requirements
//!
//! This library provides the scoring engine that pairs listings with
//! requirements (and requirements with listings), plus the store, processor
//! and HTTP layers wrapped around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Anchor, Matcher, MatchResult, compute_margins, haversine_distance};
pub use models::{Listing, Requirement, Margins, Matched, WithDistance, NewListing, NewRequirement};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.search_radius_miles(), 10.0);
        assert!(haversine_distance(40.0, -73.0, 40.1, -73.0) > 6.0);
    }
}
