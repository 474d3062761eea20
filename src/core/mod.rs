// Core algorithm exports
pub mod filters;
pub mod geo;
pub mod margins;
pub mod matcher;
pub mod ranking;
pub mod scoring;

pub use filters::{listing_within_margins, requirement_within_margins};
pub use geo::{haversine_distance, is_within_margins, EARTH_RADIUS_MILES};
pub use margins::{compute_margins, SEARCH_RADIUS_MILES};
pub use matcher::{Anchor, Matcher, MatchResult};
pub use ranking::{rank, ACCEPTANCE_THRESHOLD};
pub use scoring::{score_candidates, distance_score, budget_score, room_score};
