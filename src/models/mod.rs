// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Listing, Requirement, Bounds, Offer, Ask, WithDistance, Matched, Margins, Score};
pub use requests::{NewListing, NewRequirement};
pub use responses::{MatchesResponse, HealthResponse, ErrorResponse};
