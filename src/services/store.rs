use crate::models::{Listing, Margins, NewListing, NewRequirement, Requirement, WithDistance};
use std::future::Future;
use thiserror::Error;

/// Errors that can occur when reading or writing match records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

/// Storage for listings and requirements, and the geo-bounded candidate fetch
///
/// Candidate queries return opposite-type records inside the margins' box and
/// within `radius_miles`, each annotated with its great-circle distance.
pub trait MatchStore: Send + Sync {
    fn insert_listing(
        &self,
        listing: &NewListing,
    ) -> impl Future<Output = Result<Listing, StoreError>> + Send;

    fn insert_requirement(
        &self,
        requirement: &NewRequirement,
    ) -> impl Future<Output = Result<Requirement, StoreError>> + Send;

    /// Requirements whose ranges overlap the listing's margins
    fn requirements_near(
        &self,
        listing: &Listing,
        margins: &Margins,
        radius_miles: f64,
    ) -> impl Future<Output = Result<Vec<WithDistance<Requirement>>, StoreError>> + Send;

    /// Listings whose values fall inside the requirement's margins
    fn listings_near(
        &self,
        requirement: &Requirement,
        margins: &Margins,
        radius_miles: f64,
    ) -> impl Future<Output = Result<Vec<WithDistance<Listing>>, StoreError>> + Send;

    fn health_check(&self) -> impl Future<Output = Result<bool, StoreError>> + Send;
}
