use crate::core::{haversine_distance, listing_within_margins, requirement_within_margins};
use crate::models::{Listing, Margins, NewListing, NewRequirement, Requirement, WithDistance};
use crate::services::store::{MatchStore, StoreError};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory store
///
/// Applies the same box, radius and range filters as the SQL store, with
/// distances from the haversine formula. Intended for tests and local runs.
#[derive(Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<Listing>>,
    requirements: RwLock<Vec<Requirement>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub async fn listing_count(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn requirement_count(&self) -> usize {
        self.requirements.read().await.len()
    }
}

impl MatchStore for MemoryStore {
    async fn insert_listing(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        let stored = Listing {
            id: self.next_id(),
            latitude: listing.latitude,
            longitude: listing.longitude,
            price: listing.price,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            added_at: Utc::now(),
        };

        self.listings.write().await.push(stored.clone());
        tracing::trace!("Stored listing {}", stored.id);
        Ok(stored)
    }

    async fn insert_requirement(&self, requirement: &NewRequirement) -> Result<Requirement, StoreError> {
        let stored = Requirement {
            id: self.next_id(),
            latitude: requirement.latitude,
            longitude: requirement.longitude,
            min_budget: requirement.min_budget,
            max_budget: requirement.max_budget,
            min_bedrooms: requirement.min_bedrooms,
            max_bedrooms: requirement.max_bedrooms,
            min_bathrooms: requirement.min_bathrooms,
            max_bathrooms: requirement.max_bathrooms,
            added_at: Utc::now(),
        };

        self.requirements.write().await.push(stored.clone());
        tracing::trace!("Stored requirement {}", stored.id);
        Ok(stored)
    }

    async fn requirements_near(
        &self,
        listing: &Listing,
        margins: &Margins,
        radius_miles: f64,
    ) -> Result<Vec<WithDistance<Requirement>>, StoreError> {
        let requirements = self.requirements.read().await;

        Ok(requirements
            .iter()
            .filter(|r| requirement_within_margins(listing, r, margins))
            .map(|r| {
                let distance = haversine_distance(listing.latitude, listing.longitude, r.latitude, r.longitude);
                WithDistance::new(r.clone(), distance)
            })
            .filter(|c| c.distance <= radius_miles)
            .collect())
    }

    async fn listings_near(
        &self,
        requirement: &Requirement,
        margins: &Margins,
        radius_miles: f64,
    ) -> Result<Vec<WithDistance<Listing>>, StoreError> {
        let listings = self.listings.read().await;

        Ok(listings
            .iter()
            .filter(|l| listing_within_margins(l, margins))
            .map(|l| {
                let distance = haversine_distance(requirement.latitude, requirement.longitude, l.latitude, l.longitude);
                WithDistance::new(l.clone(), distance)
            })
            .filter(|c| c.distance <= radius_miles)
            .collect())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
