use crate::core::{Matcher, MatchResult};
use crate::models::{Listing, NewListing, NewRequirement, Requirement};
use crate::services::store::{MatchStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Errors that can occur while processing a listing or requirement
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Runs both matching pipelines against a store
///
/// Each pipeline validates the incoming record, persists it, fetches
/// opposite-type candidates inside its margins and ranks them.
pub struct Processor<S> {
    store: Arc<S>,
    matcher: Matcher,
}

impl<S: MatchStore> Processor<S> {
    pub fn new(store: Arc<S>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a new listing and find the requirements it matches
    pub async fn match_listing(&self, request: NewListing) -> Result<MatchResult<Requirement>, ProcessError> {
        request.validate().inspect_err(|e| {
            tracing::info!("Rejected listing: {}", e);
        })?;

        let listing = self.store.insert_listing(&request).await?;
        let margins = self.matcher.margins(&listing);

        tracing::debug!("Property {} margins: {:?}", listing.id, margins);

        let candidates = self
            .store
            .requirements_near(&listing, &margins, self.matcher.search_radius_miles())
            .await?;

        let result = self.matcher.find_matches(&listing, candidates, &margins);

        tracing::info!(
            "Property {} matched {} requirements (from {} candidates)",
            listing.id,
            result.matches.len(),
            result.total_candidates
        );

        Ok(result)
    }

    /// Store a new requirement and find the listings that match it
    pub async fn match_requirement(&self, request: NewRequirement) -> Result<MatchResult<Listing>, ProcessError> {
        request.validate().inspect_err(|e| {
            tracing::info!("Rejected requirement: {}", e);
        })?;

        let requirement = self.store.insert_requirement(&request).await?;
        let margins = self.matcher.margins(&requirement);

        tracing::debug!("Requirement {} margins: {:?}", requirement.id, margins);

        let candidates = self
            .store
            .listings_near(&requirement, &margins, self.matcher.search_radius_miles())
            .await?;

        let result = self.matcher.find_matches(&requirement, candidates, &margins);

        tracing::info!(
            "Requirement {} matched {} properties (from {} candidates)",
            requirement.id,
            result.matches.len(),
            result.total_candidates
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    fn processor() -> Processor<MemoryStore> {
        Processor::new(Arc::new(MemoryStore::new()), Matcher::new())
    }

    #[tokio::test]
    async fn test_invalid_listing_not_stored() {
        let processor = processor();
        let request = NewListing {
            latitude: 120.0,
            longitude: -73.0,
            price: 500_000.0,
            bedrooms: 3,
            bathrooms: 2,
        };

        let result = processor.match_listing(request).await;

        assert!(matches!(result, Err(ProcessError::Validation(_))));
        assert_eq!(processor.store().listing_count().await, 0);
    }

    #[tokio::test]
    async fn test_listing_matches_stored_requirement() {
        let processor = processor();
        let requirement = NewRequirement {
            latitude: 40.0,
            longitude: -73.0,
            min_budget: Some(450_000.0),
            max_budget: Some(550_000.0),
            min_bedrooms: Some(2),
            max_bedrooms: Some(4),
            min_bathrooms: Some(1),
            max_bathrooms: Some(3),
        };
        let first = processor.match_requirement(requirement).await.unwrap();
        assert!(first.matches.is_empty());

        let listing = NewListing {
            latitude: 40.0,
            longitude: -73.0,
            price: 500_000.0,
            bedrooms: 3,
            bathrooms: 2,
        };
        let result = processor.match_listing(listing).await.unwrap();

        assert_eq!(result.total_candidates, 1);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].match_score, 100.0);
    }
}
