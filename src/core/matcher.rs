use crate::core::{
    margins::{compute_margins, SEARCH_RADIUS_MILES},
    ranking::rank,
    scoring::score_candidates,
};
use crate::models::{Ask, Bounds, Listing, Margins, Matched, Offer, Requirement, Score, WithDistance};

/// The record a search starts from
///
/// Implemented by [`Listing`] (matched against requirements) and
/// [`Requirement`] (matched against listings). Scoring always compares the
/// requirement's ranges with the listing's values, so each anchor says how
/// it pairs up with its candidate type.
pub trait Anchor {
    type Candidate;

    /// Latitude and longitude in degrees
    fn coordinates(&self) -> (f64, f64);

    /// Ranges the margins are widened from
    fn search_terms(&self) -> Ask;

    /// Requirement terms and listing terms for one anchor/candidate pair
    fn pair(&self, candidate: &Self::Candidate) -> (Ask, Offer);
}

impl Anchor for Listing {
    type Candidate = Requirement;

    fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    fn search_terms(&self) -> Ask {
        Ask {
            budget: Bounds::exact(self.price),
            bedrooms: Bounds::exact(self.bedrooms),
            bathrooms: Bounds::exact(self.bathrooms),
        }
    }

    fn pair(&self, candidate: &Requirement) -> (Ask, Offer) {
        (candidate.ask(), self.offer())
    }
}

impl Anchor for Requirement {
    type Candidate = Listing;

    fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    fn search_terms(&self) -> Ask {
        self.ask()
    }

    fn pair(&self, candidate: &Listing) -> (Ask, Offer) {
        (self.ask(), candidate.offer())
    }
}

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult<C> {
    pub matches: Vec<Matched<C>>,
    pub total_candidates: usize,
}

/// Matching orchestrator
///
/// # Pipeline Stages
/// 1. Margins around the anchor (used by the caller's candidate fetch)
/// 2. Four sub-scores per candidate, computed concurrently
/// 3. Totals, threshold filter and ranking
///
/// Holds no mutable state; one instance can serve concurrent searches.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    search_radius_miles: f64,
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            search_radius_miles: SEARCH_RADIUS_MILES,
        }
    }

    pub fn search_radius_miles(&self) -> f64 {
        self.search_radius_miles
    }

    /// Margins for an anchor at the fixed search radius
    pub fn margins<A: Anchor>(&self, anchor: &A) -> Margins {
        compute_margins(anchor, self.search_radius_miles)
    }

    /// Score and rank candidates for an anchor
    ///
    /// # Arguments
    /// * `anchor` - The listing or requirement being matched
    /// * `candidates` - Opposite-type records with their distance to the anchor
    /// * `margins` - The anchor's margins, as used for the candidate fetch
    ///
    /// # Returns
    /// MatchResult with the accepted candidates, best first
    pub fn find_matches<A: Anchor>(
        &self,
        anchor: &A,
        candidates: Vec<WithDistance<A::Candidate>>,
        margins: &Margins,
    ) -> MatchResult<A::Candidate> {
        let total_candidates = candidates.len();

        let mut scores: Vec<Score> = candidates
            .iter()
            .enumerate()
            .map(|(index, c)| Score::new(index, c.distance))
            .collect();
        let terms: Vec<(Ask, Offer)> = candidates.iter().map(|c| anchor.pair(&c.record)).collect();

        score_candidates(&mut scores, &terms, margins);
        let ranked = rank(scores);

        let mut slots: Vec<Option<WithDistance<A::Candidate>>> = candidates.into_iter().map(Some).collect();
        let matches: Vec<Matched<A::Candidate>> = ranked
            .iter()
            .filter_map(|score| {
                slots[score.index].take().map(|candidate| Matched {
                    record: candidate.record,
                    distance_miles: candidate.distance,
                    match_score: score.total,
                })
            })
            .collect();

        tracing::debug!(
            "Accepted {} of {} candidates",
            matches.len(),
            total_candidates
        );

        MatchResult {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_listing(id: i64, price: f64, bedrooms: u16, bathrooms: u16) -> Listing {
        Listing {
            id,
            latitude: 40.0,
            longitude: -73.0,
            price,
            bedrooms,
            bathrooms,
            added_at: Utc::now(),
        }
    }

    fn create_requirement(id: i64) -> Requirement {
        Requirement {
            id,
            latitude: 40.0,
            longitude: -73.0,
            min_budget: Some(450_000.0),
            max_budget: Some(550_000.0),
            min_bedrooms: Some(2),
            max_bedrooms: Some(4),
            min_bathrooms: Some(1),
            max_bathrooms: Some(3),
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_listing_anchor_perfect_match() {
        let matcher = Matcher::new();
        let listing = create_listing(1, 500_000.0, 3, 2);
        let margins = matcher.margins(&listing);

        let result = matcher.find_matches(
            &listing,
            vec![WithDistance::new(create_requirement(7), 1.0)],
            &margins,
        );

        assert_eq!(result.total_candidates, 1);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].record.id, 7);
        assert_eq!(result.matches[0].match_score, 100.0);
    }

    #[test]
    fn test_requirement_anchor_ranks_listings() {
        let matcher = Matcher::new();
        let requirement = create_requirement(1);
        let margins = matcher.margins(&requirement);

        let candidates = vec![
            WithDistance::new(create_listing(10, 500_000.0, 3, 2), 5.0),
            WithDistance::new(create_listing(11, 500_000.0, 3, 2), 1.0),
            WithDistance::new(create_listing(12, 900_000.0, 9, 9), 1.0),
        ];

        let result = matcher.find_matches(&requirement, candidates, &margins);

        let ids: Vec<i64> = result.matches.iter().map(|m| m.record.id).collect();
        assert_eq!(ids, vec![11, 10]);
        assert_eq!(result.total_candidates, 3);
    }

    #[test]
    fn test_no_candidates() {
        let matcher = Matcher::default();
        let listing = create_listing(1, 500_000.0, 3, 2);
        let margins = matcher.margins(&listing);

        let result = matcher.find_matches(&listing, Vec::new(), &margins);
        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[test]
    fn test_listing_search_terms_are_exact() {
        let listing = create_listing(1, 500_000.0, 3, 2);
        let terms = listing.search_terms();
        assert_eq!(terms.budget.span(), (500_000.0, 500_000.0));
        assert_eq!(terms.bedrooms.span(), (3, 3));
        assert_eq!(terms.bathrooms.span(), (2, 2));
    }
}
