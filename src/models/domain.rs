use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A property listed for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub price: f64,
    pub bedrooms: u16,
    pub bathrooms: u16,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl Listing {
    /// What this listing offers a buyer
    pub fn offer(&self) -> Offer {
        Offer {
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
        }
    }
}

/// A buyer's requirement
///
/// Every ranged field may carry one or both bounds. A bound of `None` or zero
/// means "not given"; validation guarantees at least one bound per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "minBudget", default)]
    pub min_budget: Option<f64>,
    #[serde(rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    #[serde(rename = "minBedrooms", default)]
    pub min_bedrooms: Option<u16>,
    #[serde(rename = "maxBedrooms", default)]
    pub max_bedrooms: Option<u16>,
    #[serde(rename = "minBathrooms", default)]
    pub min_bathrooms: Option<u16>,
    #[serde(rename = "maxBathrooms", default)]
    pub max_bathrooms: Option<u16>,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl Requirement {
    /// What this requirement asks of a listing
    pub fn ask(&self) -> Ask {
        Ask {
            budget: Bounds::from_parts(self.min_budget, self.max_budget),
            bedrooms: Bounds::from_parts(self.min_bedrooms, self.max_bedrooms),
            bathrooms: Bounds::from_parts(self.min_bathrooms, self.max_bathrooms),
        }
    }
}

/// A ranged requirement field, resolved from its optional min/max parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds<T> {
    Range { min: T, max: T },
    AtLeast(T),
    AtMost(T),
}

impl<T> Bounds<T>
where
    T: Copy + Default + PartialOrd,
{
    /// Resolve optional parts; zero counts as absent.
    ///
    /// With neither part present this degrades to `AtMost(zero)`. Validation
    /// rejects such input before it gets here.
    pub fn from_parts(min: Option<T>, max: Option<T>) -> Self {
        let present = |v: Option<T>| v.filter(|v| *v > T::default());

        match (present(min), present(max)) {
            (Some(min), Some(max)) => Bounds::Range { min, max },
            (Some(min), None) => Bounds::AtLeast(min),
            (None, Some(max)) => Bounds::AtMost(max),
            (None, None) => Bounds::AtMost(max.unwrap_or_default()),
        }
    }

    /// A degenerate range holding a single value
    pub fn exact(value: T) -> Self {
        Bounds::Range {
            min: value,
            max: value,
        }
    }

    /// Lower and upper value, a lone bound standing in for both
    pub fn span(&self) -> (T, T) {
        match *self {
            Bounds::Range { min, max } => (min, max),
            Bounds::AtLeast(v) | Bounds::AtMost(v) => (v, v),
        }
    }
}

/// Price and room counts a listing offers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer {
    pub price: f64,
    pub bedrooms: u16,
    pub bathrooms: u16,
}

/// Budget and room ranges a requirement asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ask {
    pub budget: Bounds<f64>,
    pub bedrooms: Bounds<u16>,
    pub bathrooms: Bounds<u16>,
}

/// A candidate record annotated with its great-circle distance (miles) to the anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithDistance<T> {
    #[serde(flatten)]
    pub record: T,
    pub distance: f64,
}

impl<T> WithDistance<T> {
    pub fn new(record: T, distance: f64) -> Self {
        Self { record, distance }
    }
}

/// A candidate that passed the acceptance threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matched<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Search tolerance window around an anchor
///
/// Used both to bound the candidate fetch and to normalize the budget and
/// room sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub min_beds: u16,
    pub max_beds: u16,
    pub min_baths: u16,
    pub max_baths: u16,
}

/// Per-candidate score accumulator, index-aligned with the candidate slice
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Score {
    pub index: usize,
    pub distance: f64,
    pub distance_score: f64,
    pub budget_score: f64,
    pub bedroom_score: f64,
    pub bathroom_score: f64,
    pub total: f64,
}

impl Score {
    pub fn new(index: usize, distance: f64) -> Self {
        Self {
            index,
            distance,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_parts() {
        assert_eq!(
            Bounds::from_parts(Some(2u16), Some(4)),
            Bounds::Range { min: 2, max: 4 }
        );
        assert_eq!(Bounds::from_parts(Some(2u16), None), Bounds::AtLeast(2));
        assert_eq!(Bounds::from_parts(None, Some(4u16)), Bounds::AtMost(4));
    }

    #[test]
    fn test_zero_bound_counts_as_absent() {
        assert_eq!(Bounds::from_parts(Some(0u16), Some(3)), Bounds::AtMost(3));
        assert_eq!(Bounds::from_parts(Some(250_000.0), Some(0.0)), Bounds::AtLeast(250_000.0));
    }

    #[test]
    fn test_span() {
        assert_eq!(Bounds::Range { min: 1u16, max: 3 }.span(), (1, 3));
        assert_eq!(Bounds::AtLeast(2u16).span(), (2, 2));
        assert_eq!(Bounds::exact(5u16).span(), (5, 5));
    }

    #[test]
    fn test_score_starts_empty() {
        let score = Score::new(3, 1.5);
        assert_eq!(score.index, 3);
        assert_eq!(score.distance, 1.5);
        assert_eq!(score.total, 0.0);
    }
}
