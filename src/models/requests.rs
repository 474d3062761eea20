use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Request to list a property and find requirements it satisfies
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_listing"))]
pub struct NewListing {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    pub price: f64,
    #[validate(range(min = 1))]
    pub bedrooms: u16,
    #[validate(range(min = 1))]
    pub bathrooms: u16,
}

/// Request to register a requirement and find listings that satisfy it
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_requirement"))]
pub struct NewRequirement {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_budget", rename = "minBudget", default)]
    pub min_budget: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_budget", rename = "maxBudget", default)]
    pub max_budget: Option<f64>,
    #[serde(alias = "min_bedrooms", rename = "minBedrooms", default)]
    pub min_bedrooms: Option<u16>,
    #[serde(alias = "max_bedrooms", rename = "maxBedrooms", default)]
    pub max_bedrooms: Option<u16>,
    #[serde(alias = "min_bathrooms", rename = "minBathrooms", default)]
    pub min_bathrooms: Option<u16>,
    #[serde(alias = "max_bathrooms", rename = "maxBathrooms", default)]
    pub max_bathrooms: Option<u16>,
}

fn validate_listing(listing: &NewListing) -> Result<(), ValidationError> {
    if listing.price > 0.0 {
        Ok(())
    } else {
        Err(invalid("price_not_positive", "price must be greater than zero"))
    }
}

fn validate_requirement(requirement: &NewRequirement) -> Result<(), ValidationError> {
    check_bounds("budget", requirement.min_budget, requirement.max_budget)?;
    check_bounds("bedrooms", requirement.min_bedrooms, requirement.max_bedrooms)?;
    check_bounds("bathrooms", requirement.min_bathrooms, requirement.max_bathrooms)
}

/// At least one positive bound, and min <= max when both are given
fn check_bounds<T>(field: &'static str, min: Option<T>, max: Option<T>) -> Result<(), ValidationError>
where
    T: Copy + Default + PartialOrd,
{
    let given = |v: Option<T>| v.filter(|v| *v > T::default());

    match (given(min), given(max)) {
        (None, None) => Err(invalid(field, "at least one of min or max must be given")),
        (Some(lo), Some(hi)) if lo > hi => Err(invalid(field, "min must not exceed max")),
        _ => Ok(()),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> NewListing {
        NewListing {
            latitude: 40.0,
            longitude: -73.0,
            price: 500_000.0,
            bedrooms: 3,
            bathrooms: 2,
        }
    }

    fn requirement() -> NewRequirement {
        NewRequirement {
            latitude: 40.0,
            longitude: -73.0,
            min_budget: Some(450_000.0),
            max_budget: Some(550_000.0),
            min_bedrooms: Some(2),
            max_bedrooms: Some(4),
            min_bathrooms: Some(1),
            max_bathrooms: Some(3),
        }
    }

    #[test]
    fn test_valid_listing() {
        assert!(listing().validate().is_ok());
    }

    #[test]
    fn test_listing_bad_coordinate() {
        let mut l = listing();
        l.latitude = 91.0;
        assert!(l.validate().is_err());

        let mut l = listing();
        l.longitude = -180.5;
        assert!(l.validate().is_err());
    }

    #[test]
    fn test_listing_non_positive_price() {
        let mut l = listing();
        l.price = 0.0;
        assert!(l.validate().is_err());
    }

    #[test]
    fn test_listing_zero_rooms() {
        let mut l = listing();
        l.bedrooms = 0;
        assert!(l.validate().is_err());
    }

    #[test]
    fn test_valid_requirement() {
        assert!(requirement().validate().is_ok());
    }

    #[test]
    fn test_requirement_single_bound_allowed() {
        let mut r = requirement();
        r.max_budget = None;
        r.min_bedrooms = None;
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_requirement_inverted_range() {
        let mut r = requirement();
        r.min_bedrooms = Some(5);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_requirement_missing_budget() {
        let mut r = requirement();
        r.min_budget = None;
        r.max_budget = Some(0.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_requirement_negative_budget() {
        let mut r = requirement();
        r.min_budget = Some(-1.0);
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_requirement_deserializes_camel_case() {
        let json = r#"{"latitude":40.0,"longitude":-73.0,"minBudget":300000.0,"maxBedrooms":3,"minBathrooms":1}"#;
        let r: NewRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(r.min_budget, Some(300_000.0));
        assert_eq!(r.max_budget, None);
        assert_eq!(r.max_bedrooms, Some(3));
        assert!(r.validate().is_ok());
    }
}
