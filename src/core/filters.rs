use crate::core::geo::is_within_margins;
use crate::models::{Listing, Margins, Requirement};

/// Check if a requirement is a plausible candidate for a listing
///
/// Location must fall inside the margins' box. Each ranged field must either
/// contain the listing's value or have one of its bounds inside the
/// corresponding margin band.
#[inline]
pub fn requirement_within_margins(
    listing: &Listing,
    requirement: &Requirement,
    margins: &Margins,
) -> bool {
    if !is_within_margins(requirement.latitude, requirement.longitude, margins) {
        return false;
    }

    overlaps(
        listing.price,
        requirement.min_budget,
        requirement.max_budget,
        margins.min_price,
        margins.max_price,
    ) && overlaps(
        listing.bedrooms,
        requirement.min_bedrooms,
        requirement.max_bedrooms,
        margins.min_beds,
        margins.max_beds,
    ) && overlaps(
        listing.bathrooms,
        requirement.min_bathrooms,
        requirement.max_bathrooms,
        margins.min_baths,
        margins.max_baths,
    )
}

/// Check if a listing falls inside a requirement's margins
#[inline]
pub fn listing_within_margins(listing: &Listing, margins: &Margins) -> bool {
    is_within_margins(listing.latitude, listing.longitude, margins)
        && listing.price >= margins.min_price
        && listing.price <= margins.max_price
        && listing.bedrooms >= margins.min_beds
        && listing.bedrooms <= margins.max_beds
        && listing.bathrooms >= margins.min_baths
        && listing.bathrooms <= margins.max_baths
}

/// A missing bound never matches, like a NULL column in a BETWEEN
fn overlaps<T: PartialOrd + Copy>(value: T, min: Option<T>, max: Option<T>, low: T, high: T) -> bool {
    let within = |v: T| v >= low && v <= high;

    let contains_value = matches!((min, max), (Some(min), Some(max)) if value >= min && value <= max);
    contains_value || min.is_some_and(within) || max.is_some_and(within)
}
