use crate::core::{geo, matcher::Anchor};
use crate::models::{Bounds, Margins};

/// Search radius used by both pipelines, in miles
pub const SEARCH_RADIUS_MILES: f64 = 10.0;

/// Share of the anchor price the price band is widened by
const PRICE_WIDENING: f64 = 0.25;

/// Rooms added/removed on each side of the anchor's room range
const ROOM_WIDENING: u16 = 2;

/// Derive the tolerance window for an anchor
///
/// The same margins parameterize the candidate fetch and normalize the
/// budget and room sub-scores, so every band here is kept non-degenerate.
pub fn compute_margins<A: Anchor + ?Sized>(anchor: &A, search_radius_miles: f64) -> Margins {
    let (lat, lon) = anchor.coordinates();
    let terms = anchor.search_terms();

    let (min_lat, max_lat) = geo::latitude_band(lat, search_radius_miles);
    let (min_lon, max_lon) = geo::longitude_band(lat, lon, search_radius_miles);
    let (min_price, max_price) = price_band(terms.budget);
    let (min_beds, max_beds) = room_band(terms.bedrooms);
    let (min_baths, max_baths) = room_band(terms.bathrooms);

    Margins {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
        min_price,
        max_price,
        min_beds,
        max_beds,
        min_baths,
        max_baths,
    }
}

/// Price band: 25% either side, floored at 1.0 / 1.25
pub fn price_band(budget: Bounds<f64>) -> (f64, f64) {
    let (low, high) = budget.span();
    (
        (low - PRICE_WIDENING * low).max(1.0),
        (high + PRICE_WIDENING * high).max(1.25),
    )
}

/// Room band: two rooms either side, floored at 1 / 3
///
/// Shared by bedrooms and bathrooms.
pub fn room_band(rooms: Bounds<u16>) -> (u16, u16) {
    let (low, high) = rooms.span();
    (
        low.saturating_sub(ROOM_WIDENING).max(1),
        high.saturating_add(ROOM_WIDENING).max(3),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_band_exact() {
        let (min, max) = price_band(Bounds::exact(500_000.0));
        assert_eq!(min, 375_000.0);
        assert_eq!(max, 625_000.0);
    }

    #[test]
    fn test_price_band_range() {
        let (min, max) = price_band(Bounds::Range { min: 400_000.0, max: 600_000.0 });
        assert_eq!(min, 300_000.0);
        assert_eq!(max, 750_000.0);
    }

    #[test]
    fn test_price_band_single_bound() {
        assert_eq!(price_band(Bounds::AtLeast(100.0)), (75.0, 125.0));
        assert_eq!(price_band(Bounds::AtMost(100.0)), (75.0, 125.0));
    }

    #[test]
    fn test_price_band_floors() {
        assert_eq!(price_band(Bounds::exact(1.0)), (1.0, 1.25));
        assert_eq!(price_band(Bounds::AtMost(0.0)), (1.0, 1.25));
    }

    #[test]
    fn test_room_band() {
        assert_eq!(room_band(Bounds::exact(3)), (1, 5));
        assert_eq!(room_band(Bounds::Range { min: 4, max: 6 }), (2, 8));
        assert_eq!(room_band(Bounds::AtLeast(5)), (3, 7));
    }

    #[test]
    fn test_room_band_floors_without_underflow() {
        assert_eq!(room_band(Bounds::exact(1)), (1, 3));
        assert_eq!(room_band(Bounds::exact(0)), (1, 3));
        assert_eq!(room_band(Bounds::exact(2)), (1, 4));
    }
}
