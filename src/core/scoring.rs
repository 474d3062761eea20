use crate::models::{Ask, Bounds, Margins, Offer, Score};

/// Candidates this close score the full distance points
pub const BASE_DISTANCE_MILES: f64 = 2.0;

/// Distance at which the distance score reaches zero
pub const MAX_DISTANCE_MILES: f64 = 10.0;

pub const DISTANCE_POINTS: f64 = 30.0;
pub const BUDGET_POINTS: f64 = 30.0;
pub const ROOM_POINTS: f64 = 20.0;

/// Fill in the four sub-scores of every candidate
///
/// The four scorers run concurrently, each producing one column indexed like
/// `scores`. Nothing is written back until all four have finished, so a
/// partially scored candidate is never observable.
///
/// # Arguments
/// * `scores` - One entry per candidate, carrying index and distance
/// * `terms` - The requirement/listing terms of each candidate pairing
/// * `margins` - The anchor's margins, used to normalize out-of-range values
pub fn score_candidates(scores: &mut [Score], terms: &[(Ask, Offer)], margins: &Margins) {
    debug_assert_eq!(scores.len(), terms.len());

    let snapshot: &[Score] = scores;
    let ((distance, budget), (bedroom, bathroom)) = rayon::join(
        || {
            rayon::join(
                || distance_column(snapshot),
                || budget_column(terms, margins),
            )
        },
        || {
            rayon::join(
                || bedroom_column(terms, margins),
                || bathroom_column(terms, margins),
            )
        },
    );

    let columns = distance.into_iter().zip(budget).zip(bedroom).zip(bathroom);
    for (score, (((distance, budget), bedroom), bathroom)) in scores.iter_mut().zip(columns) {
        score.distance_score = distance;
        score.budget_score = budget;
        score.bedroom_score = bedroom;
        score.bathroom_score = bathroom;
    }
}

fn distance_column(scores: &[Score]) -> Vec<f64> {
    scores.iter().map(|s| distance_score(s.distance)).collect()
}

fn budget_column(terms: &[(Ask, Offer)], margins: &Margins) -> Vec<f64> {
    terms
        .iter()
        .map(|(ask, offer)| budget_score(ask.budget, offer.price, margins.min_price, margins.max_price))
        .collect()
}

fn bedroom_column(terms: &[(Ask, Offer)], margins: &Margins) -> Vec<f64> {
    terms
        .iter()
        .map(|(ask, offer)| room_score(ask.bedrooms, offer.bedrooms, margins.min_beds, margins.max_beds))
        .collect()
}

fn bathroom_column(terms: &[(Ask, Offer)], margins: &Margins) -> Vec<f64> {
    terms
        .iter()
        .map(|(ask, offer)| room_score(ask.bathrooms, offer.bathrooms, margins.min_baths, margins.max_baths))
        .collect()
}

/// Distance score (max 30)
///
/// Full points up to the base distance, then linear down to zero at the max
/// distance. Not clamped: candidates past the max distance score negative.
#[inline]
pub fn distance_score(distance_miles: f64) -> f64 {
    if distance_miles <= BASE_DISTANCE_MILES {
        return DISTANCE_POINTS;
    }

    ((MAX_DISTANCE_MILES - distance_miles) / (MAX_DISTANCE_MILES - BASE_DISTANCE_MILES)) * DISTANCE_POINTS
}

/// Budget score (max 30)
///
/// A price inside the budget earns full points. Outside it, the weight falls
/// linearly towards the margin edge. A lone budget bound is widened into a
/// ±10% band first.
#[inline]
pub fn budget_score(budget: Bounds<f64>, price: f64, min_price: f64, max_price: f64) -> f64 {
    let (min_budget, max_budget) = match budget {
        Bounds::Range { min, max } => (min, max),
        Bounds::AtLeast(v) | Bounds::AtMost(v) => ((v - 0.10 * v).max(1.0), (v + 0.10 * v).max(1.1)),
    };

    let weight = if price >= min_budget && price <= max_budget {
        1.0
    } else if price < min_budget {
        ratio(price - min_price, min_budget - min_price, "budget")
    } else {
        ratio(max_price - price, max_price - max_budget, "budget")
    };

    weight * BUDGET_POINTS
}

/// Room score (max 20), shared by bedrooms and bathrooms
///
/// A lone bound stands in for both ends of the wanted range.
#[inline]
pub fn room_score(rooms: Bounds<u16>, count: u16, min_rooms: u16, max_rooms: u16) -> f64 {
    let (wanted_min, wanted_max) = rooms.span();

    let weight = if count >= wanted_min && count <= wanted_max {
        1.0
    } else if count < wanted_min {
        let below = i32::from(count) - i32::from(wanted_min);
        let width = (i32::from(wanted_min) - i32::from(min_rooms)).max(1);
        f64::from(below) / f64::from(width)
    } else {
        let headroom = i32::from(max_rooms) - i32::from(count);
        let width = i32::from(max_rooms) - i32::from(wanted_max);
        ratio(f64::from(headroom), f64::from(width), "rooms")
    };

    weight * ROOM_POINTS
}

/// Normalized weight; a collapsed band yields zero instead of inf/NaN
#[inline]
fn ratio(numerator: f64, width: f64, dimension: &str) -> f64 {
    if width <= 0.0 {
        tracing::warn!("Degenerate {} margin (width {}), scoring as zero", dimension, width);
        return 0.0;
    }
    numerator / width
}
