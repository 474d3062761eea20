use crate::models::Score;
use std::cmp::Ordering;

/// Candidates scoring below this total are never returned
pub const ACCEPTANCE_THRESHOLD: f64 = 40.0;

/// Total every score, order them, and keep the accepted ones
pub fn rank(mut scores: Vec<Score>) -> Vec<Score> {
    for score in scores.iter_mut() {
        score.total = total_score(score);
    }

    // Stable sort: candidates equal on every key keep their input order
    scores.sort_by(compare_scores);
    scores.retain(|s| s.total >= ACCEPTANCE_THRESHOLD);
    scores
}

#[inline]
pub fn total_score(score: &Score) -> f64 {
    score.distance_score + score.budget_score + score.bedroom_score + score.bathroom_score
}

/// Ranking order: total desc, then distance asc, then budget, bedroom and
/// bathroom sub-scores desc
pub fn compare_scores(a: &Score, b: &Score) -> Ordering {
    b.total
        .total_cmp(&a.total)
        .then_with(|| a.distance.total_cmp(&b.distance))
        .then_with(|| b.budget_score.total_cmp(&a.budget_score))
        .then_with(|| b.bedroom_score.total_cmp(&a.bedroom_score))
        .then_with(|| b.bathroom_score.total_cmp(&a.bathroom_score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(index: usize, distance: f64, parts: [f64; 4]) -> Score {
        Score {
            index,
            distance,
            distance_score: parts[0],
            budget_score: parts[1],
            bedroom_score: parts[2],
            bathroom_score: parts[3],
            total: 0.0,
        }
    }

    fn order(scores: &[Score]) -> Vec<usize> {
        scores.iter().map(|s| s.index).collect()
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let ranked = rank(vec![
            score(0, 1.0, [30.0, 10.0, 10.0, 10.0]),
            score(1, 1.0, [30.0, 30.0, 20.0, 20.0]),
            score(2, 1.0, [30.0, 20.0, 10.0, 10.0]),
        ]);
        assert_eq!(order(&ranked), vec![1, 2, 0]);
        assert_eq!(ranked[0].total, 100.0);
    }

    #[test]
    fn test_below_threshold_dropped() {
        let ranked = rank(vec![
            score(0, 1.0, [30.0, 0.0, 0.0, 9.9]),
            score(1, 1.0, [30.0, 0.0, 0.0, 10.0]),
        ]);
        assert_eq!(order(&ranked), vec![1]);
    }

    #[test]
    fn test_tie_broken_by_distance_ascending() {
        let ranked = rank(vec![
            score(0, 1.5, [30.0, 30.0, 20.0, 20.0]),
            score(1, 0.5, [30.0, 30.0, 20.0, 20.0]),
        ]);
        assert_eq!(order(&ranked), vec![1, 0]);
    }

    #[test]
    fn test_tie_broken_by_sub_scores_descending() {
        let ranked = rank(vec![
            score(0, 1.0, [30.0, 10.0, 20.0, 20.0]),
            score(1, 1.0, [30.0, 20.0, 10.0, 20.0]),
            score(2, 1.0, [30.0, 20.0, 20.0, 10.0]),
            score(3, 1.0, [30.0, 20.0, 15.0, 15.0]),
        ]);
        // all total 80: budget first, then bedroom, then bathroom
        assert_eq!(order(&ranked), vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let ranked = rank(vec![
            score(0, 1.0, [30.0, 30.0, 20.0, 20.0]),
            score(1, 1.0, [30.0, 30.0, 20.0, 20.0]),
            score(2, 1.0, [30.0, 30.0, 20.0, 20.0]),
        ]);
        assert_eq!(order(&ranked), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
