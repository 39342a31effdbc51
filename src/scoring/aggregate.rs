//! Fixed-weight signal aggregation.

/// Weight of the interest-match signal.
pub const INTEREST_WEIGHT: f64 = 0.25;
/// Weight of the engagement signal.
pub const ENGAGEMENT_WEIGHT: f64 = 0.30;
/// Weight of the view frequency/recency signal.
pub const VIEW_WEIGHT: f64 = 0.25;
/// Weight of the catalog-popularity signal.
pub const POPULARITY_WEIGHT: f64 = 0.20;

/// Combines the four signals into one total score.
///
/// Pure and side-effect free; both execution strategies call this exact
/// function, which is what ties their rankings together. Inputs in `[0, 1]`
/// produce a total in `[0, 1]` because the weights sum to 1.
pub fn aggregate_score(interest: f64, engagement: f64, views: f64, popularity: f64) -> f64 {
    interest * INTEREST_WEIGHT
        + engagement * ENGAGEMENT_WEIGHT
        + views * VIEW_WEIGHT
        + popularity * POPULARITY_WEIGHT
}

/// Rounds to two decimal places for presentation.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = INTEREST_WEIGHT + ENGAGEMENT_WEIGHT + VIEW_WEIGHT + POPULARITY_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn total_stays_in_unit_interval() {
        assert_eq!(aggregate_score(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!((aggregate_score(1.0, 1.0, 1.0, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn worked_scenario_totals_correctly() {
        // interest 0.5, engagement 1.0, views (ln 3 / ln 10 + e^(-1/7)) / 2,
        // popularity 1.0 => roughly 0.793.
        let views = ((3.0f64.ln() / 10.0f64.ln()) + (-1.0 / 7.0f64).exp()) / 2.0;
        let total = aggregate_score(0.5, 1.0, views, 1.0);
        assert!((total - 0.793).abs() < 1e-3);
        assert_eq!(round2(total), 0.79);
    }

    #[test]
    fn round2_rounds_to_two_decimals() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.4771), 0.48);
        assert_eq!(round2(0.672), 0.67);
        assert_eq!(round2(1.0), 1.0);
    }
}
