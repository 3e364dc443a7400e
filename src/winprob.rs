//! Fixed-variance Gaussian win-probability model.
//!
//! The rating gap between two teams is scaled by a fixed standard
//! deviation and pushed through the standard normal CDF:
//!
//!   P(A beats B) = Φ((rating_a − rating_b) / sigma)
//!
//! Equal ratings give exactly 0.5, and by CDF symmetry the opponent's
//! probability is the exact complement, so the pair of readouts always
//! sums to 1 without a second evaluation.

use statrs::distribution::{ContinuousCDF, Normal};

/// Default standard deviation for the rating gap; not derived from data.
pub const DEFAULT_SIGMA: f64 = 1.0;

/// Probability that the team rated `rating_a` beats the team rated
/// `rating_b`. Total over all finite inputs; saturates toward 0 or 1 for
/// large gaps rather than failing.
pub fn win_probability(rating_a: f64, rating_b: f64, sigma: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf((rating_a - rating_b) / sigma)
}

/// Both readouts for a matchup: `(P(A wins), P(B wins))`, summing to 1.
pub fn matchup(rating_a: f64, rating_b: f64, sigma: f64) -> (f64, f64) {
    let p = win_probability(rating_a, rating_b, sigma);
    (p, 1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_ratings_are_a_fair_coin() {
        // Exactly 0.5, not approximately: Φ(0) has no rounding to do.
        assert_eq!(win_probability(90.0, 90.0, DEFAULT_SIGMA), 0.5);
        assert_eq!(win_probability(-3.25, -3.25, DEFAULT_SIGMA), 0.5);
        assert_eq!(win_probability(0.0, 0.0, DEFAULT_SIGMA), 0.5);
    }

    #[test]
    fn two_point_gap_matches_tabulated_phi() {
        // Φ(2) ≈ 0.97725
        let p = win_probability(90.0, 88.0, DEFAULT_SIGMA);
        assert_relative_eq!(p, 0.9772, epsilon = 1e-4);
        let q = win_probability(88.0, 90.0, DEFAULT_SIGMA);
        assert_relative_eq!(q, 0.0228, epsilon = 1e-4);
    }

    #[test]
    fn complements_sum_to_one() {
        let pairs = [
            (90.0, 88.0),
            (12.5, 91.75),
            (-4.0, 3.0),
            (100.0, -100.0),
            (0.001, 0.0),
        ];
        for (a, b) in pairs {
            let p_ab = win_probability(a, b, DEFAULT_SIGMA);
            let p_ba = win_probability(b, a, DEFAULT_SIGMA);
            assert_relative_eq!(p_ab + p_ba, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn matchup_pair_sums_exactly() {
        let (p_a, p_b) = matchup(90.0, 88.0, DEFAULT_SIGMA);
        assert_eq!(p_a + p_b, 1.0);
        assert!(p_a > p_b);
    }

    #[test]
    fn monotone_in_first_rating() {
        let b = 85.0;
        let mut last = 0.0;
        for step in 0..40 {
            let a = 80.0 + f64::from(step) * 0.25;
            let p = win_probability(a, b, DEFAULT_SIGMA);
            assert!(p >= last, "p({a}) = {p} dropped below {last}");
            last = p;
        }
    }

    #[test]
    fn large_gaps_saturate_without_overflow() {
        let p = win_probability(1000.0, 0.0, DEFAULT_SIGMA);
        assert!(p.is_finite());
        assert_relative_eq!(p, 1.0, epsilon = 1e-12);

        let q = win_probability(0.0, 1000.0, DEFAULT_SIGMA);
        assert!(q.is_finite());
        assert!(q >= 0.0 && q < 1e-12);
    }

    #[test]
    fn wider_sigma_flattens_the_edge() {
        let sharp = win_probability(90.0, 88.0, 1.0);
        let flat = win_probability(90.0, 88.0, 10.0);
        assert!(flat < sharp);
        assert!(flat > 0.5);
    }
}
