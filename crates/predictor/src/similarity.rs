//! User-to-user similarity over co-rated items.
//!
//! ## Algorithm (Pearson, with precomputed means)
//! 1. Intersect the two users' item keys (the co-rated set)
//! 2. Mean-center both users' ratings on that set with the means passed in
//! 3. Return covariance / sqrt(variance_a * variance_b)
//!
//! A co-rated set with fewer than two items, or a zero variance product,
//! yields exactly 0.0.
//!
//! The single-item case differs from plain Pearson with external means:
//! centring on the users' overall means leaves one shared item with non-zero
//! deviations on both sides, which would score exactly +1 or -1. That score
//! says nothing about agreement, so it is forced to 0.0 instead.

use data_loader::ItemRatings;

/// A symmetric similarity measure between two users.
///
/// `Send + Sync` so a scorer can be shared by whatever drives predictions.
pub trait UserSimilarity: Send + Sync {
    /// Returns the name of this measure (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of two users given their rating maps and mean ratings.
    ///
    /// Must satisfy `similarity(a, b, ma, mb) == similarity(b, a, mb, ma)`.
    fn similarity(
        &self,
        ratings_a: &ItemRatings,
        ratings_b: &ItemRatings,
        mean_a: f64,
        mean_b: f64,
    ) -> f64;
}

/// Pearson correlation centred on each user's overall mean
#[derive(Debug, Clone, Copy, Default)]
pub struct PearsonCorrelation;

impl UserSimilarity for PearsonCorrelation {
    fn name(&self) -> &str {
        "PearsonCorrelation"
    }

    fn similarity(
        &self,
        ratings_a: &ItemRatings,
        ratings_b: &ItemRatings,
        mean_a: f64,
        mean_b: f64,
    ) -> f64 {
        pearson_similarity(ratings_a, ratings_b, mean_a, mean_b)
    }
}

/// Pearson similarity between two users.
///
/// Walks the smaller map and looks each item up in the larger one. Both maps iterate in
/// ascending item order, so the co-rated set is always summed in the same
/// order and swapping the arguments gives a bit-identical result.
pub fn pearson_similarity(
    ratings_a: &ItemRatings,
    ratings_b: &ItemRatings,
    mean_a: f64,
    mean_b: f64,
) -> f64 {
    let (small, large, mean_small, mean_large) = if ratings_a.len() <= ratings_b.len() {
        (ratings_a, ratings_b, mean_a, mean_b)
    } else {
        (ratings_b, ratings_a, mean_b, mean_a)
    };

    let mut covariance = 0.0;
    let mut variance_small = 0.0;
    let mut variance_large = 0.0;
    let mut shared = 0usize;

    for (item_id, &rating_small) in small {
        let Some(&rating_large) = large.get(item_id) else {
            continue;
        };
        shared += 1;

        let dev_small = rating_small - mean_small;
        let dev_large = rating_large - mean_large;
        covariance += dev_small * dev_large;
        variance_small += dev_small * dev_small;
        variance_large += dev_large * dev_large;
    }

    // One shared item would otherwise score +/-1 from the sign of its
    // deviations alone.
    if shared < 2 {
        return 0.0;
    }

    let variance_product = variance_small * variance_large;
    if variance_product == 0.0 {
        return 0.0;
    }

    covariance / variance_product.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(pairs: &[(u32, f64)]) -> ItemRatings {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_co_rated_set() {
        let a = ItemRatings::new();
        let b = ratings(&[(1, 5.0), (2, 1.0)]);

        assert_eq!(pearson_similarity(&a, &b, 3.0, 3.0), 0.0);
        assert_eq!(pearson_similarity(&b, &a, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_disjoint_items() {
        let a = ratings(&[(1, 5.0), (2, 1.0)]);
        let b = ratings(&[(3, 5.0), (4, 1.0)]);
        assert_eq!(pearson_similarity(&a, &b, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_single_shared_item() {
        let a = ratings(&[(1, 5.0), (2, 1.0)]);
        let b = ratings(&[(1, 4.0), (3, 2.0)]);
        assert_eq!(pearson_similarity(&a, &b, 3.0, 3.0), 0.0);
        assert_eq!(pearson_similarity(&b, &a, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_single_shared_item_with_nonzero_deviations() {
        // Both deviations non-zero: the unguarded ratio would be exactly -1
        let a = ratings(&[(1, 5.0), (2, 1.0), (3, 3.0)]);
        let b = ratings(&[(1, 1.0), (4, 5.0)]);
        assert_eq!(pearson_similarity(&a, &b, 3.0, 3.0), 0.0);
    }

    #[test]
    fn test_zero_variance_is_zero() {
        let a = ratings(&[(1, 5.0), (2, 3.0)]);
        let b = ratings(&[(1, 4.0), (2, 4.0)]);
        assert_eq!(pearson_similarity(&a, &b, 4.0, 4.0), 0.0);
    }

    #[test]
    fn test_perfect_correlation() {
        let a = ratings(&[(1, 5.0), (2, 3.0), (3, 1.0)]);
        let b = ratings(&[(1, 4.0), (2, 3.0), (3, 2.0)]);
        let sim = pearson_similarity(&a, &b, 3.0, 3.0);
        assert!((sim - 1.0).abs() < 1e-12);

        let c = ratings(&[(1, 1.0), (2, 3.0), (3, 5.0)]);
        let sim = pearson_similarity(&a, &c, 3.0, 3.0);
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry_is_exact() {
        let a = ratings(&[(1, 4.5), (2, 1.5), (5, 3.25), (7, 2.0), (9, 5.0)]);
        let b = ratings(&[(1, 0.5), (2, 4.0), (5, 2.75), (8, 1.0)]);
        let (ma, mb) = (3.1, 2.2);

        let ab = pearson_similarity(&a, &b, ma, mb);
        let ba = pearson_similarity(&b, &a, mb, ma);
        assert_eq!(ab.to_bits(), ba.to_bits());
    }

    #[test]
    fn test_bounded() {
        let a = ratings(&[(1, 4.5), (2, 1.5), (5, 3.25), (7, 2.0)]);
        let b = ratings(&[(1, 0.5), (2, 4.0), (5, 2.75), (7, 1.0)]);
        for (ma, mb) in [(0.0, 0.0), (2.5, 2.5), (3.0, 1.0), (10.0, -4.0)] {
            let sim = pearson_similarity(&a, &b, ma, mb);
            assert!(sim >= -1.0 - 1e-12 && sim <= 1.0 + 1e-12, "sim = {sim}");
        }
    }

    #[test]
    fn test_trait_delegates() {
        let a = ratings(&[(1, 5.0), (2, 3.0), (3, 1.0)]);
        let scorer = PearsonCorrelation;
        assert_eq!(scorer.name(), "PearsonCorrelation");
        assert_eq!(
            scorer.similarity(&a, &a, 3.0, 3.0),
            pearson_similarity(&a, &a, 3.0, 3.0)
        );
    }
}
