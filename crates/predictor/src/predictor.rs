//! Neighbourhood rating prediction
//!
//! Predicts how a user would rate an item from the mean-centred ratings of
//! every training user who rated that item, weighted by user similarity:
//!
//! ```text
//! prediction = mean(u) + Σ w(u,v) * (r(v,i) - mean(v)) / Σ |w(u,v)|
//! ```
//!
//! When the weight sum is zero (no co-raters, unseen item, or all weights
//! exactly zero) the prediction is the user's own mean.

use crate::error::PredictError;
use crate::similarity::{PearsonCorrelation, UserSimilarity};
use data_loader::{ItemId, ItemRatings, RatingIndex, UserId, UserMeans};
use std::sync::Arc;
use tracing::{instrument, trace};

/// A predicted rating together with how it was reached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub rating: f64,
    /// Training users that rated the target item
    pub co_raters: usize,
    /// Sum of absolute similarity weights
    pub weight: f64,
    /// True when the prediction is the user's mean because `weight` was zero
    pub fallback: bool,
}

/// Predicts ratings from a training index and its per-user means
pub struct Predictor {
    /// Shared training data (read-only)
    training: Arc<RatingIndex>,
    /// Means computed from `training`
    means: Arc<UserMeans>,
    similarity: Box<dyn UserSimilarity>,
    /// Whether the target user counts as one of its own co-raters
    include_self: bool,
}

impl Predictor {
    /// Create a predictor using Pearson similarity
    pub fn new(training: Arc<RatingIndex>, means: Arc<UserMeans>) -> Self {
        Self {
            training,
            means,
            similarity: Box::new(PearsonCorrelation),
            include_self: true,
        }
    }

    /// Swap the similarity measure (default: Pearson)
    pub fn with_similarity(mut self, similarity: impl UserSimilarity + 'static) -> Self {
        self.similarity = Box::new(similarity);
        self
    }

    /// Configure whether the target user's own training rating of the item
    /// contributes to its prediction (default: true).
    ///
    /// With the default, a user who rated the item in training is compared
    /// against itself and weighted like any other co-rater.
    pub fn with_self_similarity(mut self, include: bool) -> Self {
        self.include_self = include;
        self
    }

    pub fn similarity_name(&self) -> &str {
        self.similarity.name()
    }

    /// Predicted rating of `item_id` by `user_id`
    pub fn predict(&self, user_id: UserId, item_id: ItemId) -> Result<f64, PredictError> {
        self.predict_detailed(user_id, item_id).map(|p| p.rating)
    }

    /// Like `predict`, with the co-rater count and weight sum attached
    #[instrument(level = "trace", skip(self))]
    pub fn predict_detailed(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<Prediction, PredictError> {
        let user_mean = self
            .means
            .get(user_id)
            .ok_or(PredictError::MissingUser { user_id })?;
        let user_ratings = self
            .training
            .user_ratings(user_id)
            .ok_or(PredictError::MissingUser { user_id })?;

        let Some(co_raters) = self.training.item_ratings(item_id) else {
            trace!("Item {} unseen in training", item_id);
            return Ok(Prediction {
                rating: user_mean,
                co_raters: 0,
                weight: 0.0,
                fallback: true,
            });
        };

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        let mut counted = 0;

        for (&other_id, &other_rating) in co_raters {
            if other_id == user_id && !self.include_self {
                continue;
            }
            let other_mean = self
                .means
                .get(other_id)
                .ok_or(PredictError::MissingUser { user_id: other_id })?;
            let other_ratings = self.other_ratings(other_id)?;

            let weight =
                self.similarity
                    .similarity(user_ratings, other_ratings, user_mean, other_mean);
            numerator += weight * (other_rating - other_mean);
            denominator += weight.abs();
            counted += 1;
        }

        let prediction = if denominator > 0.0 {
            Prediction {
                rating: user_mean + numerator / denominator,
                co_raters: counted,
                weight: denominator,
                fallback: false,
            }
        } else {
            Prediction {
                rating: user_mean,
                co_raters: counted,
                weight: denominator,
                fallback: true,
            }
        };
        Ok(prediction)
    }

    fn other_ratings(&self, other_id: UserId) -> Result<&ItemRatings, PredictError> {
        self.training
            .user_ratings(other_id)
            .ok_or(PredictError::MissingUser { user_id: other_id })
    }
}
