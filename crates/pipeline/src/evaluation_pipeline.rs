//! Drives the predictor over every triple of a test index.
//!
//! The test index only enumerates which (user, item) pairs to predict and
//! supplies their ground truth; similarities always come from training.

use crate::error::PipelineError;
use crate::evaluator::{EvaluationReport, Evaluator};
use data_loader::{ItemId, RatingIndex, UserId};
use predictor::{PredictError, Predictor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// What to do with a test triple whose user never appeared in training
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingUserPolicy {
    /// Leave the triple out of predictions and metrics, counting it
    #[default]
    Skip,
    /// Abort the run
    Fail,
}

/// Ground truth and prediction for one test pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRating {
    pub actual: f64,
    pub predicted: f64,
}

/// One output row, in the column order of the predictions file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRow {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub actual: f64,
    pub predicted: f64,
}

/// Predicted ratings keyed by user then item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predictions {
    by_user: BTreeMap<UserId, BTreeMap<ItemId, ScoredRating>>,
}

impl Predictions {
    fn insert(&mut self, user_id: UserId, item_id: ItemId, scored: ScoredRating) {
        self.by_user.entry(user_id).or_default().insert(item_id, scored);
    }

    pub fn get(&self, user_id: UserId, item_id: ItemId) -> Option<&ScoredRating> {
        self.by_user.get(&user_id).and_then(|items| items.get(&item_id))
    }

    pub fn len(&self) -> usize {
        self.by_user.values().map(|items| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// All rows ordered by user then item
    pub fn rows(&self) -> impl Iterator<Item = PredictionRow> + '_ {
        self.by_user.iter().flat_map(|(&user_id, items)| {
            items.iter().map(move |(&item_id, scored)| PredictionRow {
                item_id,
                user_id,
                actual: scored.actual,
                predicted: scored.predicted,
            })
        })
    }
}

/// Result of one evaluation pass
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub predictions: Predictions,
    pub report: EvaluationReport,
}

/// Predicts every test triple and scores the predictions.
///
/// ## Usage
/// ```ignore
/// let pipeline = EvaluationPipeline::new(predictor)
///     .with_missing_user_policy(MissingUserPolicy::Fail);
///
/// let evaluation = pipeline.run(&test_index)?;
/// ```
pub struct EvaluationPipeline {
    predictor: Predictor,
    missing_user_policy: MissingUserPolicy,
}

impl EvaluationPipeline {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            missing_user_policy: MissingUserPolicy::default(),
        }
    }

    /// Configure handling of cold-start test users (default: Skip)
    pub fn with_missing_user_policy(mut self, policy: MissingUserPolicy) -> Self {
        self.missing_user_policy = policy;
        self
    }

    /// Predict every triple of `test`, in user then item order.
    ///
    /// Nothing is returned unless the whole pass succeeds.
    #[instrument(skip(self, test), fields(test_ratings = test.len()))]
    pub fn run(&self, test: &RatingIndex) -> Result<Evaluation, PipelineError> {
        info!(
            "Evaluating with {} (missing users: {:?})",
            self.predictor.similarity_name(),
            self.missing_user_policy
        );

        let mut predictions = Predictions::default();
        let mut evaluator = Evaluator::new();
        let mut fallbacks = 0usize;

        for triple in test.triples() {
            match self.predictor.predict_detailed(triple.user_id, triple.item_id) {
                Ok(prediction) => {
                    if prediction.fallback {
                        fallbacks += 1;
                    }
                    evaluator.add(prediction.rating, triple.rating);
                    predictions.insert(
                        triple.user_id,
                        triple.item_id,
                        ScoredRating {
                            actual: triple.rating,
                            predicted: prediction.rating,
                        },
                    );
                }
                Err(PredictError::MissingUser { user_id })
                    if user_id == triple.user_id
                        && self.missing_user_policy == MissingUserPolicy::Skip =>
                {
                    debug!(
                        "Skipping item {} for user {} with no training history",
                        triple.item_id, user_id
                    );
                    evaluator.skip();
                }
                Err(source) => {
                    return Err(PipelineError::Prediction {
                        user_id: triple.user_id,
                        item_id: triple.item_id,
                        source,
                    });
                }
            }
        }

        let report = evaluator.report();
        if report.skipped > 0 {
            warn!(
                "Skipped {} test ratings from users absent in training",
                report.skipped
            );
        }
        info!(
            graded = report.graded,
            fallbacks,
            "Evaluation complete: RMSE {:.4}, MAE {:.4}",
            report.rmse,
            report.mae
        );

        Ok(Evaluation {
            predictions,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RatingTriple;
    use std::sync::Arc;

    fn pipeline(training: Vec<RatingTriple>) -> EvaluationPipeline {
        let training = RatingIndex::from_triples(training);
        let means = training.compute_user_means().unwrap();
        EvaluationPipeline::new(Predictor::new(Arc::new(training), Arc::new(means)))
    }

    fn training() -> Vec<RatingTriple> {
        vec![
            RatingTriple::new(1, 10, 5.0),
            RatingTriple::new(1, 20, 3.0),
            RatingTriple::new(2, 10, 4.0),
            RatingTriple::new(2, 20, 4.0),
        ]
    }

    #[test]
    fn test_cold_start_user_skipped_by_default() {
        let test = RatingIndex::from_triples(vec![
            RatingTriple::new(2, 30, 3.0),
            RatingTriple::new(9, 10, 4.0),
        ]);

        let evaluation = pipeline(training()).run(&test).unwrap();

        assert_eq!(evaluation.report.graded, 1);
        assert_eq!(evaluation.report.skipped, 1);
        assert_eq!(evaluation.predictions.len(), 1);
        assert!(evaluation.predictions.get(9, 10).is_none());
        // Unseen item falls back to user 2's mean of 4.0
        assert_eq!(evaluation.report.mae, 1.0);
        assert_eq!(evaluation.report.rmse, 1.0);
    }

    #[test]
    fn test_cold_start_user_fails_when_configured() {
        let test = RatingIndex::from_triples(vec![RatingTriple::new(9, 10, 4.0)]);
        let pipeline = pipeline(training()).with_missing_user_policy(MissingUserPolicy::Fail);

        let err = pipeline.run(&test).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Prediction {
                user_id: 9,
                item_id: 10,
                source: PredictError::MissingUser { user_id: 9 }
            }
        ));
    }

    #[test]
    fn test_rows_follow_output_column_order() {
        let test = RatingIndex::from_triples(vec![
            RatingTriple::new(2, 20, 4.0),
            RatingTriple::new(1, 30, 2.0),
        ]);

        let evaluation = pipeline(training()).run(&test).unwrap();
        let rows: Vec<PredictionRow> = evaluation.predictions.rows().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].user_id, rows[0].item_id), (1, 30));
        assert_eq!((rows[1].user_id, rows[1].item_id), (2, 20));
        assert_eq!(rows[0].actual, 2.0);
        assert_eq!(rows[0].predicted, 4.0);
    }
}
