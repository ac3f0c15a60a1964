//! Evaluation pipeline for rating predictions.
//!
//! This crate provides:
//! - `ErrorMetric` trait with RMSE and MAE
//! - `Evaluator` for collecting residuals into an `EvaluationReport`
//! - `EvaluationPipeline` for predicting a whole test set
//!
//! ## Architecture
//! The pipeline processes a test set in stages:
//! 1. Every test triple is predicted from the training data
//! 2. Triples of users unknown to training follow the `MissingUserPolicy`
//! 3. Residuals are reduced to RMSE and MAE
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{EvaluationPipeline, MissingUserPolicy};
//! use predictor::Predictor;
//!
//! let pipeline = EvaluationPipeline::new(Predictor::new(training, means))
//!     .with_missing_user_policy(MissingUserPolicy::Skip);
//!
//! let evaluation = pipeline.run(&test)?;
//! println!("RMSE {:.4}", evaluation.report.rmse);
//! ```

pub mod error;
pub mod metrics;
pub mod evaluator;
pub mod evaluation_pipeline;

// Re-export main types
pub use error::PipelineError;
pub use metrics::{ErrorMetric, Mae, Rmse};
pub use evaluator::{EvaluationReport, Evaluator};
pub use evaluation_pipeline::{
    Evaluation, EvaluationPipeline, MissingUserPolicy, PredictionRow, Predictions, ScoredRating,
};
