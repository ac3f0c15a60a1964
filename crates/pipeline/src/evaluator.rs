//! Accumulates prediction residuals and reduces them to error metrics.

use crate::metrics::{ErrorMetric, Mae, Rmse};
use serde::{Deserialize, Serialize};

/// Aggregate prediction error over one test set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub rmse: f64,
    pub mae: f64,
    /// Test triples that were predicted and scored
    pub graded: usize,
    /// Test triples left out because their user had no training history
    pub skipped: usize,
}

/// Collects signed residuals (`predicted - actual`) in arrival order
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    residuals: Vec<f64>,
    skipped: usize,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one graded prediction
    pub fn add(&mut self, predicted: f64, actual: f64) {
        self.residuals.push(predicted - actual);
    }

    /// Record a test triple that could not be graded
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn report(&self) -> EvaluationReport {
        let mut rmse = Rmse::new();
        let mut mae = Mae::new();
        for &residual in &self.residuals {
            rmse.add(residual);
            mae.add(residual);
        }

        EvaluationReport {
            rmse: rmse.result(),
            mae: mae.result(),
            graded: self.residuals.len(),
            skipped: self.skipped,
        }
    }
}
