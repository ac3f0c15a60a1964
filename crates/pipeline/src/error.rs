use data_loader::{ItemId, UserId};
use predictor::PredictError;
use thiserror::Error;

/// Errors that abort an evaluation run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Prediction failed for user {user_id}, item {item_id}: {source}")]
    Prediction {
        user_id: UserId,
        item_id: ItemId,
        #[source]
        source: PredictError,
    },
}
