use data_loader::UserId;
use thiserror::Error;

/// Errors raised while predicting a single rating
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The user has no mean rating, i.e. never appeared in training.
    ///
    /// A cold-start user cannot be predicted by neighbourhood methods; the
    /// caller decides whether to skip the triple or abort.
    #[error("User {user_id} has no training history")]
    MissingUser { user_id: UserId },
}
