//! # Predictor Crate
//!
//! Memory-based, user-user collaborative filtering over a training
//! `RatingIndex`.
//!
//! ## Components
//!
//! ### Similarity
//! `UserSimilarity` trait with the `PearsonCorrelation` scorer: correlation of
//! two users' mean-centred ratings over the items both of them rated.
//!
//! ### Predictor
//! For a (user, item) pair, averages the co-raters' deviations from their own
//! means, weighted by similarity to the target user, and adds the result to
//! the target user's mean.
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingIndex;
//! use predictor::Predictor;
//! use std::sync::Arc;
//!
//! let training = RatingIndex::load_from_file(Path::new("data/train.txt"))?;
//! let means = training.compute_user_means()?;
//! let predictor = Predictor::new(Arc::new(training), Arc::new(means));
//!
//! let rating = predictor.predict(user_id, item_id)?;
//! ```

pub mod error;
pub mod similarity;
pub mod predictor;

// Re-export commonly used types
pub use error::PredictError;
pub use similarity::{pearson_similarity, PearsonCorrelation, UserSimilarity};
pub use predictor::{Prediction, Predictor};
