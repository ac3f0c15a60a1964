//! # Data Loader Crate
//!
//! Loads comma-delimited rating files and indexes them for collaborative
//! filtering.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (UserId, ItemId, RatingTriple, RatingIndex, UserMeans)
//! - **parser**: Parse rating files into triples
//! - **index**: Build the sparse user/item views and per-user means
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::RatingIndex;
//! use std::path::Path;
//!
//! let (train, test) = RatingIndex::load_train_test(
//!     Path::new("data/train.txt"),
//!     Path::new("data/test.txt"),
//! )?;
//! let means = train.compute_user_means()?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    ItemRatings,
    UserRatings,
    // Core types
    RatingTriple,
    RatingIndex,
    UserMeans,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_index_creation() {
        let index = RatingIndex::new();
        let (users, items, ratings) = index.counts();

        assert_eq!(users, 0);
        assert_eq!(items, 0);
        assert_eq!(ratings, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_triples_ordered_by_user_then_item() {
        let index = RatingIndex::from_triples(vec![
            RatingTriple::new(2, 5, 1.0),
            RatingTriple::new(1, 9, 2.0),
            RatingTriple::new(1, 3, 3.0),
        ]);

        let order: Vec<(UserId, ItemId)> = index
            .triples()
            .map(|t| (t.user_id, t.item_id))
            .collect();
        assert_eq!(order, vec![(1, 3), (1, 9), (2, 5)]);
    }
}
