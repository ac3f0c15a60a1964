//! RatingIndex building and per-user statistics.
//!
//! - Build both sparse views from a triple sequence (last write wins)
//! - Load one file, or the training and test files side by side
//! - Compute per-user mean ratings

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

impl RatingIndex {
    /// Build an index from a sequence of triples.
    ///
    /// A repeated (user, item) pair overwrites the earlier value in both
    /// views, so the two views always agree.
    pub fn from_triples<I>(triples: I) -> Self
    where
        I: IntoIterator<Item = RatingTriple>,
    {
        let mut index = RatingIndex::new();
        for triple in triples {
            index.insert(triple);
        }
        index
    }

    fn insert(&mut self, triple: RatingTriple) {
        self.by_user
            .entry(triple.user_id)
            .or_default()
            .insert(triple.item_id, triple.rating);

        self.by_item
            .entry(triple.item_id)
            .or_default()
            .insert(triple.user_id, triple.rating);
    }

    /// Parse a rating file and index it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let triples = parser::parse_ratings(path)?;
        let index = Self::from_triples(triples);

        let (users, items, ratings) = index.counts();
        info!(
            path = %path.display(),
            users, items, ratings,
            "Indexed rating file"
        );
        Ok(index)
    }

    /// Load the training and test files.
    ///
    /// The two files are independent, so they are parsed in parallel.
    pub fn load_train_test(train_path: &Path, test_path: &Path) -> Result<(Self, Self)> {
        let (train, test) = rayon::join(
            || Self::load_from_file(train_path),
            || Self::load_from_file(test_path),
        );
        Ok((train?, test?))
    }

    /// Compute the arithmetic mean rating of every user in the index.
    ///
    /// Each user's mean is summed sequentially over its item map, so the
    /// parallel fan-out across users does not change any result bit.
    pub fn compute_user_means(&self) -> Result<UserMeans> {
        let means = self
            .by_user
            .par_iter()
            .map(|(&user_id, items)| {
                if items.is_empty() {
                    return Err(DataLoadError::EmptyInput { user_id });
                }
                let total: f64 = items.values().sum();
                Ok((user_id, total / items.len() as f64))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Computed means for {} users", means.len());
        Ok(means.into_iter().collect())
    }
}
