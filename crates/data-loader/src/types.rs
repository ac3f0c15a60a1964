//! Core domain types for rating data.
//!
//! All maps are `BTreeMap`s: iteration order is fixed by key, so every
//! downstream accumulation (means, similarities, prediction sums) runs in the
//! same order on every run and yields bit-identical results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque identifier for a user. Not assumed contiguous or dense.
pub type UserId = u32;

/// Opaque identifier for a rated item.
pub type ItemId = u32;

/// One user's ratings, keyed by item
pub type ItemRatings = BTreeMap<ItemId, f64>;

/// One item's ratings, keyed by the user who gave them
pub type UserRatings = BTreeMap<UserId, f64>;

// =============================================================================
// Rating Triple
// =============================================================================

/// A single observed (user, item, rating) triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingTriple {
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Rating value; no range is enforced
    pub rating: f64,
}

impl RatingTriple {
    pub fn new(user_id: UserId, item_id: ItemId, rating: f64) -> Self {
        Self {
            user_id,
            item_id,
            rating,
        }
    }
}

// =============================================================================
// RatingIndex - sparse user/item views over one rating file
// =============================================================================

/// Two consistent sparse views over the same set of triples.
///
/// For every stored triple `by_user[u][i] == by_item[i][u]`. The index is
/// built once (see `RatingIndex::from_triples`) and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct RatingIndex {
    /// All ratings made by each user
    pub(crate) by_user: BTreeMap<UserId, ItemRatings>,
    /// All ratings received by each item
    pub(crate) by_item: BTreeMap<ItemId, UserRatings>,
}

impl RatingIndex {
    /// Creates a new, empty RatingIndex
    pub fn new() -> Self {
        Self {
            by_user: BTreeMap::new(),
            by_item: BTreeMap::new(),
        }
    }

    /// Get all ratings made by a user, `None` if the user never rated anything
    pub fn user_ratings(&self, user_id: UserId) -> Option<&ItemRatings> {
        self.by_user.get(&user_id)
    }

    /// Get all ratings received by an item, `None` if the item is unseen
    pub fn item_ratings(&self, item_id: ItemId) -> Option<&UserRatings> {
        self.by_item.get(&item_id)
    }

    /// Rating a user gave an item, if any
    pub fn rating(&self, user_id: UserId, item_id: ItemId) -> Option<f64> {
        self.by_user
            .get(&user_id)
            .and_then(|items| items.get(&item_id))
            .copied()
    }

    /// Every stored triple, ordered by user then item
    pub fn triples(&self) -> impl Iterator<Item = RatingTriple> + '_ {
        self.by_user.iter().flat_map(|(&user_id, items)| {
            items
                .iter()
                .map(move |(&item_id, &rating)| RatingTriple::new(user_id, item_id, rating))
        })
    }

    /// Number of distinct (user, item) ratings
    pub fn len(&self) -> usize {
        self.by_user.values().map(|items| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }

    /// Get (users, items, ratings) counts for logging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.by_user.len(), self.by_item.len(), self.len())
    }
}

// =============================================================================
// UserMeans
// =============================================================================

/// Mean rating per user, defined only for users of the index it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserMeans {
    pub(crate) means: BTreeMap<UserId, f64>,
}

impl UserMeans {
    /// Mean rating of `user_id`; `None` for a user absent from training
    pub fn get(&self, user_id: UserId) -> Option<f64> {
        self.means.get(&user_id).copied()
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

impl FromIterator<(UserId, f64)> for UserMeans {
    fn from_iter<I: IntoIterator<Item = (UserId, f64)>>(iter: I) -> Self {
        Self {
            means: iter.into_iter().collect(),
        }
    }
}
