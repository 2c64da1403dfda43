//! The working set of assets chosen for provisioning.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::asset::AssetKey;

/// Set of asset keys the user currently intends to provision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    keys: BTreeSet<AssetKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `key`. Returns the new membership.
    pub fn toggle(&mut self, key: AssetKey) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Replace the selection with `keys`.
    pub fn select_all(&mut self, keys: impl IntoIterator<Item = AssetKey>) {
        self.keys = keys.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetKey> {
        self.keys.iter()
    }
}

impl FromIterator<AssetKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = AssetKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// A selected key that no longer exists in the catalog.
///
/// Non-fatal: the key is dropped from the resolved selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Selected asset {key} is not in the catalog")]
pub struct SelectionResolutionError {
    pub key: AssetKey,
}
