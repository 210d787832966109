#![forbid(unsafe_code)]

//! Expansion state of one tree instance.
//!
//! A map from item id to expanded flag. Ids that were never written read as
//! collapsed. Root ids are pinned: they always read as expanded and batch
//! updates cannot collapse them.

use std::collections::{BTreeMap, BTreeSet};

use crate::data::ItemId;

/// A batch expansion update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandAction {
    /// Ids to update.
    pub ids: Vec<ItemId>,
    /// New expanded flag for every listed id.
    pub value: bool,
}

impl ExpandAction {
    /// Build an action from any list of ids.
    #[must_use]
    pub fn new<S: Into<ItemId>>(ids: impl IntoIterator<Item = S>, value: bool) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// Expand the given ids.
    #[must_use]
    pub fn expand<S: Into<ItemId>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(ids, true)
    }

    /// Collapse the given ids.
    #[must_use]
    pub fn collapse<S: Into<ItemId>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::new(ids, false)
    }
}

/// Expanded flags keyed by item id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ExpansionState {
    entries: BTreeMap<ItemId, bool>,
    #[cfg_attr(feature = "state-persistence", serde(default))]
    pinned: BTreeSet<ItemId>,
}

impl ExpansionState {
    /// Seed a state: every root and every listed ancestor expanded.
    #[must_use]
    pub fn initialize<R, A>(root_ids: R, highlighted_ancestors: A) -> Self
    where
        R: IntoIterator,
        R::Item: Into<ItemId>,
        A: IntoIterator,
        A::Item: Into<ItemId>,
    {
        let mut state = Self::default();
        for id in root_ids {
            let id = id.into();
            state.entries.insert(id.clone(), true);
            state.pinned.insert(id);
        }
        for id in highlighted_ancestors {
            state.entries.insert(id.into(), true);
        }
        state
    }

    /// Whether the id reads as expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.pinned.contains(id) || self.entries.get(id).copied().unwrap_or(false)
    }

    /// The stored flag, if one was ever written.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<bool> {
        if self.pinned.contains(id) {
            return Some(true);
        }
        self.entries.get(id).copied()
    }

    /// Whether the id is a pinned root.
    #[must_use]
    pub fn is_pinned(&self, id: &str) -> bool {
        self.pinned.contains(id)
    }

    /// Apply a batch. Unlisted ids keep their value; pinned ids ignore collapse.
    ///
    /// Returns the ids whose reading actually changed.
    pub fn apply(&mut self, action: &ExpandAction) -> Vec<ItemId> {
        let mut changed = Vec::new();
        for id in &action.ids {
            if !action.value && self.pinned.contains(id) {
                continue;
            }
            let before = self.is_expanded(id);
            self.entries.insert(id.clone(), action.value);
            if before != action.value {
                changed.push(id.clone());
            }
        }
        changed
    }

    /// Replace the pinned set with `root_ids` (after the dataset changed).
    ///
    /// Stored flags are kept, so a former root stays expanded until it is
    /// collapsed like any other item.
    pub fn repin<S: Into<ItemId>>(&mut self, root_ids: impl IntoIterator<Item = S>) {
        self.pinned.clear();
        for id in root_ids {
            let id = id.into();
            self.entries.insert(id.clone(), true);
            self.pinned.insert(id);
        }
    }

    /// Ids that currently read as expanded, sorted.
    #[must_use]
    pub fn expanded_ids(&self) -> Vec<&str> {
        let mut ids: BTreeSet<&str> = self.pinned.iter().map(String::as_str).collect();
        ids.extend(
            self.entries
                .iter()
                .filter(|(_, expanded)| **expanded)
                .map(|(id, _)| id.as_str()),
        );
        ids.into_iter().collect()
    }

    /// All written entries, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries
            .iter()
            .map(|(id, expanded)| (id.as_str(), *expanded || self.pinned.contains(id)))
    }

    /// Number of written entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
