#![forbid(unsafe_code)]

//! The sidebar dataset: an arena of items addressed by id.
//!
//! Parent and child links are ids, never references, so the arena can be
//! replaced wholesale when the store publishes a new index. Every lookup is
//! tolerant of unknown ids: a missing item simply has no parent, no
//! ancestors, and no descendants.

use std::collections::{HashMap, HashSet};

/// Identifier of a tree item.
pub type ItemId = String;

/// What an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Top-level section header. Always expanded, never highlighted.
    Root,
    /// A folder of components.
    Group,
    /// A component; expandable, and selectable.
    Component,
    /// A single story.
    Story,
    /// A docs-only entry.
    Document,
}

impl ItemKind {
    /// Whether activating the item selects it.
    #[must_use]
    pub const fn is_activatable(self) -> bool {
        matches!(self, Self::Component | Self::Story | Self::Document)
    }

    /// Whether the item is a leaf (never has children to expand).
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Story | Self::Document)
    }

    /// Whether the item can carry the keyboard highlight.
    #[must_use]
    pub const fn is_highlightable(self) -> bool {
        !matches!(self, Self::Root)
    }

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Group => "group",
            Self::Component => "component",
            Self::Story => "story",
            Self::Document => "document",
        }
    }
}

/// A node in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique id.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Parent id; `None` for roots.
    pub parent: Option<ItemId>,
    /// Child ids, in display order.
    pub children: Vec<ItemId>,
    /// Item kind.
    pub kind: ItemKind,
}

impl Item {
    /// Create an item with no parent or children. The name defaults to the id.
    #[must_use]
    pub fn new(id: impl Into<ItemId>, kind: ItemKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the parent id.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Set the child ids.
    #[must_use]
    pub fn with_children<S: Into<ItemId>>(mut self, children: impl IntoIterator<Item = S>) -> Self {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is a leaf item.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

/// Arena of sidebar items.
#[derive(Debug, Clone, Default)]
pub struct TreeData {
    items: HashMap<ItemId, Item>,
    /// Insertion order, for stable root ordering.
    order: Vec<ItemId>,
}

impl TreeData {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from items whose links are already filled in.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut data = Self::new();
        for item in items {
            data.insert(item);
        }
        data
    }

    /// Insert or replace an item as given.
    pub fn insert(&mut self, item: Item) {
        if !self.items.contains_key(&item.id) {
            self.order.push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
    }

    /// Insert `item` under `parent`, linking both directions.
    ///
    /// An unknown parent leaves the item parentless (a root).
    pub fn insert_child(&mut self, parent: &str, mut item: Item) {
        if let Some(parent_item) = self.items.get_mut(parent) {
            if !parent_item.children.contains(&item.id) {
                parent_item.children.push(item.id.clone());
            }
            item.parent = Some(parent.to_owned());
        } else {
            item.parent = None;
        }
        self.insert(item);
    }

    /// Look up an item.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Whether the id is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the dataset is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    /// Ids of parentless items, in insertion order.
    #[must_use]
    pub fn root_ids(&self) -> Vec<ItemId> {
        self.iter()
            .filter(|item| item.parent.is_none())
            .map(|item| item.id.clone())
            .collect()
    }

    /// The parent item, if both the item and its parent exist.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<&Item> {
        let parent = self.items.get(id)?.parent.as_deref()?;
        self.items.get(parent)
    }

    /// Ancestor ids, nearest parent first.
    ///
    /// The chain stops at the first missing parent; a malformed cyclic chain
    /// stops before repeating an id.
    #[must_use]
    pub fn ancestor_ids(&self, id: &str) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id);
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(parent.id.as_str()) {
                break;
            }
            out.push(parent.id.clone());
            current = &parent.id;
        }
        out
    }

    /// Descendant ids in pre-order.
    ///
    /// With `skip_leaves`, leaf items are left out; they have nothing to
    /// expand or collapse.
    #[must_use]
    pub fn descendant_ids(&self, id: &str, skip_leaves: bool) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(id.to_owned());
        self.collect_descendants(id, skip_leaves, &mut seen, &mut out);
        out
    }

    fn collect_descendants(
        &self,
        id: &str,
        skip_leaves: bool,
        seen: &mut HashSet<ItemId>,
        out: &mut Vec<ItemId>,
    ) {
        let Some(item) = self.items.get(id) else {
            return;
        };
        for child_id in &item.children {
            let Some(child) = self.items.get(child_id) else {
                continue;
            };
            if skip_leaves && child.is_leaf() {
                continue;
            }
            if !seen.insert(child_id.clone()) {
                continue;
            }
            out.push(child_id.clone());
            self.collect_descendants(child_id, skip_leaves, seen, out);
        }
    }
}

impl FromIterator<Item> for TreeData {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root
    /// └── ui (group)
    ///     ├── button (component)
    ///     │   ├── button--primary (story)
    ///     │   └── button--docs (document)
    ///     └── forms (group)
    ///         └── input (component)
    ///             └── input--basic (story)
    fn sample() -> TreeData {
        let mut data = TreeData::new();
        data.insert(Item::new("root", ItemKind::Root));
        data.insert_child("root", Item::new("ui", ItemKind::Group));
        data.insert_child("ui", Item::new("button", ItemKind::Component));
        data.insert_child("button", Item::new("button--primary", ItemKind::Story));
        data.insert_child("button", Item::new("button--docs", ItemKind::Document));
        data.insert_child("ui", Item::new("forms", ItemKind::Group));
        data.insert_child("forms", Item::new("input", ItemKind::Component));
        data.insert_child("input", Item::new("input--basic", ItemKind::Story));
        data
    }

    #[test]
    fn kinds() {
        assert!(ItemKind::Component.is_activatable());
        assert!(ItemKind::Story.is_activatable());
        assert!(!ItemKind::Group.is_activatable());
        assert!(ItemKind::Document.is_leaf());
        assert!(!ItemKind::Component.is_leaf());
        assert!(!ItemKind::Root.is_highlightable());
    }

    #[test]
    fn insert_child_links_both_ways() {
        let data = sample();
        assert_eq!(data.get("ui").unwrap().children, vec!["button", "forms"]);
        assert_eq!(data.get("forms").unwrap().parent.as_deref(), Some("ui"));
        assert_eq!(data.parent_of("button").unwrap().id, "ui");
    }

    #[test]
    fn insert_child_under_unknown_parent_makes_root() {
        let mut data = TreeData::new();
        data.insert_child("nowhere", Item::new("orphan", ItemKind::Group));
        assert_eq!(data.root_ids(), vec!["orphan"]);
    }

    #[test]
    fn root_ids_in_insertion_order() {
        let mut data = sample();
        data.insert(Item::new("other", ItemKind::Root));
        assert_eq!(data.root_ids(), vec!["root", "other"]);
    }

    #[test]
    fn ancestors_nearest_first() {
        let data = sample();
        assert_eq!(data.ancestor_ids("input--basic"), vec!["input", "forms", "ui", "root"]);
        assert!(data.ancestor_ids("root").is_empty());
        assert!(data.ancestor_ids("missing").is_empty());
    }

    #[test]
    fn descendants_pre_order() {
        let data = sample();
        assert_eq!(
            data.descendant_ids("ui", false),
            vec!["button", "button--primary", "button--docs", "forms", "input", "input--basic"]
        );
    }

    #[test]
    fn descendants_skip_leaves() {
        let data = sample();
        assert_eq!(data.descendant_ids("ui", true), vec!["button", "forms", "input"]);
        assert!(data.descendant_ids("button--primary", true).is_empty());
        assert!(data.descendant_ids("missing", true).is_empty());
    }

    #[test]
    fn dangling_child_ids_are_ignored() {
        let data = TreeData::from_items([
            Item::new("r", ItemKind::Root).with_children(["a", "ghost"]),
            Item::new("a", ItemKind::Group).with_parent("r"),
        ]);
        assert_eq!(data.descendant_ids("r", false), vec!["a"]);
    }

    #[test]
    fn cyclic_links_terminate() {
        let data = TreeData::from_items([
            Item::new("a", ItemKind::Group).with_parent("b").with_children(["b"]),
            Item::new("b", ItemKind::Group).with_parent("a").with_children(["a"]),
        ]);
        assert_eq!(data.ancestor_ids("a"), vec!["b"]);
        assert_eq!(data.descendant_ids("a", false), vec!["b"]);
    }
}
