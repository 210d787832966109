#![forbid(unsafe_code)]

//! Expansion controller for one sidebar tree instance.
//!
//! Owns the [`ExpansionState`] of a tree, keeps the selected item's
//! ancestry expanded, and turns key presses on the highlighted item into
//! expansion batches or highlight/selection requests.
//!
//! # Key handling
//!
//! | Key | Highlighted item | Effect |
//! |-----|------------------|--------|
//! | Enter / Space | component, story, document | select it |
//! | Left | expanded (not a root) | collapse it |
//! | Left | collapsed, highlightable parent | move highlight to the parent |
//! | Left | otherwise | collapse every non-leaf descendant |
//! | Right | collapsed | expand it |
//! | Right | expanded | expand every non-leaf descendant |
//!
//! Keys are ignored when navigation is off, when any modifier is held, on
//! auto-repeat, when the highlight belongs to another tree or is not
//! visible, and when the event landed outside the tree. At most one key is
//! handled per throttle window.

use explorer_core::config::NavigationConfig;
use explorer_core::event::{KeyCode, TargetedKeyEvent};
use explorer_core::throttle::Throttle;
use web_time::Instant;

use crate::data::{ItemId, ItemKind, TreeData};
use crate::highlight::{Highlight, NavigationHost};
use crate::state::{ExpandAction, ExpansionState};

/// How an item currently appears in the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    /// Item id.
    pub id: ItemId,
    /// Item kind.
    pub kind: ItemKind,
    /// Parent id, if any.
    pub parent_id: Option<ItemId>,
    /// Expanded flag; `None` for rows that cannot expand.
    pub expanded: Option<bool>,
    /// Whether the row can carry the highlight.
    pub highlightable: bool,
}

/// Logical command derived from a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Activate,
    Collapse,
    Expand,
}

impl Command {
    fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Self::Activate),
            KeyCode::Left => Some(Self::Collapse),
            KeyCode::Right => Some(Self::Expand),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Collapse => "collapse",
            Self::Expand => "expand",
        }
    }
}

/// Result of [`ExpansionController::handle_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The event was not for this tree, or nothing applied.
    Ignored,
    /// Dropped by the throttle window.
    Throttled,
    /// A select request was issued for the id.
    Selected(ItemId),
    /// These ids were collapsed.
    Collapsed(Vec<ItemId>),
    /// These ids were expanded.
    Expanded(Vec<ItemId>),
    /// The highlight was moved to the id.
    Highlighted(ItemId),
}

impl KeyOutcome {
    /// Whether the event did anything.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored | Self::Throttled)
    }
}

/// Expansion state and keyboard policy for one tree instance.
#[derive(Debug, Clone)]
pub struct ExpansionController {
    ref_id: String,
    data: TreeData,
    expanded: ExpansionState,
    browsing: bool,
    selected: Option<ItemId>,
    throttle: Throttle,
}

impl ExpansionController {
    /// Create a controller with default navigation config.
    ///
    /// The state starts with every root expanded and, when `highlight`
    /// belongs to this tree, the highlighted item's ancestry expanded.
    #[must_use]
    pub fn new(ref_id: impl Into<String>, data: TreeData, highlight: Option<&Highlight>) -> Self {
        Self::with_config(ref_id, data, highlight, &NavigationConfig::default())
    }

    /// Create a controller with explicit navigation config.
    #[must_use]
    pub fn with_config(
        ref_id: impl Into<String>,
        data: TreeData,
        highlight: Option<&Highlight>,
        config: &NavigationConfig,
    ) -> Self {
        let ref_id = ref_id.into();
        let expanded = initialize_expanded(&ref_id, &data, highlight);
        tracing::debug!(
            message = "tree.init",
            ref_id = %ref_id,
            items = data.len(),
            expanded = expanded.len(),
        );
        Self {
            ref_id,
            data,
            expanded,
            browsing: config.keyboard_enabled,
            selected: None,
            throttle: config.throttle(),
        }
    }

    /// Tree instance id.
    #[must_use]
    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }

    /// The dataset.
    #[must_use]
    pub fn data(&self) -> &TreeData {
        &self.data
    }

    /// The current expansion state.
    #[must_use]
    pub fn expanded(&self) -> &ExpansionState {
        &self.expanded
    }

    /// Whether `id` reads as expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.is_expanded(id)
    }

    /// The currently selected id, as last synced.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether keyboard navigation is on.
    #[must_use]
    pub fn is_browsing(&self) -> bool {
        self.browsing
    }

    /// Turn keyboard navigation on or off.
    pub fn set_browsing(&mut self, browsing: bool) {
        self.browsing = browsing;
    }

    /// Batch-set the expanded flag of `ids`.
    pub fn set_expansion<S: Into<ItemId>>(&mut self, ids: impl IntoIterator<Item = S>, value: bool) {
        self.dispatch(&ExpandAction::new(ids, value));
    }

    /// Apply an expansion batch. Returns the ids whose state changed.
    pub fn dispatch(&mut self, action: &ExpandAction) -> Vec<ItemId> {
        let changed = self.expanded.apply(action);
        tracing::debug!(
            message = "tree.expand",
            ref_id = %self.ref_id,
            value = action.value,
            requested = action.ids.len(),
            changed = changed.len(),
        );
        changed
    }

    /// Apply a batch requested from outside (a row click, a toolbar).
    ///
    /// A single-id batch also moves the highlight to that id.
    pub fn update_expanded<H: NavigationHost + ?Sized>(&mut self, action: &ExpandAction, host: &mut H) {
        self.dispatch(action);
        if let [id] = action.ids.as_slice() {
            host.set_highlighted_item_id(id);
        }
    }

    /// Record the externally selected item and expand its ancestry.
    ///
    /// Only a change of selection triggers expansion, so a user may
    /// collapse the selected item's ancestors afterwards. Nothing is ever
    /// collapsed here. Returns whether the selection changed.
    pub fn sync_to_selection(&mut self, selected: Option<&str>) -> bool {
        if self.selected.as_deref() == selected {
            return false;
        }
        self.selected = selected.map(str::to_owned);
        self.expand_selected_ancestry();
        true
    }

    /// Replace the dataset and re-expand the selected item's ancestry.
    ///
    /// The new dataset's roots replace the pinned set; an id that stopped
    /// being a root can be collapsed again.
    pub fn set_data(&mut self, data: TreeData) {
        self.data = data;
        self.expanded.repin(self.data.root_ids());
        self.expand_selected_ancestry();
    }

    fn expand_selected_ancestry(&mut self) {
        let Some(selected) = self.selected.as_deref() else {
            return;
        };
        let ancestors = self.data.ancestor_ids(selected);
        if !ancestors.is_empty() {
            self.dispatch(&ExpandAction::expand(ancestors));
        }
    }

    /// How `id` appears in the rendered tree, if it is rendered at all.
    ///
    /// An item is rendered when every ancestor is expanded.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<RenderedItem> {
        let item = self.data.get(id)?;
        if !self
            .data
            .ancestor_ids(id)
            .iter()
            .all(|ancestor| self.expanded.is_expanded(ancestor))
        {
            return None;
        }
        let expanded = if item.kind.is_leaf() {
            None
        } else {
            Some(self.expanded.is_expanded(id))
        };
        Some(RenderedItem {
            id: item.id.clone(),
            kind: item.kind,
            parent_id: item.parent.clone(),
            expanded,
            highlightable: item.kind.is_highlightable(),
        })
    }

    /// Handle a key press delivered to the sidebar at `now`.
    pub fn handle_key<H: NavigationHost + ?Sized>(
        &mut self,
        event: &TargetedKeyEvent,
        now: Instant,
        host: &mut H,
    ) -> KeyOutcome {
        if !self.throttle.try_acquire(now) {
            tracing::trace!(message = "tree.key.throttled", ref_id = %self.ref_id);
            return KeyOutcome::Throttled;
        }

        let key = event.key;
        if !self.browsing || !key.has_key() {
            return KeyOutcome::Ignored;
        }
        let Some(highlighted_id) = host
            .highlighted()
            .filter(|h| h.ref_id == self.ref_id)
            .map(|h| h.item_id)
        else {
            return KeyOutcome::Ignored;
        };
        if !key.is_press() || key.has_modifiers() {
            return KeyOutcome::Ignored;
        }
        let Some(command) = Command::from_key(key.code) else {
            return KeyOutcome::Ignored;
        };

        let Some(element) = self.element(&highlighted_id) else {
            return KeyOutcome::Ignored;
        };
        if !event.target.within_region {
            return KeyOutcome::Ignored;
        }
        if event.target.is_action {
            if command == Command::Activate {
                return KeyOutcome::Ignored;
            }
            host.release_action_focus();
        }

        let outcome = match command {
            Command::Activate => self.activate(&element, host),
            Command::Collapse => self.collapse(&element, host),
            Command::Expand => self.expand(&element),
        };
        tracing::debug!(
            message = "tree.navigate",
            ref_id = %self.ref_id,
            command = command.as_str(),
            item_id = %element.id,
            outcome = ?outcome,
        );
        outcome
    }

    fn activate<H: NavigationHost + ?Sized>(&self, element: &RenderedItem, host: &mut H) -> KeyOutcome {
        if !element.kind.is_activatable() {
            return KeyOutcome::Ignored;
        }
        host.select_item(&element.id);
        KeyOutcome::Selected(element.id.clone())
    }

    fn collapse<H: NavigationHost + ?Sized>(
        &mut self,
        element: &RenderedItem,
        host: &mut H,
    ) -> KeyOutcome {
        if element.expanded == Some(true) && !self.expanded.is_pinned(&element.id) {
            self.dispatch(&ExpandAction::collapse([element.id.clone()]));
            return KeyOutcome::Collapsed(vec![element.id.clone()]);
        }

        if let Some(parent) = element
            .parent_id
            .as_deref()
            .and_then(|parent_id| self.element(parent_id))
            && parent.highlightable
        {
            host.set_highlighted_item_id(&parent.id);
            host.scroll_into_view(&parent.id);
            return KeyOutcome::Highlighted(parent.id);
        }

        // No highlightable parent: the item sits directly under a root (or is
        // one), so fold up everything beneath it instead.
        let descendants = self.data.descendant_ids(&element.id, true);
        self.dispatch(&ExpandAction::collapse(descendants.iter().cloned()));
        KeyOutcome::Collapsed(descendants)
    }

    fn expand(&mut self, element: &RenderedItem) -> KeyOutcome {
        match element.expanded {
            Some(false) => {
                self.dispatch(&ExpandAction::expand([element.id.clone()]));
                KeyOutcome::Expanded(vec![element.id.clone()])
            }
            Some(true) => {
                let descendants = self.data.descendant_ids(&element.id, true);
                self.dispatch(&ExpandAction::expand(descendants.iter().cloned()));
                KeyOutcome::Expanded(descendants)
            }
            None => KeyOutcome::Ignored,
        }
    }
}

/// Seed expansion state: roots plus, when the highlight belongs to
/// `ref_id`, the highlighted item's ancestry.
#[must_use]
pub fn initialize_expanded(
    ref_id: &str,
    data: &TreeData,
    highlight: Option<&Highlight>,
) -> ExpansionState {
    let highlighted_ancestors = highlight
        .filter(|h| h.ref_id == ref_id)
        .map(|h| data.ancestor_ids(&h.item_id))
        .unwrap_or_default();
    ExpansionState::initialize(data.root_ids(), highlighted_ancestors)
}
