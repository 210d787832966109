#![forbid(unsafe_code)]

//! The keyboard highlight and the host interface around it.
//!
//! The highlight is owned by the host (the sidebar as a whole, which may
//! show several tree instances, one per `ref_id`). A controller only reads
//! it and asks the host to move it; the host stays the single writer.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::data::ItemId;

/// The highlighted item and the tree instance it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Tree instance id.
    pub ref_id: String,
    /// Highlighted item id.
    pub item_id: ItemId,
}

impl Highlight {
    /// Create a highlight.
    #[must_use]
    pub fn new(ref_id: impl Into<String>, item_id: impl Into<ItemId>) -> Self {
        Self {
            ref_id: ref_id.into(),
            item_id: item_id.into(),
        }
    }
}

/// Shared handle to the current highlight.
///
/// Cloning shares the cell.
#[derive(Clone, Default)]
pub struct HighlightCell(Rc<RefCell<Option<Highlight>>>);

impl HighlightCell {
    /// Create an empty cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cell holding `highlight`.
    #[must_use]
    pub fn with(highlight: Highlight) -> Self {
        Self(Rc::new(RefCell::new(Some(highlight))))
    }

    /// Current highlight.
    #[must_use]
    pub fn get(&self) -> Option<Highlight> {
        self.0.borrow().clone()
    }

    /// Replace the highlight.
    pub fn set(&self, highlight: Option<Highlight>) {
        *self.0.borrow_mut() = highlight;
    }

    /// The highlighted item id, if the highlight belongs to `ref_id`.
    #[must_use]
    pub fn item_in(&self, ref_id: &str) -> Option<ItemId> {
        self.0
            .borrow()
            .as_ref()
            .filter(|h| h.ref_id == ref_id)
            .map(|h| h.item_id.clone())
    }
}

impl fmt::Debug for HighlightCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HighlightCell").field(&*self.0.borrow()).finish()
    }
}

/// What a tree controller needs from its host.
pub trait NavigationHost {
    /// The current highlight, whichever tree it belongs to.
    fn highlighted(&self) -> Option<Highlight>;

    /// Request that `item_id` in the calling tree become highlighted.
    fn set_highlighted_item_id(&mut self, item_id: &str);

    /// Request that `item_id` be selected (opened).
    fn select_item(&mut self, item_id: &str);

    /// Request that the row for `item_id` be scrolled into view.
    fn scroll_into_view(&mut self, _item_id: &str) {}

    /// The key came from a focused action control; release its focus so
    /// arrow navigation continues from the tree.
    fn release_action_focus(&mut self) {}
}

type Callback = Box<dyn FnMut(&str)>;

/// A [`NavigationHost`] built from a [`HighlightCell`] and callbacks.
///
/// Highlight requests are written to the cell (tagged with this host's
/// `ref_id`) and forwarded to the optional callback.
pub struct CallbackHost {
    ref_id: String,
    highlight: HighlightCell,
    on_highlight: Option<Callback>,
    on_select: Option<Callback>,
    on_scroll: Option<Callback>,
}

impl CallbackHost {
    /// Create a host for tree instance `ref_id`.
    #[must_use]
    pub fn new(ref_id: impl Into<String>, highlight: HighlightCell) -> Self {
        Self {
            ref_id: ref_id.into(),
            highlight,
            on_highlight: None,
            on_select: None,
            on_scroll: None,
        }
    }

    /// Called after the highlight moved.
    #[must_use]
    pub fn on_highlight(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_highlight = Some(Box::new(f));
        self
    }

    /// Called when an item is activated.
    #[must_use]
    pub fn on_select(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    /// Called when a row should be scrolled into view.
    #[must_use]
    pub fn on_scroll(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_scroll = Some(Box::new(f));
        self
    }

    /// The shared highlight cell.
    #[must_use]
    pub fn highlight_cell(&self) -> &HighlightCell {
        &self.highlight
    }
}

impl fmt::Debug for CallbackHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackHost")
            .field("ref_id", &self.ref_id)
            .field("highlight", &self.highlight)
            .finish_non_exhaustive()
    }
}

impl NavigationHost for CallbackHost {
    fn highlighted(&self) -> Option<Highlight> {
        self.highlight.get()
    }

    fn set_highlighted_item_id(&mut self, item_id: &str) {
        self.highlight
            .set(Some(Highlight::new(self.ref_id.clone(), item_id)));
        if let Some(f) = self.on_highlight.as_mut() {
            f(item_id);
        }
    }

    fn select_item(&mut self, item_id: &str) {
        if let Some(f) = self.on_select.as_mut() {
            f(item_id);
        }
    }

    fn scroll_into_view(&mut self, item_id: &str) {
        if let Some(f) = self.on_scroll.as_mut() {
            f(item_id);
        }
    }
}
