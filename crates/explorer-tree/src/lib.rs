#![forbid(unsafe_code)]

//! Expansion state and keyboard navigation for the explorer sidebar tree.
//!
//! # Role in explorer
//! The sidebar shows one or more tree instances (the local stories plus any
//! composed refs). Each instance gets an [`ExpansionController`] that
//! decides which items are expanded, keeps the selected story's ancestry
//! open, and interprets arrow/Enter/Space keys on the highlighted row.
//!
//! The highlight itself belongs to the host ([`NavigationHost`]); the
//! controller reads it and requests changes, never stores it.
//!
//! # Example
//!
//! ```
//! use explorer_core::event::{KeyCode, KeyEvent, TargetedKeyEvent};
//! use explorer_tree::{
//!     CallbackHost, ExpansionController, Highlight, HighlightCell, Item, ItemKind, KeyOutcome,
//!     TreeData,
//! };
//! use web_time::Instant;
//!
//! let mut data = TreeData::new();
//! data.insert(Item::new("root", ItemKind::Root));
//! data.insert_child("root", Item::new("ui", ItemKind::Group));
//! data.insert_child("ui", Item::new("button", ItemKind::Component));
//!
//! let mut tree = ExpansionController::new("main", data, None);
//! let mut host = CallbackHost::new("main", HighlightCell::with(Highlight::new("main", "ui")));
//!
//! let right = TargetedKeyEvent::new(KeyEvent::new(KeyCode::Right));
//! let outcome = tree.handle_key(&right, Instant::now(), &mut host);
//! assert_eq!(outcome, KeyOutcome::Expanded(vec!["ui".to_owned()]));
//! assert!(tree.is_expanded("ui"));
//! ```

pub mod attach;
pub mod controller;
pub mod data;
pub mod highlight;
pub mod state;

pub use attach::KeyboardNavigation;
pub use controller::{ExpansionController, KeyOutcome, RenderedItem, initialize_expanded};
pub use data::{Item, ItemId, ItemKind, TreeData};
pub use highlight::{CallbackHost, Highlight, HighlightCell, NavigationHost};
pub use state::{ExpandAction, ExpansionState};
