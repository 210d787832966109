#![forbid(unsafe_code)]

//! Scoped key-listener registration.
//!
//! A [`KeyListeners`] registry plays the role of a document-level keydown
//! listener list. [`subscribe`](KeyListeners::subscribe) returns a
//! [`ListenerGuard`]; the handler stays registered exactly as long as the
//! guard lives, so tearing down a component releases its subscription no
//! matter how the teardown was triggered.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): handlers run
//! synchronously on the dispatching thread, one after another.
//!
//! ```
//! use explorer_core::listeners::KeyListeners;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let listeners = KeyListeners::<u32>::new();
//! let seen = Rc::new(Cell::new(0));
//! let guard = {
//!     let seen = Rc::clone(&seen);
//!     listeners.subscribe(move |n| seen.set(seen.get() + n))
//! };
//! assert_eq!(listeners.dispatch(&2), 1);
//! drop(guard);
//! assert_eq!(listeners.dispatch(&2), 0);
//! assert_eq!(seen.get(), 2);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::TargetedKeyEvent;

/// Identifier of a registered listener.
pub type ListenerId = u64;

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Registry<E> {
    next_id: ListenerId,
    handlers: Vec<(ListenerId, Handler<E>)>,
}

impl<E> Registry<E> {
    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(hid, _)| *hid != id);
        self.handlers.len() != before
    }
}

/// Registry of key handlers.
///
/// Cloning shares the registry.
pub struct KeyListeners<E = TargetedKeyEvent> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for KeyListeners<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: 'static> Default for KeyListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for KeyListeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyListeners")
            .field("len", &self.inner.borrow().handlers.len())
            .finish()
    }
}

impl<E: 'static> KeyListeners<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register a handler. It stays registered until the guard is dropped.
    #[must_use = "dropping the guard unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> ListenerGuard<E> {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id = registry.next_id.wrapping_add(1);
        let handler: Handler<E> = Rc::new(RefCell::new(handler));
        registry.handlers.push((id, handler));
        ListenerGuard {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every handler, in registration order.
    ///
    /// Handlers may subscribe or unsubscribe while the event is being
    /// delivered; changes take effect from the next dispatch. A handler
    /// that re-enters `dispatch` is skipped for the nested event.
    ///
    /// Returns the number of handlers that ran.
    pub fn dispatch(&self, event: &E) -> usize {
        let snapshot: Vec<Handler<E>> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        let mut ran = 0;
        for handler in snapshot {
            if let Ok(mut handler) = handler.try_borrow_mut() {
                (*handler)(event);
                ran += 1;
            }
        }
        ran
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a handler registered. Dropping it unsubscribes.
pub struct ListenerGuard<E = TargetedKeyEvent> {
    id: ListenerId,
    registry: Weak<RefCell<Registry<E>>>,
}

impl<E> ListenerGuard<E> {
    /// The listener's id.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the handler is still registered.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().handlers.iter().any(|(id, _)| *id == self.id))
    }

    /// Unsubscribe now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl<E> fmt::Debug for ListenerGuard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl<E> Drop for ListenerGuard<E> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade()
            && let Ok(mut registry) = registry.try_borrow_mut()
        {
            registry.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn new_registry_is_empty() {
        let listeners = KeyListeners::<u8>::new();
        assert!(listeners.is_empty());
        assert_eq!(listeners.dispatch(&1), 0);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let listeners = KeyListeners::<u8>::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let _a = {
            let order = Rc::clone(&order);
            listeners.subscribe(move |_| order.borrow_mut().push('a'))
        };
        let _b = {
            let order = Rc::clone(&order);
            listeners.subscribe(move |_| order.borrow_mut().push('b'))
        };
        assert_eq!(listeners.dispatch(&0), 2);
        assert_eq!(*order.borrow(), vec!['a', 'b']);
    }

    #[test]
    fn dropping_guard_unsubscribes() {
        let listeners = KeyListeners::<u8>::new();
        let hits = Rc::new(Cell::new(0));
        let guard = {
            let hits = Rc::clone(&hits);
            listeners.subscribe(move |_| hits.set(hits.get() + 1))
        };
        assert!(guard.is_active());
        listeners.dispatch(&0);
        guard.unsubscribe();
        listeners.dispatch(&0);
        assert_eq!(hits.get(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let listeners = KeyListeners::<u8>::new();
        let guard = listeners.subscribe(|_| {});
        drop(listeners);
        assert!(!guard.is_active());
        drop(guard);
    }

    #[test]
    fn handler_may_unsubscribe_itself_during_dispatch() {
        let listeners = KeyListeners::<u8>::new();
        let slot: Rc<RefCell<Option<ListenerGuard<u8>>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));
        let guard = {
            let slot = Rc::clone(&slot);
            let hits = Rc::clone(&hits);
            listeners.subscribe(move |_| {
                hits.set(hits.get() + 1);
                slot.borrow_mut().take();
            })
        };
        *slot.borrow_mut() = Some(guard);
        listeners.dispatch(&0);
        listeners.dispatch(&0);
        assert_eq!(hits.get(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn ids_are_distinct() {
        let listeners = KeyListeners::<u8>::new();
        let a = listeners.subscribe(|_| {});
        let b = listeners.subscribe(|_| {});
        assert_ne!(a.id(), b.id());
        assert_eq!(listeners.len(), 2);
    }
}
