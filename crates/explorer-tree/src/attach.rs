#![forbid(unsafe_code)]

//! Wiring a controller to a key-listener registry.
//!
//! [`KeyboardNavigation::attach`] subscribes the controller's key handler
//! and hands back a value that owns the subscription. Dropping it (the tree
//! instance going away) unsubscribes.

use std::cell::RefCell;
use std::rc::Rc;

use explorer_core::event::TargetedKeyEvent;
use explorer_core::listeners::{KeyListeners, ListenerGuard};
use web_time::Instant;

use crate::controller::ExpansionController;
use crate::highlight::NavigationHost;

/// An active keyboard subscription for one tree instance.
#[derive(Debug)]
#[must_use = "dropping KeyboardNavigation detaches the key handler"]
pub struct KeyboardNavigation {
    guard: ListenerGuard<TargetedKeyEvent>,
}

impl KeyboardNavigation {
    /// Subscribe `controller` to `listeners`, timestamping events with the
    /// wall clock.
    pub fn attach<H>(
        listeners: &KeyListeners<TargetedKeyEvent>,
        controller: Rc<RefCell<ExpansionController>>,
        host: Rc<RefCell<H>>,
    ) -> Self
    where
        H: NavigationHost + ?Sized + 'static,
    {
        Self::attach_with_clock(listeners, controller, host, Instant::now)
    }

    /// Like [`attach`](Self::attach), with an injected clock.
    ///
    /// An event that arrives while the controller or host is already
    /// borrowed (a host callback dispatching another key) is dropped.
    pub fn attach_with_clock<H, C>(
        listeners: &KeyListeners<TargetedKeyEvent>,
        controller: Rc<RefCell<ExpansionController>>,
        host: Rc<RefCell<H>>,
        clock: C,
    ) -> Self
    where
        H: NavigationHost + ?Sized + 'static,
        C: Fn() -> Instant + 'static,
    {
        let guard = listeners.subscribe(move |event: &TargetedKeyEvent| {
            let (Ok(mut controller), Ok(mut host)) =
                (controller.try_borrow_mut(), host.try_borrow_mut())
            else {
                tracing::trace!(message = "tree.key.reentrant");
                return;
            };
            controller.handle_key(event, clock(), &mut *host);
        });
        Self { guard }
    }

    /// Whether the handler is still registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.guard.is_active()
    }

    /// Unsubscribe now. Equivalent to dropping the value.
    pub fn detach(self) {}
}
