//! Nesting: a Branch owns the wrapper of its Leaf and drives it from its own lifecycle.

use injection_framework::{Component, Injected, LifecycleError, NoDependencies};
use std::cell::Cell;
use tracing::{info, warn};

/// Counts up from the value it was initialized with.
#[derive(Default)]
pub struct Leaf {
    value: Cell<i32>,
}

impl Component for Leaf {
    type Dependencies = NoDependencies;
    type InitArgs = i32;
    type Status = ();
    type ShutdownArgs = ();

    fn initialize(&mut self, _: &NoDependencies, start: i32) {
        info!(start, "Leaf initializing");
        self.value.set(start);
    }

    fn shutdown(&mut self, _: ()) {
        info!(value = self.value.get(), "Leaf shutting down");
    }
}

impl Leaf {
    /// Increments the value and returns the new one.
    pub fn do_thing(&self) -> i32 {
        let next = self.value.get() + 1;
        self.value.set(next);
        next
    }
}

/// Brings a private Leaf up and down with itself.
#[derive(Default)]
pub struct Branch {
    leaf: Injected<Leaf>,
}

/// Binds and initializes a Leaf owned by another component.
pub(crate) fn start_nested(leaf: &Injected<Leaf>, start: i32) -> Result<(), LifecycleError> {
    leaf.bind(NoDependencies)?;
    leaf.initialize(start)
}

pub(crate) fn stop_nested(leaf: &Injected<Leaf>) {
    if let Err(err) = leaf.shutdown(()) {
        warn!(error = %err, "Nested leaf did not shut down cleanly");
    }
}

impl Branch {
    pub fn do_thing(&self) -> Result<i32, LifecycleError> {
        Ok(self.leaf.access()?.do_thing())
    }
}

impl Component for Branch {
    type Dependencies = NoDependencies;
    type InitArgs = i32;
    type Status = Result<(), LifecycleError>;
    type ShutdownArgs = ();

    fn initialize(&mut self, _: &NoDependencies, start: i32) -> Self::Status {
        info!(start, "Branch initializing");
        start_nested(&self.leaf, start)
    }

    fn shutdown(&mut self, _: ()) {
        info!("Branch shutting down");
        stop_nested(&self.leaf);
    }
}
