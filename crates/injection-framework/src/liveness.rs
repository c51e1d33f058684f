//! # Liveness Cell
//!
//! The small piece of state a dependency proxy actually watches. It lives inside every
//! [`Injected`](crate::Injected) wrapper and records which [`LifecycleState`] the wrapper
//! is in. Proxies read it by reference, so they always see the *current* state, no matter
//! when the proxy itself was built.
//!
//! The cell carries no lifetime or type parameter. That keeps the destroy-while-live check
//! in its `Drop` impl independent of the component type, which lets wrappers reference each
//! other in cycles without upsetting the drop checker.
//!
//! Dropping a cell that is still `Live` is fatal under every
//! [`ErrorPolicy`](crate::ErrorPolicy): `Drop` has no way to hand an error back, so the
//! violation is logged and then panics. Code running under
//! [`ErrorPolicy::Report`](crate::ErrorPolicy::Report) that wants an `Err` instead calls
//! [`LivenessCell::check_release`] before letting the wrapper go.

use crate::error::LifecycleError;
use crate::policy::raise;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use tracing::{error, trace};

/// The three states of the wrapper state machine.
///
/// Legal transitions: `Empty → DepsBound`, `DepsBound → DepsBound` (rebind),
/// `DepsBound → Live`, `Live → DepsBound`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LifecycleState {
    /// Nothing bound, nothing constructed.
    #[default]
    Empty,
    /// A dependencies descriptor is bound; no instance exists.
    DepsBound,
    /// The instance is constructed and initialized.
    Live,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Empty => f.write_str("empty"),
            LifecycleState::DepsBound => f.write_str("deps-bound"),
            LifecycleState::Live => f.write_str("live"),
        }
    }
}

/// Shared, independently readable record of a wrapper's state.
pub struct LivenessCell {
    state: Cell<LifecycleState>,
    component: &'static str,
}

impl LivenessCell {
    pub fn new(component: &'static str) -> Self {
        Self {
            state: Cell::new(LifecycleState::Empty),
            component,
        }
    }

    /// Short type name of the component this cell tracks.
    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn state(&self) -> LifecycleState {
        self.state.get()
    }

    /// Whether the referent is currently usable.
    pub fn is_live(&self) -> bool {
        self.state.get() == LifecycleState::Live
    }

    pub(crate) fn set(&self, next: LifecycleState) {
        let previous = self.state.replace(next);
        trace!(component = self.component, %previous, %next, "State change");
    }

    /// Checks that the tracked wrapper may be released.
    ///
    /// Fails with [`LifecycleError::DestroyedWhileLive`] while the state is `Live`.
    #[track_caller]
    pub fn check_release(&self) -> Result<(), LifecycleError> {
        if self.is_live() {
            return Err(raise(LifecycleError::DestroyedWhileLive {
                component: self.component,
            }));
        }
        Ok(())
    }
}

impl fmt::Debug for LivenessCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessCell")
            .field("component", &self.component)
            .field("state", &self.state.get())
            .finish()
    }
}

impl Drop for LivenessCell {
    fn drop(&mut self) {
        if !self.is_live() {
            return;
        }
        let err = LifecycleError::DestroyedWhileLive {
            component: self.component,
        };
        error!(component = self.component, error = %err, "Lifecycle violation");
        // A second panic while unwinding would abort; keep the first failure.
        if std::thread::panicking() {
            return;
        }
        panic!("{err}");
    }
}
