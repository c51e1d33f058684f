//! The Cog half of the Widget/Cog peer pair.

use crate::widget::Widget;
use injection_framework::{Component, LifecycleError, Optional, Required};
use std::cell::Cell;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CogDeps<'a> {
    pub widget: Required<'a, Widget<'a>>,
    /// Usually left unset; consulted only when live.
    pub optional_widget: Optional<'a, Widget<'a>>,
}

#[derive(Default)]
pub struct Cog<'a> {
    deps: Option<CogDeps<'a>>,
    thing2_calls: Cell<u32>,
}

impl<'a> Component for Cog<'a> {
    type Dependencies = CogDeps<'a>;
    type InitArgs = ();
    type Status = bool;
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &CogDeps<'a>, _: ()) -> bool {
        info!("Cog initializing");
        self.deps = Some(deps.clone());
        true
    }

    fn shutdown(&mut self, _: ()) {
        info!(thing2_calls = self.thing2_calls.get(), "Cog shutting down");
    }
}

impl Cog<'_> {
    /// Asks the required Widget (and the optional one, when live) for its value.
    ///
    /// Returns the sum of the values observed.
    pub fn do_cog_thing(&self) -> Result<i32, LifecycleError> {
        info!("Cog doing its thing");
        let Some(deps) = &self.deps else {
            return Ok(0);
        };

        let mut observed = deps.widget.access()?.do_widget_thing()?;
        if deps.optional_widget.is_live() {
            observed += deps.optional_widget.access()?.do_widget_thing()?;
        } else {
            debug!("Optional widget not live, skipping");
        }
        Ok(observed)
    }

    pub fn do_cog_thing2(&self) {
        let calls = self.thing2_calls.get() + 1;
        self.thing2_calls.set(calls);
        debug!(calls, "Cog doing its second thing");
    }

    /// How many times `do_cog_thing2` ran during the current live period.
    pub fn thing2_calls(&self) -> u32 {
        self.thing2_calls.get()
    }
}
