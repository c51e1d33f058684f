//! The Widget half of the Widget/Cog peer pair.

use crate::cog::Cog;
use injection_framework::{Component, LifecycleError, Required};
use tracing::info;

#[derive(Clone)]
pub struct WidgetDeps<'a> {
    pub cog: Required<'a, Cog<'a>>,
}

/// Holds a configured value and pokes its Cog whenever it is used.
#[derive(Default)]
pub struct Widget<'a> {
    deps: Option<WidgetDeps<'a>>,
    parameter_x: i32,
}

impl<'a> Component for Widget<'a> {
    type Dependencies = WidgetDeps<'a>;
    type InitArgs = i32;
    type Status = bool;
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &WidgetDeps<'a>, parameter_x: i32) -> bool {
        info!(parameter_x, "Widget initializing");
        self.deps = Some(deps.clone());
        self.parameter_x = parameter_x;
        true
    }

    fn shutdown(&mut self, _: ()) {
        info!("Widget shutting down");
    }
}

impl Widget<'_> {
    pub fn parameter_x(&self) -> i32 {
        self.parameter_x
    }

    /// Returns the configured value after calling back into the Cog.
    pub fn do_widget_thing(&self) -> Result<i32, LifecycleError> {
        info!(parameter_x = self.parameter_x, "Widget doing its thing");
        if let Some(deps) = &self.deps {
            deps.cog.access()?.do_cog_thing2();
        }
        Ok(self.parameter_x)
    }
}
