//! Interface-typed dependencies: the user only knows `dyn SharedCounter`.

use crate::leaf::{start_nested, stop_nested, Leaf};
use injection_framework::{provides, Component, Injected, LifecycleError, NoDependencies, Required};
use tracing::info;

/// Something that hands out increasing numbers.
pub trait SharedCounter {
    fn do_thing(&self) -> Result<i32, LifecycleError>;
}

/// A [`SharedCounter`] backed by a nested [`Leaf`].
#[derive(Default)]
pub struct LeafCounter {
    leaf: Injected<Leaf>,
}

impl SharedCounter for LeafCounter {
    fn do_thing(&self) -> Result<i32, LifecycleError> {
        Ok(self.leaf.access()?.do_thing())
    }
}

provides!(LeafCounter => dyn SharedCounter);

impl Component for LeafCounter {
    type Dependencies = NoDependencies;
    type InitArgs = i32;
    type Status = Result<(), LifecycleError>;
    type ShutdownArgs = ();

    fn initialize(&mut self, _: &NoDependencies, start: i32) -> Self::Status {
        info!(start, "LeafCounter initializing");
        start_nested(&self.leaf, start)
    }

    fn shutdown(&mut self, _: ()) {
        info!("LeafCounter shutting down");
        stop_nested(&self.leaf);
    }
}

#[derive(Clone)]
pub struct CounterUserDeps<'a> {
    pub counter: Required<'a, dyn SharedCounter>,
}

#[derive(Default)]
pub struct CounterUser<'a> {
    deps: Option<CounterUserDeps<'a>>,
}

impl<'a> Component for CounterUser<'a> {
    type Dependencies = CounterUserDeps<'a>;
    type InitArgs = ();
    type Status = bool;
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &CounterUserDeps<'a>, _: ()) -> bool {
        info!("CounterUser initializing");
        self.deps = Some(deps.clone());
        true
    }

    fn shutdown(&mut self, _: ()) {
        info!("CounterUser shutting down");
    }
}

impl CounterUser<'_> {
    pub fn do_thing(&self) -> Result<i32, LifecycleError> {
        match &self.deps {
            Some(deps) => deps.counter.access()?.do_thing(),
            None => Ok(0),
        }
    }
}
