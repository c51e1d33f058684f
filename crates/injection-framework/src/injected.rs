//! # Lifecycle Wrapper
//!
//! This module defines [`Injected`], the container that owns one component instance and
//! drives its state machine:
//!
//! ```text
//!  Empty ──bind──▶ DepsBound ──initialize──▶ Live
//!                    ▲  │ ▲                   │
//!                    └──┘ └─────shutdown──────┘
//!                   rebind
//! ```
//!
//! The instance lives in an inline slot inside the wrapper. Nothing is boxed, nothing is
//! registered anywhere. A new instance is constructed on every `initialize`, and the slot is
//! emptied again on `shutdown`, so no state leaks from one live period into the next.
//!
//! All operations take `&self`. The state lives in cells, which lets several wrappers
//! hold proxies to each other (even in cycles) while still being bound, initialized and
//! shut down one by one.

use crate::component::{short_type_name, Component, Provides};
use crate::error::LifecycleError;
use crate::liveness::{LifecycleState, LivenessCell};
use crate::policy::raise;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use tracing::{debug, info, trace};

/// Storage for at most one component instance.
struct Slot<T> {
    instance: Option<T>,
}

impl<T> Slot<T> {
    const fn vacant() -> Self {
        Self { instance: None }
    }

    fn get(&self) -> Option<&T> {
        self.instance.as_ref()
    }

    fn get_mut(&mut self) -> Option<&mut T> {
        self.instance.as_mut()
    }

    fn fill(&mut self, value: T) -> &mut T {
        self.instance.insert(value)
    }

    fn clear(&mut self) -> Option<T> {
        self.instance.take()
    }
}

/// Lifecycle wrapper owning one instance of the component `T`.
///
/// # Usage Pattern
///
/// 1. **Create**: `Injected::new()` for every component, before any wiring.
/// 2. **Bind**: build each descriptor from proxies to the other wrappers and `bind` it.
/// 3. **Initialize**: in an order that suits the components; a proxy only needs its target
///    to exist, not to be live.
/// 4. **Use**: through `access`, or from other components through their proxies.
/// 5. **Shut down**: in any order, before the wrapper goes out of scope. The bound
///    descriptor is kept, so the component can be initialized again without rebinding.
///
/// ```rust
/// use injection_framework::{Component, Injected, NoDependencies};
///
/// #[derive(Default)]
/// struct Clock {
///     ticks: u64,
/// }
///
/// impl Component for Clock {
///     type Dependencies = NoDependencies;
///     type InitArgs = ();
///     type Status = ();
///     type ShutdownArgs = ();
///
///     fn initialize(&mut self, _: &NoDependencies, _: ()) {}
///     fn shutdown(&mut self, _: ()) {}
/// }
///
/// let clock = Injected::<Clock>::new();
/// clock.bind(NoDependencies).unwrap();
///
/// for _ in 0..3 {
///     clock.initialize(()).unwrap();
///     clock.access_mut().unwrap().ticks += 1;
///     // Every live period starts from a freshly constructed instance.
///     assert_eq!(clock.access().unwrap().ticks, 1);
///     clock.shutdown(()).unwrap();
/// }
/// ```
///
/// # Destruction
///
/// Dropping a wrapper while it is live is the `DestroyedWhileLive` violation. It is logged
/// and panics whatever the installed [`ErrorPolicy`](crate::ErrorPolicy); only a thread that
/// is already unwinding skips the panic. Call [`LivenessCell::check_release`] on
/// [`Injected::liveness`] to get the violation as an `Err` instead.
pub struct Injected<T: Component> {
    slot: RefCell<Slot<T>>,
    deps: RefCell<Option<T::Dependencies>>,
    liveness: LivenessCell,
}

impl<T: Component> Injected<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(Slot::vacant()),
            deps: RefCell::new(None),
            liveness: LivenessCell::new(short_type_name::<T>()),
        }
    }

    /// Short type name of the wrapped component.
    pub fn component(&self) -> &'static str {
        self.liveness.component()
    }

    pub fn state(&self) -> LifecycleState {
        self.liveness.state()
    }

    /// Whether the instance exists and may be used. Never fails.
    pub fn is_live(&self) -> bool {
        self.liveness.is_live()
    }

    /// Whether a dependencies descriptor has been bound at some point.
    pub fn has_dependencies(&self) -> bool {
        self.deps.try_borrow().map(|deps| deps.is_some()).unwrap_or(true)
    }

    /// The cell proxies watch to learn whether this wrapper is live.
    pub fn liveness(&self) -> &LivenessCell {
        &self.liveness
    }

    /// Stores the dependencies descriptor, replacing any previous one.
    ///
    /// # Errors
    /// [`LifecycleError::AlreadyLive`] if the component is live.
    #[track_caller]
    pub fn bind(&self, deps: T::Dependencies) -> Result<(), LifecycleError> {
        let component = self.component();
        if self.liveness.is_live() {
            return Err(raise(LifecycleError::AlreadyLive { component }));
        }
        let Ok(mut bound) = self.deps.try_borrow_mut() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };
        let rebind = bound.replace(deps).is_some();
        self.liveness.set(LifecycleState::DepsBound);
        debug!(component, rebind, "Dependencies bound");
        Ok(())
    }

    /// Constructs a fresh instance in the slot and runs its initialization entry point.
    ///
    /// The wrapper is live from the moment the instance is constructed, and stays live even
    /// if the returned status reports a failure: what the status means is up to the
    /// component, and shutting it down again is up to the caller.
    ///
    /// # Errors
    /// - [`LifecycleError::DependenciesNotBound`] if `bind` was never called.
    /// - [`LifecycleError::AlreadyLive`] if the component is live.
    #[track_caller]
    pub fn initialize(&self, args: T::InitArgs) -> Result<T::Status, LifecycleError> {
        let component = self.component();
        match self.liveness.state() {
            LifecycleState::Empty => {
                return Err(raise(LifecycleError::DependenciesNotBound { component }))
            }
            LifecycleState::Live => return Err(raise(LifecycleError::AlreadyLive { component })),
            LifecycleState::DepsBound => {}
        }

        let Ok(bound) = self.deps.try_borrow() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };
        let Some(deps) = bound.as_ref() else {
            return Err(raise(LifecycleError::DependenciesNotBound { component }));
        };
        let Ok(mut slot) = self.slot.try_borrow_mut() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };

        let instance = slot.fill(T::default());
        self.liveness.set(LifecycleState::Live);
        info!(component, "Initialized");
        Ok(instance.initialize(deps, args))
    }

    /// Runs the shutdown entry point, drops the instance and empties the slot.
    ///
    /// Does nothing if the component is not live. The bound descriptor is kept.
    ///
    /// # Errors
    /// [`LifecycleError::AlreadyBorrowed`] if the instance is still borrowed through
    /// [`Injected::access`] or a proxy.
    #[track_caller]
    pub fn shutdown(&self, args: T::ShutdownArgs) -> Result<(), LifecycleError> {
        let component = self.component();
        if !self.liveness.is_live() {
            trace!(component, "Shutdown skipped, not live");
            return Ok(());
        }
        let Ok(mut slot) = self.slot.try_borrow_mut() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };

        if let Some(instance) = slot.get_mut() {
            instance.shutdown(args);
        }
        drop(slot.clear());
        self.liveness.set(LifecycleState::DepsBound);
        info!(component, "Shutdown");
        Ok(())
    }

    /// Shared access to the live instance.
    ///
    /// # Errors
    /// - [`LifecycleError::NotLive`] unless the component is live.
    /// - [`LifecycleError::AlreadyBorrowed`] if the instance is exclusively borrowed.
    #[track_caller]
    pub fn access(&self) -> Result<Ref<'_, T>, LifecycleError> {
        self.project::<T>()
    }

    /// Exclusive access to the live instance.
    ///
    /// # Errors
    /// - [`LifecycleError::NotLive`] unless the component is live.
    /// - [`LifecycleError::AlreadyBorrowed`] if any other borrow is outstanding.
    #[track_caller]
    pub fn access_mut(&self) -> Result<RefMut<'_, T>, LifecycleError> {
        self.project_mut::<T>()
    }

    #[track_caller]
    fn project<I: ?Sized>(&self) -> Result<Ref<'_, I>, LifecycleError>
    where
        T: Provides<I>,
    {
        let component = self.component();
        if !self.liveness.is_live() {
            return Err(raise(LifecycleError::NotLive { component }));
        }
        let Ok(slot) = self.slot.try_borrow() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };
        match Ref::filter_map(slot, |slot| {
            slot.get()
                .map(|instance| <T as Provides<I>>::provide(instance))
        }) {
            Ok(view) => Ok(view),
            Err(_) => Err(raise(LifecycleError::NotLive { component })),
        }
    }

    #[track_caller]
    fn project_mut<I: ?Sized>(&self) -> Result<RefMut<'_, I>, LifecycleError>
    where
        T: Provides<I>,
    {
        let component = self.component();
        if !self.liveness.is_live() {
            return Err(raise(LifecycleError::NotLive { component }));
        }
        let Ok(slot) = self.slot.try_borrow_mut() else {
            return Err(raise(LifecycleError::AlreadyBorrowed { component }));
        };
        match RefMut::filter_map(slot, |slot| {
            slot.get_mut()
                .map(|instance| <T as Provides<I>>::provide_mut(instance))
        }) {
            Ok(view) => Ok(view),
            Err(_) => Err(raise(LifecycleError::NotLive { component })),
        }
    }
}

impl<T: Component> Default for Injected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> fmt::Debug for Injected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("component", &self.component())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Object-safe view of a wrapper whose component provides the interface `I`.
///
/// Proxies hold a `&dyn Target<I>`, which erases the concrete component type and leaves only
/// what a dependent needs: the liveness cell and liveness-checked access.
pub trait Target<I: ?Sized> {
    fn liveness(&self) -> &LivenessCell;

    fn view(&self) -> Result<Ref<'_, I>, LifecycleError>;

    fn view_mut(&self) -> Result<RefMut<'_, I>, LifecycleError>;
}

impl<T, I> Target<I> for Injected<T>
where
    T: Component + Provides<I>,
    I: ?Sized,
{
    fn liveness(&self) -> &LivenessCell {
        &self.liveness
    }

    #[track_caller]
    fn view(&self) -> Result<Ref<'_, I>, LifecycleError> {
        self.project::<I>()
    }

    #[track_caller]
    fn view_mut(&self) -> Result<RefMut<'_, I>, LifecycleError> {
        self.project_mut::<I>()
    }
}
