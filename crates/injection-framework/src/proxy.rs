//! # Dependency Proxies
//!
//! A proxy is the handle one component keeps to reach another. It never owns the target and
//! never copies its state: it holds a borrowed [`Target`] view of the target's wrapper and
//! re-checks the target's liveness on every use.
//!
//! | Proxy | Absent target | Dead target |
//! |-------|---------------|-------------|
//! | [`Optional`] | allowed, permanently inert | `is_live()` is false, `access()` fails |
//! | [`Required`] | rejected at wiring time | `is_live()` is false, `access()` fails |
//!
//! Because a proxy only borrows the wrapper, descriptors can be built and bound before either
//! side is initialized, and the borrow checker makes sure no proxy outlives its target.
//!
//! Proxies are typed by the *interface* they expose. `Required<'a, Cog>` reaches a concrete
//! component, `Required<'a, dyn Counter>` reaches any wrapped component that
//! [`Provides`] `dyn Counter`.

use crate::component::{short_type_name, Component, Provides};
use crate::error::LifecycleError;
use crate::injected::{Injected, Target};
use crate::policy::raise;
use std::cell::{Ref, RefMut};
use std::fmt;

/// A dependency that may be left unset.
///
/// ```rust
/// use injection_framework::{LifecycleError, Optional};
///
/// let unset = Optional::<u32>::none();
/// assert!(!unset.is_live());
/// assert!(matches!(unset.access(), Err(LifecycleError::NotLive { .. })));
/// ```
pub struct Optional<'a, I: ?Sized> {
    target: Option<&'a dyn Target<I>>,
}

impl<'a, I: ?Sized> Optional<'a, I> {
    /// A proxy with no target. Never live.
    pub fn none() -> Self {
        Self { target: None }
    }

    /// A proxy to the component held by `wrapper`, viewed as `I`.
    pub fn new<T>(wrapper: &'a Injected<T>) -> Self
    where
        T: Component + Provides<I> + 'a,
    {
        let target: &'a dyn Target<I> = wrapper;
        Self {
            target: Some(target),
        }
    }

    pub fn from_option(target: Option<&'a dyn Target<I>>) -> Self {
        Self { target }
    }

    /// Whether a target was wired in at all, live or not.
    pub fn is_set(&self) -> bool {
        self.target.is_some()
    }

    /// Reads the target's liveness now. Always false without a target.
    ///
    /// The target counts as live from the moment its instance is constructed. While the
    /// target's own `initialize` or `shutdown` entry point is still running, `is_live()`
    /// is true but [`Optional::access`] fails with [`LifecycleError::AlreadyBorrowed`].
    pub fn is_live(&self) -> bool {
        self.target
            .is_some_and(|target| target.liveness().is_live())
    }

    /// Shared access to the target.
    ///
    /// # Errors
    /// - [`LifecycleError::NotLive`] without a target or while the target is not live.
    /// - [`LifecycleError::AlreadyBorrowed`] if the target is exclusively borrowed.
    #[track_caller]
    pub fn access(&self) -> Result<Ref<'a, I>, LifecycleError> {
        match self.target {
            Some(target) => target.view(),
            None => Err(raise(LifecycleError::NotLive {
                component: short_type_name::<I>(),
            })),
        }
    }

    /// Exclusive access to the target.
    ///
    /// # Errors
    /// As [`Optional::access`], and [`LifecycleError::AlreadyBorrowed`] if any other borrow
    /// of the target is outstanding.
    #[track_caller]
    pub fn access_mut(&self) -> Result<RefMut<'a, I>, LifecycleError> {
        match self.target {
            Some(target) => target.view_mut(),
            None => Err(raise(LifecycleError::NotLive {
                component: short_type_name::<I>(),
            })),
        }
    }
}

impl<I: ?Sized> Default for Optional<'_, I> {
    fn default() -> Self {
        Self::none()
    }
}

impl<I: ?Sized> Clone for Optional<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for Optional<'_, I> {}

impl<I: ?Sized> fmt::Debug for Optional<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optional")
            .field("interface", &short_type_name::<I>())
            .field("target", &self.target.map(|target| target.liveness()))
            .finish()
    }
}

/// A dependency that must be wired to an existing wrapper.
///
/// The presence check happens once, when the proxy is built. Liveness is still checked on
/// every use, exactly as for [`Optional`].
pub struct Required<'a, I: ?Sized> {
    target: &'a dyn Target<I>,
}

impl<'a, I: ?Sized> Required<'a, I> {
    /// A proxy to the component held by `wrapper`, viewed as `I`. A reference is never
    /// absent, so this cannot fail.
    pub fn new<T>(wrapper: &'a Injected<T>) -> Self
    where
        T: Component + Provides<I> + 'a,
    {
        Self { target: wrapper }
    }

    /// Builds a proxy from a target that may be absent.
    ///
    /// # Errors
    /// [`LifecycleError::MissingRequiredDependency`] if `target` is `None`.
    #[track_caller]
    pub fn from_option(target: Option<&'a dyn Target<I>>) -> Result<Self, LifecycleError> {
        match target {
            Some(target) => Ok(Self { target }),
            None => Err(raise(LifecycleError::MissingRequiredDependency {
                component: short_type_name::<I>(),
            })),
        }
    }

    /// Wiring a required dependency to nothing. Always fails with
    /// [`LifecycleError::MissingRequiredDependency`].
    #[track_caller]
    pub fn absent() -> Result<Self, LifecycleError> {
        Self::from_option(None)
    }

    /// Reads the target's liveness now.
    ///
    /// As with [`Optional::is_live`], a target whose entry point is still running reports
    /// live while [`Required::access`] fails with [`LifecycleError::AlreadyBorrowed`].
    pub fn is_live(&self) -> bool {
        self.target.liveness().is_live()
    }

    /// Shared access to the target.
    ///
    /// # Errors
    /// - [`LifecycleError::NotLive`] while the target is not live.
    /// - [`LifecycleError::AlreadyBorrowed`] if the target is exclusively borrowed.
    #[track_caller]
    pub fn access(&self) -> Result<Ref<'a, I>, LifecycleError> {
        self.target.view()
    }

    /// Exclusive access to the target.
    #[track_caller]
    pub fn access_mut(&self) -> Result<RefMut<'a, I>, LifecycleError> {
        self.target.view_mut()
    }
}

impl<I: ?Sized> Clone for Required<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized> Copy for Required<'_, I> {}

impl<I: ?Sized> fmt::Debug for Required<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Required")
            .field("interface", &short_type_name::<I>())
            .field("target", self.target.liveness())
            .finish()
    }
}

impl<'a, I: ?Sized> From<Required<'a, I>> for Optional<'a, I> {
    fn from(required: Required<'a, I>) -> Self {
        Self {
            target: Some(required.target),
        }
    }
}
