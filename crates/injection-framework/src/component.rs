//! # Component Contract
//!
//! The [`Component`] trait is what a type implements to be wrapped by
//! [`Injected`](crate::Injected). It names the component's dependencies descriptor, the
//! extra arguments of its initialization and shutdown entry points, and the status value
//! its initialization returns.
//!
//! # Architecture Note
//! The wrapper constructs a fresh instance with [`Default`] on every `initialize`, so a
//! component never carries state from one live period into the next. All real setup
//! belongs in [`Component::initialize`], which receives the bound descriptor.
//!
//! [`Provides`] is the interface seam: a proxy is typed by the interface it exposes, and any
//! wrapped component that provides that interface can be bound to it. The compiler checks
//! the conversion once, where the descriptor is built.

/// A type whose lifecycle is driven by an [`Injected`](crate::Injected) wrapper.
///
/// ```rust
/// use injection_framework::{Component, Injected, NoDependencies};
///
/// #[derive(Default)]
/// struct Counter {
///     value: u32,
/// }
///
/// impl Component for Counter {
///     type Dependencies = NoDependencies;
///     type InitArgs = u32;
///     type Status = bool;
///     type ShutdownArgs = ();
///
///     fn initialize(&mut self, _: &NoDependencies, start: u32) -> bool {
///         self.value = start;
///         true
///     }
///
///     fn shutdown(&mut self, _: ()) {}
/// }
///
/// let counter = Injected::<Counter>::new();
/// counter.bind(NoDependencies).unwrap();
/// assert!(counter.initialize(7).unwrap());
/// assert_eq!(counter.access().unwrap().value, 7);
/// counter.shutdown(()).unwrap();
/// ```
pub trait Component: Default {
    /// Aggregate of [`Optional`](crate::Optional)/[`Required`](crate::Required) proxies,
    /// copied into the wrapper on `bind`. Use [`NoDependencies`] for leaf components.
    type Dependencies: Clone;

    /// Extra arguments accepted by [`Component::initialize`]. Use `()` for none.
    type InitArgs;

    /// Value returned from [`Component::initialize`]. The wrapper passes it through
    /// without interpreting it.
    type Status;

    /// Extra arguments accepted by [`Component::shutdown`]. Use `()` for none.
    type ShutdownArgs;

    /// Initialization entry point, called on a freshly constructed instance.
    fn initialize(&mut self, deps: &Self::Dependencies, args: Self::InitArgs) -> Self::Status;

    /// Shutdown entry point, called right before the instance is dropped.
    fn shutdown(&mut self, args: Self::ShutdownArgs);
}

/// Dependencies descriptor for components that depend on nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDependencies;

/// Views a component as the interface `I` a proxy exposes.
///
/// Every type provides itself. Use [`provides!`](crate::provides) to let a component
/// stand in for a trait object.
pub trait Provides<I: ?Sized> {
    fn provide(&self) -> &I;
    fn provide_mut(&mut self) -> &mut I;
}

impl<T> Provides<T> for T {
    fn provide(&self) -> &T {
        self
    }

    fn provide_mut(&mut self) -> &mut T {
        self
    }
}

/// Declares that a component can be reached through one or more trait-object interfaces.
///
/// ```rust
/// use injection_framework::{provides, Provides};
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// provides!(English => dyn Greeter);
///
/// let english = English;
/// let greeter = <English as Provides<dyn Greeter>>::provide(&english);
/// assert_eq!(greeter.greet(), "hello");
/// ```
///
/// Components that borrow other wrappers (and so carry a lifetime) implement
/// [`Provides`] by hand.
#[macro_export]
macro_rules! provides {
    ($component:ty => $(dyn $interface:path),+ $(,)?) => {
        $(
            impl $crate::Provides<dyn $interface> for $component {
                fn provide(&self) -> &(dyn $interface + 'static) {
                    self
                }

                fn provide_mut(&mut self) -> &mut (dyn $interface + 'static) {
                    self
                }
            }
        )+
    };
}

/// Extracts the short type name (e.g., "Widget" instead of "injection_sample::widget::Widget<'_>").
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
