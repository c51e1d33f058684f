//! # Injection Framework
//!
//! Lifecycle management and dependency injection for components that live in fixed,
//! caller-owned storage. No registry, no reflection, no heap allocation: each component
//! sits in an [`Injected`] wrapper, and components reach each other through borrowed,
//! liveness-checked proxies ([`Required`], [`Optional`]).
//!
//! ## Why a lifecycle wrapper?
//!
//! Wiring components together is easy; keeping them honest about *when* they may be used is
//! not. The wrapper turns the usual lifecycle mistakes into reported contract violations:
//!
//! - initializing before dependencies are bound ([`LifecycleError::DependenciesNotBound`])
//! - initializing twice, or rebinding while live ([`LifecycleError::AlreadyLive`])
//! - using a component that is not live ([`LifecycleError::NotLive`])
//! - wiring a required dependency to nothing ([`LifecycleError::MissingRequiredDependency`])
//! - letting a live component go out of scope ([`LifecycleError::DestroyedWhileLive`])
//!
//! A fresh instance is constructed on every `initialize`, so the
//! `initialize(); shutdown(); initialize();` sequence never leaks state from the first
//! live period into the second.
//!
//! ## Core Abstractions
//!
//! ### [`Component`] - The Contract
//!
//! A component names its dependencies descriptor and the arguments of its entry points:
//!
//! ```rust
//! use injection_framework::{Component, Injected, Optional, Required};
//!
//! #[derive(Default)]
//! struct Engine {
//!     rpm: u32,
//! }
//!
//! #[derive(Clone)]
//! struct CarDeps<'a> {
//!     engine: Required<'a, Engine>,
//!     trailer: Optional<'a, Engine>,
//! }
//!
//! #[derive(Default)]
//! struct Car<'a> {
//!     deps: Option<CarDeps<'a>>,
//! }
//!
//! impl Component for Engine {
//!     type Dependencies = injection_framework::NoDependencies;
//!     type InitArgs = u32;
//!     type Status = bool;
//!     type ShutdownArgs = ();
//!
//!     fn initialize(&mut self, _: &Self::Dependencies, rpm: u32) -> bool {
//!         self.rpm = rpm;
//!         true
//!     }
//!     fn shutdown(&mut self, _: ()) {}
//! }
//!
//! impl<'a> Component for Car<'a> {
//!     type Dependencies = CarDeps<'a>;
//!     type InitArgs = ();
//!     type Status = bool;
//!     type ShutdownArgs = ();
//!
//!     fn initialize(&mut self, deps: &CarDeps<'a>, _: ()) -> bool {
//!         self.deps = Some(deps.clone());
//!         true
//!     }
//!     fn shutdown(&mut self, _: ()) {}
//! }
//!
//! impl Car<'_> {
//!     fn speed(&self) -> Result<u32, injection_framework::LifecycleError> {
//!         let Some(deps) = &self.deps else { return Ok(0) };
//!         let rpm = deps.engine.access()?.rpm;
//!         // Optional dependencies are checked before use.
//!         let drag = if deps.trailer.is_live() { 10 } else { 0 };
//!         Ok(rpm / 100 - drag)
//!     }
//! }
//!
//! let engine = Injected::<Engine>::new();
//! let car = Injected::<Car>::new();
//!
//! engine.bind(injection_framework::NoDependencies).unwrap();
//! car.bind(CarDeps {
//!     engine: Required::new(&engine),
//!     trailer: Optional::none(),
//! })
//! .unwrap();
//!
//! engine.initialize(3000).unwrap();
//! car.initialize(()).unwrap();
//! assert_eq!(car.access().unwrap().speed().unwrap(), 30);
//!
//! car.shutdown(()).unwrap();
//! engine.shutdown(()).unwrap();
//! ```
//!
//! ### [`Injected`] - The Wrapper
//!
//! Owns the instance, the bound descriptor and the [`LivenessCell`]. See the [`injected`]
//! module for the state machine.
//!
//! ### [`Required`] / [`Optional`] - The Proxies
//!
//! Borrowed handles to other wrappers, typed by the interface they expose. See the
//! [`proxy`] module.
//!
//! ## Error Policy
//!
//! Violations either panic at the call site or come back as `Err`, depending on the single
//! process-wide [`ErrorPolicy`]. See the [`policy`] module.
//!
//! ## Concurrency Model
//!
//! None. Wrappers and proxies use `Cell`/`RefCell` and are therefore `!Sync`; the compiler
//! refuses to share them across threads.

pub mod component;
pub mod error;
pub mod injected;
pub mod liveness;
pub mod policy;
pub mod proxy;
pub mod tracing;

// Re-export core types for convenience
pub use component::{Component, NoDependencies, Provides};
pub use error::{LifecycleError, PolicyError};
pub use injected::{Injected, Target};
pub use liveness::{LifecycleState, LivenessCell};
pub use policy::ErrorPolicy;
pub use proxy::{Optional, Required};
