//! # Framework Errors
//!
//! This module defines the lifecycle contract violations reported by wrappers and proxies.
//! Every variant describes a mistake made by the *caller* (binding, initializing, or using
//! a component at the wrong moment), never a recoverable runtime condition. How they surface
//! (panic at the call site or an `Err` value) is decided by the installed
//! [`ErrorPolicy`](crate::policy::ErrorPolicy).

/// Contract violations detected by [`Injected`](crate::Injected) and the dependency proxies.
///
/// Each variant carries the short type name of the component involved so that log lines
/// and panic messages point at the offending wrapper.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// `initialize` was called before any dependencies descriptor was bound.
    #[error("{component}: dependencies were never bound")]
    DependenciesNotBound { component: &'static str },

    /// `bind` or `initialize` was called while the component is already live.
    #[error("{component}: already live")]
    AlreadyLive { component: &'static str },

    /// The component (or the target of a proxy) is not live.
    #[error("{component}: not live")]
    NotLive { component: &'static str },

    /// A required dependency was wired to an absent target.
    #[error("{component}: required dependency is missing")]
    MissingRequiredDependency { component: &'static str },

    /// A wrapper went out of scope without being shut down.
    #[error("{component}: destroyed while live")]
    DestroyedWhileLive { component: &'static str },

    /// The instance is already borrowed in a way that conflicts with this request.
    #[error("{component}: instance is already borrowed")]
    AlreadyBorrowed { component: &'static str },
}

impl LifecycleError {
    /// Name of the component the violation was reported against.
    pub fn component(&self) -> &'static str {
        match *self {
            LifecycleError::DependenciesNotBound { component }
            | LifecycleError::AlreadyLive { component }
            | LifecycleError::NotLive { component }
            | LifecycleError::MissingRequiredDependency { component }
            | LifecycleError::DestroyedWhileLive { component }
            | LifecycleError::AlreadyBorrowed { component } => component,
        }
    }
}

/// Errors raised while selecting the process-wide error policy.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("error policy already installed as {installed}, refusing {requested}")]
    AlreadyInstalled {
        installed: crate::policy::ErrorPolicy,
        requested: crate::policy::ErrorPolicy,
    },
    #[error("unknown error policy: {0}")]
    Unknown(String),
}
