use injection_framework::LifecycleError;

/// Errors surfaced by the sample scenarios.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("lifecycle violation: {0}")]
    Lifecycle(#[from] LifecycleError),

    #[error("{component} reported a failed initialization")]
    InitFailed { component: &'static str },
}
