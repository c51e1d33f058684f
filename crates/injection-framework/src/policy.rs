//! # Error Policy
//!
//! Contract violations can surface in one of two ways, and a process picks exactly one:
//!
//! | Policy | Behavior | Typical use |
//! |--------|----------|-------------|
//! | [`ErrorPolicy::Panic`] | Panic at the offending call site | Tests, development |
//! | [`ErrorPolicy::Report`] | Return `Err(LifecycleError)` | Production code that reacts to misuse |
//!
//! The policy is process-wide and is fixed the first time it is read or installed.
//! It never depends on `debug_assertions`, so a debug and a release build of the same
//! program treat a violation the same way.
//!
//! ```rust
//! use injection_framework::ErrorPolicy;
//!
//! // Pick the policy once, at startup.
//! ErrorPolicy::install(ErrorPolicy::Report).unwrap();
//! assert_eq!(ErrorPolicy::current(), ErrorPolicy::Report);
//!
//! // Installing the same policy again is harmless, a different one is refused.
//! assert!(ErrorPolicy::install(ErrorPolicy::Report).is_ok());
//! assert!(ErrorPolicy::install(ErrorPolicy::Panic).is_err());
//! ```
//!
//! Every violation is logged at `error` level whichever policy is active.

use crate::error::{LifecycleError, PolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{error, info};

/// Environment variable read by [`ErrorPolicy::from_env`].
pub const POLICY_ENV_VAR: &str = "INJECTION_ERROR_POLICY";

static POLICY: OnceLock<ErrorPolicy> = OnceLock::new();

/// How contract violations are surfaced to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Fail fast and loud at the call site.
    Panic,
    /// Hand the violation back as an `Err` value.
    #[default]
    Report,
}

impl ErrorPolicy {
    /// Installs the process-wide policy.
    ///
    /// Succeeds if no policy was fixed yet, or if the same policy is already in place.
    pub fn install(policy: ErrorPolicy) -> Result<(), PolicyError> {
        let installed = *POLICY.get_or_init(|| policy);
        if installed != policy {
            return Err(PolicyError::AlreadyInstalled {
                installed,
                requested: policy,
            });
        }
        info!(%policy, "Error policy installed");
        Ok(())
    }

    /// Reads the policy from [`POLICY_ENV_VAR`]. An unset variable means the default.
    pub fn from_env() -> Result<ErrorPolicy, PolicyError> {
        match std::env::var(POLICY_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(ErrorPolicy::default()),
        }
    }

    /// Reads the policy from the environment and installs it.
    pub fn install_from_env() -> Result<ErrorPolicy, PolicyError> {
        let policy = ErrorPolicy::from_env()?;
        ErrorPolicy::install(policy)?;
        Ok(policy)
    }

    /// The policy in effect. Fixes the default policy if none was installed.
    pub fn current() -> ErrorPolicy {
        *POLICY.get_or_init(ErrorPolicy::default)
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Panic => f.write_str("panic"),
            ErrorPolicy::Report => f.write_str("report"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panic" => Ok(ErrorPolicy::Panic),
            "report" => Ok(ErrorPolicy::Report),
            other => Err(PolicyError::Unknown(other.to_string())),
        }
    }
}

/// Logs a violation and applies the current policy.
///
/// Under [`ErrorPolicy::Panic`] this does not return. Otherwise the error is handed back
/// so the caller can wrap it in `Err`.
#[track_caller]
pub(crate) fn raise(err: LifecycleError) -> LifecycleError {
    let location = std::panic::Location::caller();
    error!(component = err.component(), error = %err, %location, "Lifecycle violation");
    if ErrorPolicy::current() == ErrorPolicy::Panic {
        panic!("{err}");
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("panic", ErrorPolicy::Panic)]
    #[case("report", ErrorPolicy::Report)]
    #[case(" Panic ", ErrorPolicy::Panic)]
    #[case("REPORT", ErrorPolicy::Report)]
    fn parses_policy_names(#[case] input: &str, #[case] expected: ErrorPolicy) {
        assert_eq!(input.parse::<ErrorPolicy>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert_eq!(
            "abort".parse::<ErrorPolicy>(),
            Err(PolicyError::Unknown("abort".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for policy in [ErrorPolicy::Panic, ErrorPolicy::Report] {
            assert_eq!(policy.to_string().parse::<ErrorPolicy>(), Ok(policy));
        }
    }

    #[rstest]
    #[case(ErrorPolicy::Panic, "\"panic\"")]
    #[case(ErrorPolicy::Report, "\"report\"")]
    fn serializes_lowercase_names(#[case] policy: ErrorPolicy, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&policy).unwrap(), json);
        assert_eq!(serde_json::from_str::<ErrorPolicy>(json).unwrap(), policy);
    }

    #[test]
    fn reads_the_policy_from_a_config_value() {
        use serde::de::value::{Error, StrDeserializer};
        use serde::de::IntoDeserializer;

        let value: StrDeserializer<'_, Error> = "panic".into_deserializer();
        assert_eq!(ErrorPolicy::deserialize(value), Ok(ErrorPolicy::Panic));

        #[derive(Deserialize)]
        struct Config {
            policy: ErrorPolicy,
        }
        let config: Config = serde_json::from_str(r#"{ "policy": "report" }"#).unwrap();
        assert_eq!(config.policy, ErrorPolicy::Report);
        assert!(serde_json::from_str::<ErrorPolicy>("\"Panic\"").is_err());
    }

    #[test]
    fn default_is_report_and_sticks() {
        // Unit tests in this crate never install a policy, so the default is fixed.
        assert_eq!(ErrorPolicy::current(), ErrorPolicy::Report);
        assert!(ErrorPolicy::install(ErrorPolicy::Report).is_ok());
        assert_eq!(
            ErrorPolicy::install(ErrorPolicy::Panic),
            Err(PolicyError::AlreadyInstalled {
                installed: ErrorPolicy::Report,
                requested: ErrorPolicy::Panic,
            })
        );
    }

    #[test]
    fn report_hands_the_error_back() {
        let err = LifecycleError::NotLive { component: "Leaf" };
        assert_eq!(raise(err), err);
    }
}
