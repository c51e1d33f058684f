//! # Scenario Orchestration
//!
//! Each scenario owns its wrappers on the stack and walks them through the full lifecycle:
//!
//! 1. **Create** one wrapper per component (nothing constructed yet)
//! 2. **Wire** every descriptor from proxies pointing at sibling wrappers
//! 3. **Initialize** in an order where every Required target exists
//! 4. **Use** components only through their proxies
//! 5. **Shut down** every wrapper before it goes out of scope
//!
//! Wiring happens before anything is live, so peers that depend on each other (Widget and
//! Cog) need no special handling. Every wrapper is asked to shut down even when the use phase
//! or another wrapper's shutdown fails; the first failure is returned after all of them ran.

use crate::cog::{Cog, CogDeps};
use crate::counter::{CounterUser, CounterUserDeps, LeafCounter};
use crate::error::SampleError;
use crate::leaf::Branch;
use crate::widget::{Widget, WidgetDeps};
use injection_framework::{Injected, LifecycleError, NoDependencies, Optional, Required};
use tracing::{info, info_span, warn};

/// What the Cog saw during a peer scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerReport {
    /// Value returned by the Widget when the Cog called into it.
    pub observed: i32,
    /// Calls the Widget made back into the Cog.
    pub thing2_calls: u32,
}

fn ensure(status: bool, component: &'static str) -> Result<(), SampleError> {
    if status {
        Ok(())
    } else {
        Err(SampleError::InitFailed { component })
    }
}

/// Combines shutdown results collected before any of them is inspected.
fn settle<const N: usize>(stopped: [Result<(), LifecycleError>; N]) -> Result<(), SampleError> {
    let mut first = None;
    for err in stopped.into_iter().filter_map(Result::err) {
        warn!(error = %err, "Shutdown failed");
        first.get_or_insert(err);
    }
    match first {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Two peers that depend on each other: Cog is brought up first, then Widget.
pub fn run_peer_objects(parameter_x: i32) -> Result<PeerReport, SampleError> {
    let _span = info_span!("peer_objects", parameter_x).entered();

    let cog = Injected::<Cog>::new();
    let widget = Injected::<Widget>::new();

    cog.bind(CogDeps {
        widget: Required::new(&widget),
        optional_widget: Optional::none(),
    })?;
    widget.bind(WidgetDeps {
        cog: Required::new(&cog),
    })?;

    let outcome = (|| -> Result<PeerReport, SampleError> {
        ensure(cog.initialize(())?, "Cog")?;
        ensure(widget.initialize(parameter_x)?, "Widget")?;

        let active = cog.access()?;
        let observed = active.do_cog_thing()?;
        Ok(PeerReport {
            observed,
            thing2_calls: active.thing2_calls(),
        })
    })();

    settle([widget.shutdown(()), cog.shutdown(())])?;

    if let Ok(report) = &outcome {
        info!(observed = report.observed, "Peer scenario finished");
    }
    outcome
}

/// A Branch that drives its own nested Leaf. Returns one value per call.
pub fn run_nested(start: i32, calls: usize) -> Result<Vec<i32>, SampleError> {
    let _span = info_span!("nested", start).entered();

    let branch = Injected::<Branch>::new();
    branch.bind(NoDependencies)?;

    let outcome = (|| -> Result<Vec<i32>, SampleError> {
        branch.initialize(start)??;
        let values = (0..calls)
            .map(|_| branch.access().and_then(|active| active.do_thing()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    })();

    settle([branch.shutdown(())])?;
    outcome
}

/// A user that only knows the `SharedCounter` interface of its dependency.
pub fn run_interface(start: i32, calls: usize) -> Result<Vec<i32>, SampleError> {
    let _span = info_span!("interface", start).entered();

    let counter = Injected::<LeafCounter>::new();
    let user = Injected::<CounterUser>::new();

    counter.bind(NoDependencies)?;
    user.bind(CounterUserDeps {
        counter: Required::new(&counter),
    })?;

    let outcome = (|| -> Result<Vec<i32>, SampleError> {
        counter.initialize(start)??;
        ensure(user.initialize(())?, "CounterUser")?;
        let values = (0..calls)
            .map(|_| user.access().and_then(|active| active.do_thing()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    })();

    settle([counter.shutdown(()), user.shutdown(())])?;
    outcome
}

/// Runs the peer lifecycle `rounds` times over the same wrappers and descriptors.
///
/// Returns the Cog's call count observed in each round.
pub fn run_repeated_cycles(parameter_x: i32, rounds: usize) -> Result<Vec<u32>, SampleError> {
    let _span = info_span!("repeated_cycles", rounds).entered();

    let cog = Injected::<Cog>::new();
    let widget = Injected::<Widget>::new();

    cog.bind(CogDeps {
        widget: Required::new(&widget),
        optional_widget: Optional::new(&widget),
    })?;
    widget.bind(WidgetDeps {
        cog: Required::new(&cog),
    })?;

    let mut calls = Vec::with_capacity(rounds);
    for round in 0..rounds {
        let outcome = (|| -> Result<u32, SampleError> {
            ensure(cog.initialize(())?, "Cog")?;
            ensure(widget.initialize(parameter_x)?, "Widget")?;
            let active = cog.access()?;
            active.do_cog_thing()?;
            Ok(active.thing2_calls())
        })();

        settle([widget.shutdown(()), cog.shutdown(())])?;

        let count = outcome?;
        info!(round, count, "Cycle finished");
        calls.push(count);
    }
    Ok(calls)
}
