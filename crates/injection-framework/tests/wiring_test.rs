use injection_framework::{
    Component, ErrorPolicy, Injected, LifecycleError, LifecycleState, NoDependencies, Optional,
    Required,
};
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

// --- Test Components ---
//
// Ping and Pong reference each other, which is the case the wrapper has to support
// without any registry: both descriptors are bound before either side is live.

#[derive(Clone)]
struct PingDeps<'a> {
    pong: Required<'a, Pong<'a>>,
}

#[derive(Default)]
struct Ping<'a> {
    deps: Option<PingDeps<'a>>,
    served: Cell<u32>,
}

impl<'a> Component for Ping<'a> {
    type Dependencies = PingDeps<'a>;
    type InitArgs = ();
    type Status = bool;
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &PingDeps<'a>, _: ()) -> bool {
        self.deps = Some(deps.clone());
        true
    }

    fn shutdown(&mut self, _: ()) {}
}

impl Ping<'_> {
    fn serve(&self) -> Result<u32, LifecycleError> {
        self.served.set(self.served.get() + 1);
        match &self.deps {
            Some(deps) => deps.pong.access()?.answer(),
            None => Ok(0),
        }
    }

    fn served(&self) -> u32 {
        self.served.get()
    }
}

#[derive(Clone)]
struct PongDeps<'a> {
    ping: Required<'a, Ping<'a>>,
    spare: Optional<'a, Ping<'a>>,
}

#[derive(Default)]
struct Pong<'a> {
    deps: Option<PongDeps<'a>>,
    strength: u32,
}

impl<'a> Component for Pong<'a> {
    type Dependencies = PongDeps<'a>;
    type InitArgs = u32;
    type Status = bool;
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &PongDeps<'a>, strength: u32) -> bool {
        self.deps = Some(deps.clone());
        self.strength = strength;
        true
    }

    fn shutdown(&mut self, _: ()) {}
}

impl Pong<'_> {
    fn answer(&self) -> Result<u32, LifecycleError> {
        Ok(self.strength)
    }

    /// Calls back into Ping, which calls into Pong again.
    fn rally(&self) -> Result<u32, LifecycleError> {
        let Some(deps) = &self.deps else {
            return Ok(0);
        };
        let mut total = deps.ping.access()?.serve()?;
        if deps.spare.is_live() {
            total += deps.spare.access()?.serve()?;
        }
        Ok(total)
    }
}

#[test]
fn mutually_dependent_components_call_each_other() {
    let ping = Injected::<Ping>::new();
    let pong = Injected::<Pong>::new();

    ping.bind(PingDeps {
        pong: Required::new(&pong),
    })
    .unwrap();
    pong.bind(PongDeps {
        ping: Required::new(&ping),
        spare: Optional::none(),
    })
    .unwrap();

    ping.initialize(()).unwrap();
    pong.initialize(21).unwrap();

    assert_eq!(pong.access().unwrap().rally().unwrap(), 21);
    assert_eq!(ping.access().unwrap().served(), 1);

    ping.shutdown(()).unwrap();
    pong.shutdown(()).unwrap();
}

#[test]
fn calling_into_a_shut_down_peer_reports_not_live() {
    let ping = Injected::<Ping>::new();
    let pong = Injected::<Pong>::new();

    ping.bind(PingDeps {
        pong: Required::new(&pong),
    })
    .unwrap();
    pong.bind(PongDeps {
        ping: Required::new(&ping),
        spare: Optional::new(&ping),
    })
    .unwrap();

    // Pong comes up first; Ping is wired but not live yet.
    pong.initialize(5).unwrap();
    assert_eq!(
        pong.access().unwrap().rally(),
        Err(LifecycleError::NotLive { component: "Ping" })
    );

    ping.initialize(()).unwrap();
    // Both the required and the optional proxy now reach Ping.
    assert_eq!(pong.access().unwrap().rally().unwrap(), 10);
    assert_eq!(ping.access().unwrap().served(), 2);

    pong.shutdown(()).unwrap();
    assert_eq!(
        ping.access().unwrap().serve(),
        Err(LifecycleError::NotLive { component: "Pong" })
    );
    ping.shutdown(()).unwrap();
}

#[test]
fn reinitializing_reuses_the_bound_descriptor() {
    let ping = Injected::<Ping>::new();
    let pong = Injected::<Pong>::new();

    ping.bind(PingDeps {
        pong: Required::new(&pong),
    })
    .unwrap();
    pong.bind(PongDeps {
        ping: Required::new(&ping),
        spare: Optional::none(),
    })
    .unwrap();

    for round in 1..=50 {
        ping.initialize(()).unwrap();
        pong.initialize(round).unwrap();

        assert_eq!(pong.access().unwrap().rally().unwrap(), round);
        // The counter never carries over from the previous round.
        assert_eq!(ping.access().unwrap().served(), 1);

        pong.shutdown(()).unwrap();
        ping.shutdown(()).unwrap();
        assert_eq!(ping.state(), LifecycleState::DepsBound);
        assert_eq!(pong.state(), LifecycleState::DepsBound);
    }
}

#[test]
fn reentrant_exclusive_access_is_reported() {
    #[derive(Default)]
    struct Looper;

    impl Component for Looper {
        type Dependencies = NoDependencies;
        type InitArgs = ();
        type Status = ();
        type ShutdownArgs = ();

        fn initialize(&mut self, _: &NoDependencies, _: ()) {}
        fn shutdown(&mut self, _: ()) {}
    }

    let looper = Injected::<Looper>::new();
    looper.bind(NoDependencies).unwrap();
    looper.initialize(()).unwrap();

    let me = Required::<Looper>::new(&looper);
    {
        let _shared = me.access().unwrap();
        assert_eq!(
            me.access_mut().err(),
            Some(LifecycleError::AlreadyBorrowed { component: "Looper" })
        );
        assert!(me.access().is_ok());
    }
    assert!(me.access_mut().is_ok());

    looper.shutdown(()).unwrap();
}

#[test]
fn dropping_a_live_wrapper_is_fatal_even_when_reporting() {
    assert_eq!(ErrorPolicy::current(), ErrorPolicy::Report);

    let ping = Injected::<Ping>::new();
    let pong = Injected::<Pong>::new();
    pong.bind(PongDeps {
        ping: Required::new(&ping),
        spare: Optional::none(),
    })
    .unwrap();
    pong.initialize(1).unwrap();

    // Checking first reports the violation as a value.
    assert_eq!(
        pong.liveness().check_release(),
        Err(LifecycleError::DestroyedWhileLive { component: "Pong" })
    );

    // Dropping anyway cannot be reported, so it panics.
    let dropped = panic::catch_unwind(AssertUnwindSafe(move || drop(pong)));
    let payload = dropped.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("Pong: destroyed while live")
    );
}

#[test]
fn dropping_after_shutdown_is_quiet() {
    let ping = Injected::<Ping>::new();
    let pong = Injected::<Pong>::new();
    pong.bind(PongDeps {
        ping: Required::new(&ping),
        spare: Optional::none(),
    })
    .unwrap();
    pong.initialize(1).unwrap();
    pong.shutdown(()).unwrap();

    assert_eq!(pong.liveness().check_release(), Ok(()));
    drop(pong);
}

#[derive(Clone)]
struct EchoDeps<'a> {
    me: Required<'a, Echo<'a>>,
}

/// Looks itself up through its own proxy from inside `initialize`.
#[derive(Default)]
struct Echo<'a> {
    deps: Option<EchoDeps<'a>>,
}

impl<'a> Component for Echo<'a> {
    type Dependencies = EchoDeps<'a>;
    type InitArgs = ();
    /// What the proxy reported during initialization: liveness and the access error, if any.
    type Status = (bool, Option<LifecycleError>);
    type ShutdownArgs = ();

    fn initialize(&mut self, deps: &EchoDeps<'a>, _: ()) -> Self::Status {
        self.deps = Some(deps.clone());
        (deps.me.is_live(), deps.me.access().err())
    }

    fn shutdown(&mut self, _: ()) {}
}

#[test]
fn reaching_a_component_during_its_own_initialize_is_already_borrowed() {
    let echo = Injected::<Echo>::new();
    echo.bind(EchoDeps {
        me: Required::new(&echo),
    })
    .unwrap();

    // Live from the moment construction starts, yet not reachable until initialize returns.
    let (live, access) = echo.initialize(()).unwrap();
    assert!(live);
    assert_eq!(
        access,
        Some(LifecycleError::AlreadyBorrowed { component: "Echo" })
    );

    // Once initialize has returned, the same proxy reaches the instance.
    let me = echo.access().unwrap().deps.clone().unwrap().me;
    assert!(me.is_live());
    assert!(me.access().is_ok());

    echo.shutdown(()).unwrap();
    assert!(!me.is_live());
}
