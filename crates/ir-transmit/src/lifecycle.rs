//! Transmitter lifecycle state machine
//!
//! Callbacks from OS and SDK threads arrive as [`LinkEvent`]s and are
//! applied here instead of mutating transmitter fields directly.
//!
//! ```text
//! Created --start--> Starting --Connected/ReadySignal--> Ready
//!    ^                                                  |  ^
//!    +------------------ Disconnected ------------------+  |
//!                                         transmit: Ready -> Transmitting -> Ready
//! any --stop--> Stopped
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use ir_detect::{LinkEvent, LinkListener, RemoteIrControl};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

/// Lifecycle state of a transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransmitterState {
    /// Constructed, not connected
    Created,
    /// Connection or handshake in flight
    Starting,
    /// Accepting transmissions
    Ready,
    /// A transmission is in progress
    Transmitting,
    /// Resources released
    Stopped,
}

impl TransmitterState {
    /// Created and Stopped hold no live connection
    pub fn is_idle(&self) -> bool {
        matches!(self, TransmitterState::Created | TransmitterState::Stopped)
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Starting => "Starting",
            Self::Ready => "Ready",
            Self::Transmitting => "Transmitting",
            Self::Stopped => "Stopped",
        }
    }
}

/// State plus whatever capability the connection handed over
pub struct Lifecycle {
    state: TransmitterState,
    remote: Option<Arc<dyn RemoteIrControl>>,
    last_failure: Option<i32>,
}

impl Lifecycle {
    /// A lifecycle waiting for `start`
    pub fn new() -> Self {
        Self::with_state(TransmitterState::Created)
    }

    /// A lifecycle for mechanisms that are usable right after construction
    pub fn ready() -> Self {
        Self::with_state(TransmitterState::Ready)
    }

    /// A lifecycle whose handshake began during construction
    pub fn starting() -> Self {
        Self::with_state(TransmitterState::Starting)
    }

    fn with_state(state: TransmitterState) -> Self {
        Self {
            state,
            remote: None,
            last_failure: None,
        }
    }

    pub fn state(&self) -> TransmitterState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == TransmitterState::Ready
    }

    /// Capability delivered by the last `Connected` event
    pub fn remote(&self) -> Option<Arc<dyn RemoteIrControl>> {
        self.remote.clone()
    }

    /// Last failure code reported by the SDK
    pub fn last_failure(&self) -> Option<i32> {
        self.last_failure
    }

    /// Enter `Starting` from an idle state
    ///
    /// Returns false (and changes nothing) if a connection is already live
    /// or in flight.
    pub fn begin_start(&mut self) -> bool {
        if self.state.is_idle() {
            self.state = TransmitterState::Starting;
            true
        } else {
            false
        }
    }

    /// Abandon a start attempt that failed before any callback arrived
    pub fn abort_start(&mut self) {
        if self.state == TransmitterState::Starting {
            self.state = TransmitterState::Created;
        }
    }

    /// Apply a callback event and return the resulting state
    pub fn apply(&mut self, event: LinkEvent) -> TransmitterState {
        if self.state == TransmitterState::Stopped {
            debug!("Ignoring {:?} after stop", event);
            return self.state;
        }

        match event {
            LinkEvent::Connected(remote) => {
                self.remote = Some(remote);
                if self.state != TransmitterState::Transmitting {
                    self.state = TransmitterState::Ready;
                }
            }
            LinkEvent::ReadySignal => {
                if matches!(
                    self.state,
                    TransmitterState::Created | TransmitterState::Starting
                ) {
                    self.state = TransmitterState::Ready;
                }
            }
            LinkEvent::Disconnected => {
                self.remote = None;
                self.state = TransmitterState::Created;
            }
            LinkEvent::Failure(code) => {
                warn!("Transmitter reported failure code {}", code);
                self.last_failure = Some(code);
            }
        }
        self.state
    }

    /// Enter `Transmitting` if ready
    pub fn begin_transmit(&mut self) -> bool {
        if self.is_ready() {
            self.state = TransmitterState::Transmitting;
            true
        } else {
            false
        }
    }

    /// Return to `Ready` unless a callback moved the state meanwhile
    pub fn finish_transmit(&mut self) {
        if self.state == TransmitterState::Transmitting {
            self.state = TransmitterState::Ready;
        }
    }

    /// Enter `Stopped` and drop any held capability
    ///
    /// Returns the previous state.
    pub fn stop(&mut self) -> TransmitterState {
        let previous = self.state;
        self.remote = None;
        self.state = TransmitterState::Stopped;
        previous
    }

    /// Leave `Stopped` for mechanisms that need no connection
    pub fn restart_ready(&mut self) {
        if self.state == TransmitterState::Stopped {
            self.state = TransmitterState::Ready;
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Lifecycle`] shared with callback threads
///
/// Implements [`LinkListener`] so it can be handed straight to the OS or
/// SDK; waiters are woken on every applied event.
#[derive(Clone)]
pub struct SharedLifecycle {
    inner: Arc<(Mutex<Lifecycle>, Condvar)>,
}

impl SharedLifecycle {
    pub fn new(lifecycle: Lifecycle) -> Self {
        Self {
            inner: Arc::new((Mutex::new(lifecycle), Condvar::new())),
        }
    }

    /// Run `f` with the lifecycle locked, waking waiters afterwards
    pub fn with<R>(&self, f: impl FnOnce(&mut Lifecycle) -> R) -> R {
        let (lock, cvar) = &*self.inner;
        let result = f(&mut lock.lock());
        cvar.notify_all();
        result
    }

    pub fn state(&self) -> TransmitterState {
        self.inner.0.lock().state()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.0.lock().is_ready()
    }

    /// Block until ready or until `timeout` elapses
    pub fn wait_ready(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now() + timeout;
        let mut lifecycle = lock.lock();
        while !lifecycle.is_ready() {
            if lifecycle.state() == TransmitterState::Stopped {
                return false;
            }
            if cvar.wait_until(&mut lifecycle, deadline).timed_out() {
                return lifecycle.is_ready();
            }
        }
        true
    }
}

impl LinkListener for SharedLifecycle {
    fn on_link_event(&self, event: LinkEvent) {
        debug!("Link event: {:?}", event);
        let state = self.with(|l| l.apply(event));
        debug!("Transmitter state now {}", state.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir_detect::DeviceError;

    struct NullRemote;

    impl RemoteIrControl for NullRemote {
        fn transmit(&self, _frequency: u32, _pattern: &[u32]) -> Result<(), DeviceError> {
            Ok(())
        }
    }

    #[test]
    fn test_connect_then_disconnect() {
        let mut l = Lifecycle::new();
        assert!(l.begin_start());
        assert_eq!(l.state(), TransmitterState::Starting);

        l.apply(LinkEvent::Connected(Arc::new(NullRemote)));
        assert!(l.is_ready());
        assert!(l.remote().is_some());

        l.apply(LinkEvent::Disconnected);
        assert_eq!(l.state(), TransmitterState::Created);
        assert!(l.remote().is_none());
    }

    #[test]
    fn test_ready_signal_from_starting() {
        let mut l = Lifecycle::starting();
        assert!(!l.is_ready());
        assert_eq!(l.apply(LinkEvent::ReadySignal), TransmitterState::Ready);
    }

    #[test]
    fn test_failure_keeps_state() {
        let mut l = Lifecycle::starting();
        assert_eq!(l.apply(LinkEvent::Failure(7)), TransmitterState::Starting);
        assert_eq!(l.last_failure(), Some(7));
    }

    #[test]
    fn test_events_after_stop_ignored() {
        let mut l = Lifecycle::new();
        l.begin_start();
        l.stop();
        l.apply(LinkEvent::Connected(Arc::new(NullRemote)));
        assert_eq!(l.state(), TransmitterState::Stopped);
        assert!(l.remote().is_none());
    }

    #[test]
    fn test_transmitting_is_transient() {
        let mut l = Lifecycle::ready();
        assert!(l.begin_transmit());
        assert_eq!(l.state(), TransmitterState::Transmitting);
        l.finish_transmit();
        assert_eq!(l.state(), TransmitterState::Ready);
    }

    #[test]
    fn test_disconnect_during_transmit_wins() {
        let mut l = Lifecycle::ready();
        l.begin_transmit();
        l.apply(LinkEvent::Disconnected);
        l.finish_transmit();
        assert_eq!(l.state(), TransmitterState::Created);
    }

    #[test]
    fn test_begin_start_only_from_idle() {
        let mut l = Lifecycle::ready();
        assert!(!l.begin_start());
        l.stop();
        assert!(l.begin_start());
    }

    #[test]
    fn test_wait_ready_wakes_on_event() {
        let shared = SharedLifecycle::new(Lifecycle::starting());
        let signaller = shared.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            signaller.on_link_event(LinkEvent::ReadySignal);
        });
        assert!(shared.wait_ready(Duration::from_secs(5)));
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_ready_times_out() {
        let shared = SharedLifecycle::new(Lifecycle::starting());
        assert!(!shared.wait_ready(Duration::from_millis(10)));
    }
}
