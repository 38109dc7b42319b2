//! The transmitter abstraction

use std::time::Duration;

use ir_protocol::{PatternAdapter, PulsePattern, TransmitInfo, TransmitterVariant};

use crate::error::TransmitError;
use crate::lifecycle::TransmitterState;

/// A live handle to exactly one vendor transmission mechanism
///
/// Lifecycle: construct, optionally [`start`], wait for [`is_ready`],
/// [`transmit`] any number of times, then [`stop`]. Callers serialize their
/// own calls; see [`crate::SharedTransmitter`] for an async wrapper.
///
/// `transmit` never fails from the caller's point of view. Vendor errors
/// and "not ready" are logged and the pattern is dropped.
///
/// [`start`]: Transmitter::start
/// [`is_ready`]: Transmitter::is_ready
/// [`transmit`]: Transmitter::transmit
/// [`stop`]: Transmitter::stop
pub trait Transmitter: Send {
    /// The variant this transmitter drives
    fn variant(&self) -> TransmitterVariant;

    /// Current lifecycle state
    fn state(&self) -> TransmitterState;

    /// Begin connecting; must not block waiting for the connection
    fn start(&mut self) {}

    /// Whether `transmit` will currently attempt a send
    fn is_ready(&self) -> bool {
        true
    }

    /// Block until ready or `timeout` elapses
    fn wait_ready(&self, _timeout: Duration) -> bool {
        self.is_ready()
    }

    /// Send one pulse train
    fn transmit(&mut self, info: &TransmitInfo);

    /// Release the held resource; safe to call repeatedly
    fn stop(&mut self) {}
}

/// Encode a logical pattern for `transmitter` and send it
///
/// Only encoding problems are returned; send failures are logged by the
/// transmitter as usual.
pub fn transmit_pattern(
    transmitter: &mut dyn Transmitter,
    pattern: &PulsePattern,
) -> Result<(), TransmitError> {
    let info = PatternAdapter::new(transmitter.variant()).create_transmit_info(pattern)?;
    transmitter.transmit(&info);
    Ok(())
}
