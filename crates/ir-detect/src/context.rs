//! Device collaborator interface
//!
//! Everything detection and transmission need from the host OS is reached
//! through [`DeviceContext`]. Implementations wrap the platform (or a
//! simulation); this crate never talks to hardware directly.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DeviceError;
use crate::vendor::{HtcCirControl, HtcReplyListener, LgIrSdk};

/// Read-only access to the OS plus the vendor SDK entry points
pub trait DeviceContext: Send + Sync {
    /// The system-level consumer IR service, if the OS provides one
    fn consumer_ir(&self) -> Option<Arc<dyn ConsumerIrService>>;

    /// Identifiers of all installed application packages
    fn installed_packages(&self) -> Result<Vec<String>, DeviceError>;

    /// Look up a named system service by string key
    fn system_service(&self, key: &str) -> Option<Arc<dyn SystemService>>;

    /// Device brand string (e.g. "Coolpad")
    fn brand(&self) -> String;

    /// Request a bind to an OS service; the outcome arrives on `listener`
    ///
    /// Must not block waiting for the connection.
    fn bind_service(
        &self,
        binding: &ServiceBinding,
        listener: Arc<dyn LinkListener>,
    ) -> Result<(), DeviceError>;

    /// Release a previous bind
    fn unbind_service(&self, binding: &ServiceBinding) -> Result<(), DeviceError>;

    /// Create the HTC CIR control; replies are delivered to `replies`
    fn htc_control(
        &self,
        replies: Arc<dyn HtcReplyListener>,
    ) -> Result<Arc<dyn HtcCirControl>, DeviceError>;

    /// Resolve the LG IRBlaster SDK; `None` when its classes are absent
    fn lg_sdk(&self) -> Option<Arc<dyn LgIrSdk>>;

    /// True if any installed package identifier contains one of `needles`
    fn has_any_package(&self, needles: &[String]) -> Result<bool, DeviceError> {
        let packages = self.installed_packages()?;
        Ok(packages
            .iter()
            .any(|pkg| needles.iter().any(|needle| pkg.contains(needle.as_str()))))
    }
}

/// Inclusive carrier frequency range supported by the native emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierFrequencyRange {
    pub min_frequency: u32,
    pub max_frequency: u32,
}

impl CarrierFrequencyRange {
    pub fn new(min_frequency: u32, max_frequency: u32) -> Self {
        Self {
            min_frequency,
            max_frequency,
        }
    }

    /// Check whether a frequency falls inside this range
    pub fn contains(&self, frequency: u32) -> bool {
        (self.min_frequency..=self.max_frequency).contains(&frequency)
    }
}

/// OS-level consumer infrared service
pub trait ConsumerIrService: Send + Sync {
    /// Whether the device reports a physical emitter
    fn has_ir_emitter(&self) -> Result<bool, DeviceError>;

    /// Carrier frequency ranges the emitter supports
    fn carrier_frequencies(&self) -> Result<Vec<CarrierFrequencyRange>, DeviceError>;

    /// Transmit microsecond durations at `frequency` Hz
    fn transmit(&self, frequency: u32, pattern: &[u32]) -> Result<(), DeviceError>;
}

/// A system service object returned by a string-keyed lookup
pub trait SystemService: Send + Sync {
    /// Attempt to bind a named primitive taking a single string argument
    ///
    /// `None` means the primitive does not exist on this service.
    fn bind_primitive(&self, name: &str) -> Option<Arc<dyn StringPrimitive>>;
}

/// A bound single-string-argument primitive
pub trait StringPrimitive: Send + Sync {
    fn invoke(&self, arg: &str) -> Result<(), DeviceError>;
}

/// Target of an OS service bind request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceBinding {
    /// Package hosting the service
    pub package: String,
    /// Fully qualified service class
    pub class_name: String,
    /// Interface descriptor the caller expects
    pub action: String,
}

/// Capability handed over once a bound remote-control service connects
pub trait RemoteIrControl: Send + Sync {
    /// Transmit microsecond durations at `frequency` Hz
    fn transmit(&self, frequency: u32, pattern: &[u32]) -> Result<(), DeviceError>;
}

/// Connection-lifecycle events delivered from OS or SDK callback threads
pub enum LinkEvent {
    /// A bound service connected and handed over its capability
    Connected(Arc<dyn RemoteIrControl>),
    /// The bound service went away
    Disconnected,
    /// An SDK finished its asynchronous handshake
    ReadySignal,
    /// An SDK reported a failure code
    Failure(i32),
}

impl fmt::Debug for LinkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkEvent::Connected(_) => f.write_str("Connected(<remote>)"),
            LinkEvent::Disconnected => f.write_str("Disconnected"),
            LinkEvent::ReadySignal => f.write_str("ReadySignal"),
            LinkEvent::Failure(code) => write!(f, "Failure({})", code),
        }
    }
}

/// Receiver of [`LinkEvent`]s; may be called from any thread
pub trait LinkListener: Send + Sync {
    fn on_link_event(&self, event: LinkEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_range_inclusive() {
        let range = CarrierFrequencyRange::new(30_000, 60_000);
        assert!(range.contains(30_000));
        assert!(range.contains(38_000));
        assert!(range.contains(60_000));
        assert!(!range.contains(29_999));
        assert!(!range.contains(60_001));
    }

    #[test]
    fn test_link_event_debug() {
        assert_eq!(format!("{:?}", LinkEvent::Failure(3)), "Failure(3)");
        assert_eq!(format!("{:?}", LinkEvent::ReadySignal), "ReadySignal");
    }
}
