//! Error types for IR capability detection

use thiserror::Error;

/// Failures reported by the OS or a vendor SDK
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// A system service or SDK entry point is not present
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A named primitive could not be bound on a service
    #[error("primitive {0} is not available")]
    PrimitiveUnavailable(String),

    /// Calling into a service failed
    #[error("invocation failed: {0}")]
    Invocation(String),

    /// Remote (bound) service call failed
    #[error("remote call failed: {0}")]
    Remote(String),

    /// Vendor SDK reported an error code
    #[error("SDK error {code}: {message}")]
    Sdk { code: i32, message: String },

    /// Service binding request was rejected
    #[error("binding failed: {0}")]
    Binding(String),

    /// Package enumeration failed
    #[error("failed to enumerate packages: {0}")]
    EnumerationFailed(String),
}

/// Errors that can occur while running a single probe
///
/// The detection chain downgrades every one of these to "capability absent".
#[derive(Debug, Error)]
pub enum DetectError {
    /// The probe panicked
    #[error("probe {probe} panicked: {message}")]
    ProbePanicked { probe: &'static str, message: String },

    /// A collaborator call failed during the probe
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}
