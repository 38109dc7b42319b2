//! Error types for transmitter construction and control

use ir_detect::DeviceError;
use ir_protocol::{ProtocolError, TransmitterVariant};
use thiserror::Error;

/// Errors surfaced by transmitter construction and the async wrapper
///
/// Failures during `transmit` itself are never returned; they are logged.
#[derive(Debug, Error)]
pub enum TransmitError {
    /// Vendor SDK initialisation failed for a detected variant
    #[error("failed to construct {variant} transmitter: {source}")]
    Construction {
        variant: TransmitterVariant,
        #[source]
        source: DeviceError,
    },

    /// Pattern could not be encoded for the transmitter
    #[error("encoding error: {0}")]
    Encoding(#[from] ProtocolError),

    /// Device collaborator error
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// Worker thread could not be spawned
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blocking task panicked or was cancelled
    #[error("transmit task failed: {0}")]
    Join(String),
}

impl TransmitError {
    pub(crate) fn construction(variant: TransmitterVariant, source: DeviceError) -> Self {
        TransmitError::Construction { variant, source }
    }
}
