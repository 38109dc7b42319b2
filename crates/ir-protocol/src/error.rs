//! Error types for pulse pattern construction and encoding

use thiserror::Error;

/// Errors that can occur while building or encoding a pulse pattern
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Carrier frequency must be a positive number of hertz
    #[error("invalid carrier frequency: {0} Hz")]
    InvalidFrequency(u32),

    /// A pulse train needs at least one duration
    #[error("pattern contains no durations")]
    EmptyPattern,

    /// Obsolete token is malformed
    #[error("invalid obsolete pattern token: {0}")]
    InvalidToken(String),

    /// A transmitter asked for an encoding the transmit info does not carry
    #[error("encoding mismatch: expected {expected}, found {found}")]
    EncodingMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
