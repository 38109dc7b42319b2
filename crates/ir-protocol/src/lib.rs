//! Infrared Pattern Library
//!
//! This crate provides the vendor-neutral description of an infrared pulse
//! train and the encodings each transmitter family expects:
//!
//! - **Intervals**: alternating pulse/gap durations in microseconds
//!   (native OS service, LG, Le/Coolpad)
//! - **Cycles**: durations counted in carrier cycles (HTC frames)
//! - **Obsolete string**: a comma-joined `frequency,c1,c2,...` token for the
//!   legacy Samsung `irda` service
//!
//! # Architecture
//!
//! A [`PulsePattern`] is what the application layer produces. A
//! [`PatternAdapter`] built for the detected [`TransmitterVariant`] shapes it
//! into a [`TransmitInfo`], which carries exactly one physical encoding.
//!
//! # Example
//!
//! ```rust
//! use ir_protocol::{PatternAdapter, PatternType, PulsePattern, TransmitterVariant};
//!
//! let pattern = PulsePattern::new(PatternType::Intervals, 38_000, vec![100, 100, 100, 100]).unwrap();
//! let adapter = PatternAdapter::new(TransmitterVariant::NativeHardware);
//! let info = adapter.create_transmit_info(&pattern).unwrap();
//!
//! assert_eq!(info.frequency(), 38_000);
//! assert_eq!(info.durations(), Some(&[100, 100, 100, 100][..]));
//! ```

pub mod adapter;
pub mod error;
pub mod pattern;
pub mod transmit_info;

pub use adapter::{obsolete_token, PatternAdapter, PatternAdapterKind};
pub use error::ProtocolError;
pub use pattern::{PatternType, PulsePattern};
pub use transmit_info::{PatternEncoding, TransmitInfo};

/// Identifies which infrared transmission mechanism a device exposes
///
/// Declaration order carries no priority; only the detection chain's probe
/// order decides which variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransmitterVariant {
    /// OS-level consumer infrared service
    NativeHardware,
    /// Legacy Samsung `irda` system service
    ObsoleteSamsung,
    /// HTC CIR control SDK
    Htc,
    /// Le/Coolpad bound remote-control service
    LeCoolpad,
    /// LG IRBlaster SDK, sending a known device key before each pattern
    LgWithDevice,
    /// LG IRBlaster SDK, sending the pattern only
    LgWithoutDevice,
}

impl TransmitterVariant {
    /// All variants, in declaration order
    pub const ALL: [TransmitterVariant; 6] = [
        TransmitterVariant::NativeHardware,
        TransmitterVariant::ObsoleteSamsung,
        TransmitterVariant::Htc,
        TransmitterVariant::LeCoolpad,
        TransmitterVariant::LgWithDevice,
        TransmitterVariant::LgWithoutDevice,
    ];

    /// Returns a human-readable name for the variant
    pub fn name(&self) -> &'static str {
        match self {
            TransmitterVariant::NativeHardware => "Native IR",
            TransmitterVariant::ObsoleteSamsung => "Obsolete Samsung",
            TransmitterVariant::Htc => "HTC CIR",
            TransmitterVariant::LeCoolpad => "Le/Coolpad",
            TransmitterVariant::LgWithDevice => "LG IRBlaster (device)",
            TransmitterVariant::LgWithoutDevice => "LG IRBlaster",
        }
    }

    /// Whether this variant becomes ready only after an asynchronous callback
    pub fn has_async_readiness(&self) -> bool {
        matches!(
            self,
            TransmitterVariant::LeCoolpad
                | TransmitterVariant::LgWithDevice
                | TransmitterVariant::LgWithoutDevice
        )
    }
}

impl std::fmt::Display for TransmitterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
