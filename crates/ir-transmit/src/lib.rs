//! Infrared transmitters
//!
//! This crate turns a detected [`TransmitterVariant`] into a live
//! [`Transmitter`] with a uniform lifecycle:
//!
//! - **Native** and **Obsolete Samsung** are ready right after construction
//! - **HTC** becomes ready once its CIR control is started; sends are queued
//!   to a worker thread
//! - **Le/Coolpad** binds a remote-control service on `start` and is ready
//!   when the service connects
//! - **LG** (with or without a device preamble) opens the SDK at
//!   construction and is ready when the SDK signals it
//!
//! Connection callbacks are delivered as [`ir_detect::LinkEvent`]s into a
//! [`Lifecycle`] state machine.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use ir_detect::{DetectionConfig, DeviceContext};
//! use ir_protocol::PulsePattern;
//! use ir_transmit::{transmit_pattern, transmitter_for_device, TransmitterConfig};
//!
//! # fn run(ctx: Arc<dyn DeviceContext>) -> Result<(), Box<dyn std::error::Error>> {
//! let detection = DetectionConfig::default();
//! let config = TransmitterConfig::default();
//! if let Some(mut tx) = transmitter_for_device(ctx, &detection, &config)? {
//!     tx.start();
//!     if tx.wait_ready(Duration::from_secs(2)) {
//!         let pattern = PulsePattern::intervals(38_000, vec![100, 100, 100, 100])?;
//!         transmit_pattern(tx.as_mut(), &pattern)?;
//!     }
//!     tx.stop();
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod htc;
pub mod le;
pub mod lg;
pub mod lifecycle;
pub mod native;
pub mod obsolete;
pub mod shared;
pub mod transmitter;

pub use config::TransmitterConfig;
pub use error::TransmitError;
pub use factory::{create_transmitter, supports_frequency, transmitter_for_device};
pub use htc::HtcTransmitter;
pub use le::LeTransmitter;
pub use lg::{BeforeSend, KnownDevicePreamble, LgTransmitter, NoPreamble};
pub use lifecycle::{Lifecycle, SharedLifecycle, TransmitterState};
pub use native::NativeTransmitter;
pub use obsolete::ObsoleteSamsungTransmitter;
pub use shared::SharedTransmitter;
pub use transmitter::{transmit_pattern, Transmitter};

pub use ir_protocol::TransmitterVariant;
