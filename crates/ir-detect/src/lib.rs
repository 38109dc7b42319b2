//! IR Transmitter Detection Library
//!
//! This crate decides, at runtime, which infrared transmission mechanism a
//! device exposes. Each mechanism has a [`CapabilityProbe`]; a
//! [`DetectionChain`] runs them in a fixed priority order and returns the
//! first match.
//!
//! All OS and vendor SDK access goes through the [`DeviceContext`] trait
//! and the vendor traits in [`vendor`].
//!
//! # Example
//!
//! ```rust,no_run
//! use ir_detect::{DetectionChain, DetectionConfig, DeviceContext};
//!
//! fn pick(ctx: &dyn DeviceContext) {
//!     let chain = DetectionChain::new(&DetectionConfig::default());
//!     match chain.detect(ctx) {
//!         Some(variant) => println!("Using {}", variant),
//!         None => println!("No IR transmitter on this device"),
//!     }
//! }
//! ```

pub mod chain;
pub mod config;
pub mod context;
pub mod error;
pub mod probe;
pub mod vendor;

pub use chain::{detect, run_probe, DetectionChain};
pub use config::DetectionConfig;
pub use context::{
    CarrierFrequencyRange, ConsumerIrService, DeviceContext, LinkEvent, LinkListener,
    RemoteIrControl, ServiceBinding, StringPrimitive, SystemService,
};
pub use error::{DetectError, DeviceError};
pub use probe::{
    CapabilityProbe, HtcProbe, LeCoolpadProbe, LgProbe, NativeHardwareProbe, ObsoleteSamsungProbe,
};
pub use vendor::{
    HtcCirControl, HtcIrData, HtcReply, HtcReplyListener, HtcResultCode, IrAction, LgDevice,
    LgIrBlaster, LgIrSdk, LgKeyFunction, LgResultCode,
};
