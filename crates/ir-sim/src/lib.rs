//! IR device simulation
//!
//! A fake Android device for exercising detection and transmitters
//! without hardware. A [`DeviceProfile`] decides which mechanisms exist;
//! [`SimulatedDevice`] implements the collaborator traits and records
//! every call.
//!
//! # Example
//!
//! ```rust
//! use ir_detect::{detect, DetectionConfig};
//! use ir_sim::{DeviceProfile, SimulatedDevice};
//!
//! let device = SimulatedDevice::new(DeviceProfile::obsolete_samsung());
//! let variant = detect(&device, &DetectionConfig::default());
//! assert!(variant.is_some());
//! ```

pub mod device;
pub mod profile;

pub use device::{SimCall, SimulatedDevice};
pub use profile::{DeviceProfile, LgDeviceProfile, LgKeyProfile};
