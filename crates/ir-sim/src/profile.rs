//! Simulated device profiles

use ir_detect::config::{HTC_IR_PACKAGE, LE_COOLPAD_IR_SERVICE_PACKAGE, LE_DEFAULT_IR_SERVICE_PACKAGE};
use ir_detect::{CarrierFrequencyRange, LgDevice, LgKeyFunction};
use serde::{Deserialize, Serialize};

/// Key function stored on a simulated LG device profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LgKeyProfile {
    pub id: i32,
    pub name: String,
}

/// Device profile known to the simulated LG SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LgDeviceProfile {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub key_functions: Vec<LgKeyProfile>,
}

impl From<&LgDeviceProfile> for LgDevice {
    fn from(profile: &LgDeviceProfile) -> Self {
        LgDevice {
            id: profile.id,
            name: profile.name.clone(),
            key_functions: profile
                .key_functions
                .iter()
                .map(|k| LgKeyFunction {
                    id: k.id,
                    name: k.name.clone(),
                })
                .collect(),
        }
    }
}

/// What a simulated device offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Brand string
    pub brand: String,
    /// Expose the native consumer IR service
    pub consumer_ir: bool,
    /// Whether the native service reports an emitter
    pub has_ir_emitter: bool,
    /// Native carrier frequency ranges
    pub carrier_frequencies: Vec<CarrierFrequencyRange>,
    /// Installed package identifiers
    pub packages: Vec<String>,
    /// Make package enumeration fail
    pub enumeration_fails: bool,
    /// Expose the legacy `irda` service
    pub legacy_irda: bool,
    /// Whether the legacy service offers its send primitive
    pub legacy_send_primitive: bool,
    /// Allow creating the HTC CIR control
    pub htc_sdk: bool,
    /// Accept Le service binds
    pub le_service: bool,
    /// Resolve the LG SDK
    pub lg_sdk: bool,
    /// Whether the LG SDK reports the device as supported
    pub lg_supported: bool,
    /// Device profiles known to the LG SDK
    pub lg_devices: Vec<LgDeviceProfile>,
    /// Make every send report a failure
    pub fail_transmits: bool,
    /// Deliver connection callbacks on a background thread
    pub auto_callbacks: bool,
    /// Delay before an automatic callback, in milliseconds
    pub callback_delay_ms: u64,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            brand: "generic".to_string(),
            consumer_ir: false,
            has_ir_emitter: false,
            carrier_frequencies: Vec::new(),
            packages: Vec::new(),
            enumeration_fails: false,
            legacy_irda: false,
            legacy_send_primitive: false,
            htc_sdk: false,
            le_service: false,
            lg_sdk: false,
            lg_supported: false,
            lg_devices: Vec::new(),
            fail_transmits: false,
            auto_callbacks: false,
            callback_delay_ms: 20,
        }
    }
}

impl DeviceProfile {
    /// A device with no IR mechanism at all
    pub fn bare() -> Self {
        Self::default()
    }

    /// Native consumer IR with a 30-60 kHz emitter
    pub fn native() -> Self {
        Self {
            brand: "google".to_string(),
            consumer_ir: true,
            has_ir_emitter: true,
            carrier_frequencies: vec![CarrierFrequencyRange::new(30_000, 60_000)],
            ..Self::default()
        }
    }

    /// Pre-KitKat Samsung with the `irda` service
    pub fn obsolete_samsung() -> Self {
        Self {
            brand: "samsung".to_string(),
            legacy_irda: true,
            legacy_send_primitive: true,
            ..Self::default()
        }
    }

    /// HTC with the CIR module installed
    pub fn htc() -> Self {
        Self {
            brand: "htc".to_string(),
            packages: vec![HTC_IR_PACKAGE.to_string()],
            htc_sdk: true,
            ..Self::default()
        }
    }

    /// Coolpad with the UEI control service
    pub fn le_coolpad() -> Self {
        Self {
            brand: "Coolpad".to_string(),
            packages: vec![LE_COOLPAD_IR_SERVICE_PACKAGE.to_string()],
            le_service: true,
            ..Self::default()
        }
    }

    /// Non-Coolpad Le device with the UEI control service
    pub fn le() -> Self {
        Self {
            brand: "Letv".to_string(),
            packages: vec![LE_DEFAULT_IR_SERVICE_PACKAGE.to_string()],
            le_service: true,
            ..Self::default()
        }
    }

    /// LG with the IRBlaster SDK and one stored TV profile
    pub fn lg() -> Self {
        Self {
            brand: "lge".to_string(),
            lg_sdk: true,
            lg_supported: true,
            lg_devices: vec![LgDeviceProfile {
                id: 1,
                name: "Living room TV".to_string(),
                key_functions: vec![LgKeyProfile {
                    id: 10,
                    name: "POWER".to_string(),
                }],
            }],
            ..Self::default()
        }
    }

    /// Enable background delivery of connection callbacks
    pub fn with_auto_callbacks(mut self) -> Self {
        self.auto_callbacks = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_uses_defaults() {
        let profile: DeviceProfile =
            serde_json::from_str(r#"{ "brand": "Coolpad", "le_service": true }"#).unwrap();
        assert_eq!(profile.brand, "Coolpad");
        assert!(profile.le_service);
        assert!(!profile.consumer_ir);
        assert_eq!(profile.callback_delay_ms, 20);
    }

    #[test]
    fn test_lg_device_conversion() {
        let profile = DeviceProfile::lg();
        let device = LgDevice::from(&profile.lg_devices[0]);
        assert_eq!(device.id, 1);
        assert_eq!(device.key_functions[0].id, 10);
    }
}
