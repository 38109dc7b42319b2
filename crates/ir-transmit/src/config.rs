//! Transmitter configuration

use ir_detect::config::{LE_COOLPAD_IR_SERVICE_PACKAGE, LE_DEFAULT_IR_SERVICE_PACKAGE};
use serde::{Deserialize, Serialize};

/// Interface descriptor of the UEI remote-control service
pub const UEI_CONTROL_DESCRIPTOR: &str = "com.uei.control.IControl";

/// Service class bound on Le/Coolpad devices
pub const UEI_CONTROL_SERVICE_CLASS: &str = "com.uei.control.Service";

/// Configuration shared by the concrete transmitters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmitterConfig {
    /// Key of the legacy Samsung system service
    pub legacy_service_key: String,
    /// Name of the legacy send primitive
    pub legacy_send_primitive: String,
    /// Brand substring selecting the Coolpad service package
    pub coolpad_brand_marker: String,
    /// Service package on Coolpad devices
    pub le_coolpad_package: String,
    /// Service package on other Le devices
    pub le_default_package: String,
    /// Service class to bind
    pub le_service_class: String,
    /// Interface descriptor passed with the bind request
    pub le_service_action: String,
    /// Let the HTC SDK drop frames when busy
    pub htc_droppable: bool,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            legacy_service_key: "irda".to_string(),
            legacy_send_primitive: "write_irsend".to_string(),
            coolpad_brand_marker: "Coolpad".to_string(),
            le_coolpad_package: LE_COOLPAD_IR_SERVICE_PACKAGE.to_string(),
            le_default_package: LE_DEFAULT_IR_SERVICE_PACKAGE.to_string(),
            le_service_class: UEI_CONTROL_SERVICE_CLASS.to_string(),
            le_service_action: UEI_CONTROL_DESCRIPTOR.to_string(),
            htc_droppable: false,
        }
    }
}

impl TransmitterConfig {
    /// Pick the Le service package for a device brand
    pub fn le_package_for_brand(&self, brand: &str) -> &str {
        if brand.contains(&self.coolpad_brand_marker) {
            &self.le_coolpad_package
        } else {
            &self.le_default_package
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_package_by_brand() {
        let config = TransmitterConfig::default();
        assert_eq!(
            config.le_package_for_brand("Coolpad"),
            LE_COOLPAD_IR_SERVICE_PACKAGE
        );
        assert_eq!(
            config.le_package_for_brand("Letv"),
            LE_DEFAULT_IR_SERVICE_PACKAGE
        );
    }

    #[test]
    fn test_partial_json() {
        let config: TransmitterConfig =
            serde_json::from_str(r#"{ "htc_droppable": true, "coolpad_brand_marker": "YL" }"#)
                .unwrap();
        assert!(config.htc_droppable);
        assert_eq!(config.le_package_for_brand("YL-8720"), LE_COOLPAD_IR_SERVICE_PACKAGE);
        assert_eq!(config.le_service_class, UEI_CONTROL_SERVICE_CLASS);
    }
}
