//! Detection configuration

use serde::{Deserialize, Serialize};

/// Package hosting the UEI control service on Coolpad devices
pub const LE_COOLPAD_IR_SERVICE_PACKAGE: &str = "com.uei.quicksetsdk.coolpad";

/// Package hosting the UEI control service on other Le devices
pub const LE_DEFAULT_IR_SERVICE_PACKAGE: &str = "com.uei.quicksetsdk.letv";

/// Package installed alongside the HTC CIR module
pub const HTC_IR_PACKAGE: &str = "com.htc.cirmodule";

/// Configuration for the detection chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Send a trial pattern through the native service while probing
    pub liveness_trial: bool,
    /// Carrier frequency for the native trial pattern
    pub trial_frequency: u32,
    /// Durations for the native trial pattern
    pub trial_pattern: Vec<u32>,
    /// Key of the legacy Samsung system service
    pub legacy_service_key: String,
    /// Name of the legacy send primitive
    pub legacy_send_primitive: String,
    /// Package substrings identifying the HTC SDK
    pub htc_packages: Vec<String>,
    /// Package substrings identifying the Le/Coolpad service
    pub le_packages: Vec<String>,
    /// Append the LG probe after the default probes
    pub include_lg: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            liveness_trial: true,
            trial_frequency: 38_000,
            trial_pattern: vec![100, 100, 100, 100],
            legacy_service_key: "irda".to_string(),
            legacy_send_primitive: "write_irsend".to_string(),
            htc_packages: vec![HTC_IR_PACKAGE.to_string()],
            le_packages: vec![
                LE_COOLPAD_IR_SERVICE_PACKAGE.to_string(),
                LE_DEFAULT_IR_SERVICE_PACKAGE.to_string(),
            ],
            include_lg: false,
        }
    }
}

impl DetectionConfig {
    /// Trial token sent to the legacy service, e.g. `38000,100,100,100,100`
    pub fn legacy_trial_token(&self) -> String {
        ir_protocol::obsolete_token(self.trial_frequency, &self.trial_pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trial() {
        let config = DetectionConfig::default();
        assert!(config.liveness_trial);
        assert_eq!(config.trial_frequency, 38_000);
        assert_eq!(config.legacy_trial_token(), "38000,100,100,100,100");
        assert!(!config.include_lg);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DetectionConfig =
            serde_json::from_str(r#"{ "liveness_trial": false, "include_lg": true }"#).unwrap();
        assert!(!config.liveness_trial);
        assert!(config.include_lg);
        assert_eq!(config.legacy_service_key, "irda");
        assert_eq!(config.le_packages.len(), 2);
    }
}
