//! Capability probes
//!
//! Each probe answers "is this mechanism usable on this device" for one
//! [`TransmitterVariant`]. Probes hold only configuration and may be run
//! any number of times. Errors are returned, not swallowed; the
//! [`crate::DetectionChain`] decides what a failure means.

use ir_protocol::TransmitterVariant;
use tracing::{debug, trace, warn};

use crate::config::DetectionConfig;
use crate::context::DeviceContext;
use crate::error::DeviceError;

/// A named predicate certifying one transmitter variant
pub trait CapabilityProbe: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// The variant this probe certifies
    fn variant(&self) -> TransmitterVariant;

    /// Check whether the mechanism is usable on `ctx`
    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError>;
}

// ============================================================================
// Native consumer IR service
// ============================================================================

/// Probe for the OS-level consumer IR service
///
/// Detection is split into a side-effect-free [`declared_capability`] query
/// and an optional [`liveness_trial`] that really transmits.
///
/// [`declared_capability`]: NativeHardwareProbe::declared_capability
/// [`liveness_trial`]: NativeHardwareProbe::liveness_trial
#[derive(Debug, Clone)]
pub struct NativeHardwareProbe {
    liveness_trial: bool,
    trial_frequency: u32,
    trial_pattern: Vec<u32>,
}

impl NativeHardwareProbe {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            liveness_trial: config.liveness_trial,
            trial_frequency: config.trial_frequency,
            trial_pattern: config.trial_pattern.clone(),
        }
    }

    /// Whether the OS exposes the service and it reports an emitter
    pub fn declared_capability(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        debug!("Checking consumer IR service");
        let Some(service) = ctx.consumer_ir() else {
            debug!("Consumer IR service not present");
            return Ok(false);
        };

        if !service.has_ir_emitter()? {
            debug!("Consumer IR service reports no emitter");
            return Ok(false);
        }

        match service.carrier_frequencies() {
            Ok(ranges) if !ranges.is_empty() => {
                for range in &ranges {
                    debug!(
                        "Carrier frequency range: {}..={} Hz",
                        range.min_frequency, range.max_frequency
                    );
                }
            }
            Ok(_) => debug!("Carrier frequency list is empty"),
            Err(e) => warn!("Failed to read carrier frequencies: {}", e),
        }

        Ok(true)
    }

    /// Send the trial pattern through the native service
    ///
    /// This emits a real (short) IR burst and fails when the app lacks
    /// transmit permission.
    pub fn liveness_trial(&self, ctx: &dyn DeviceContext) -> Result<(), DeviceError> {
        let service = ctx
            .consumer_ir()
            .ok_or_else(|| DeviceError::ServiceUnavailable("consumer_ir".to_string()))?;
        trace!(
            "Sending liveness trial at {} Hz: {:?}",
            self.trial_frequency,
            self.trial_pattern
        );
        service.transmit(self.trial_frequency, &self.trial_pattern)
    }
}

impl CapabilityProbe for NativeHardwareProbe {
    fn name(&self) -> &'static str {
        "native"
    }

    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::NativeHardware
    }

    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        if !self.declared_capability(ctx)? {
            return Ok(false);
        }
        if self.liveness_trial {
            self.liveness_trial(ctx)?;
        }
        debug!("Consumer IR service has an emitter");
        Ok(true)
    }
}

// ============================================================================
// Legacy Samsung irda service
// ============================================================================

/// Probe for the legacy Samsung `irda` system service
#[derive(Debug, Clone)]
pub struct ObsoleteSamsungProbe {
    service_key: String,
    primitive: String,
    trial_token: String,
}

impl ObsoleteSamsungProbe {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            service_key: config.legacy_service_key.clone(),
            primitive: config.legacy_send_primitive.clone(),
            trial_token: config.legacy_trial_token(),
        }
    }
}

impl CapabilityProbe for ObsoleteSamsungProbe {
    fn name(&self) -> &'static str {
        "obsolete-samsung"
    }

    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::ObsoleteSamsung
    }

    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        debug!("Checking legacy '{}' service", self.service_key);
        let Some(service) = ctx.system_service(&self.service_key) else {
            debug!("Legacy '{}' service not found", self.service_key);
            return Ok(false);
        };

        let send = service
            .bind_primitive(&self.primitive)
            .ok_or_else(|| DeviceError::PrimitiveUnavailable(self.primitive.clone()))?;
        trace!("Bound {}, sending trial '{}'", self.primitive, self.trial_token);

        send.invoke(&self.trial_token)?;
        debug!("Legacy service accepted trial transmission");
        Ok(true)
    }
}

// ============================================================================
// Package-presence probes
// ============================================================================

/// Probe for the HTC CIR SDK, by installed package
#[derive(Debug, Clone)]
pub struct HtcProbe {
    packages: Vec<String>,
}

impl HtcProbe {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            packages: config.htc_packages.clone(),
        }
    }
}

impl CapabilityProbe for HtcProbe {
    fn name(&self) -> &'static str {
        "htc"
    }

    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::Htc
    }

    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        let found = ctx.has_any_package(&self.packages)?;
        debug!("Check HTC IR interface: {}", found);
        Ok(found)
    }
}

/// Probe for the Le/Coolpad UEI service, by installed package
#[derive(Debug, Clone)]
pub struct LeCoolpadProbe {
    packages: Vec<String>,
}

impl LeCoolpadProbe {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            packages: config.le_packages.clone(),
        }
    }
}

impl CapabilityProbe for LeCoolpadProbe {
    fn name(&self) -> &'static str {
        "le-coolpad"
    }

    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::LeCoolpad
    }

    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        let found = ctx.has_any_package(&self.packages)?;
        debug!("Check Le IR interface: {}", found);
        Ok(found)
    }
}

// ============================================================================
// LG IRBlaster
// ============================================================================

/// Probe for the LG IRBlaster SDK
///
/// Not part of the default chain; the SDK is an optional dependency.
#[derive(Debug, Clone, Default)]
pub struct LgProbe;

impl LgProbe {
    pub fn new() -> Self {
        Self
    }
}

impl CapabilityProbe for LgProbe {
    fn name(&self) -> &'static str {
        "lg"
    }

    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::LgWithDevice
    }

    fn has_transmitter(&self, ctx: &dyn DeviceContext) -> Result<bool, DeviceError> {
        let Some(sdk) = ctx.lg_sdk() else {
            debug!("LG IRBlaster SDK not present");
            return Ok(false);
        };
        let supported = sdk.is_sdk_supported()?;
        debug!("Check LG IRBlaster: {}", supported);
        Ok(supported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_variants() {
        let config = DetectionConfig::default();
        assert_eq!(
            NativeHardwareProbe::new(&config).variant(),
            TransmitterVariant::NativeHardware
        );
        assert_eq!(
            ObsoleteSamsungProbe::new(&config).variant(),
            TransmitterVariant::ObsoleteSamsung
        );
        assert_eq!(HtcProbe::new(&config).variant(), TransmitterVariant::Htc);
        assert_eq!(
            LeCoolpadProbe::new(&config).variant(),
            TransmitterVariant::LeCoolpad
        );
        assert_eq!(LgProbe::new().variant(), TransmitterVariant::LgWithDevice);
    }

    #[test]
    fn test_obsolete_probe_uses_config_token() {
        let config = DetectionConfig {
            trial_frequency: 40_000,
            trial_pattern: vec![1, 2],
            ..Default::default()
        };
        let probe = ObsoleteSamsungProbe::new(&config);
        assert_eq!(probe.trial_token, "40000,1,2");
    }
}
