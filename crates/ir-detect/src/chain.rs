//! Prioritized detection chain
//!
//! Probes run strictly in order and the first one that succeeds decides
//! the variant. A probe that errors or panics counts as "absent" and the
//! chain moves on; nothing escapes [`DetectionChain::detect`].

use std::panic::{self, AssertUnwindSafe};

use ir_protocol::TransmitterVariant;
use tracing::{debug, info, warn};

use crate::config::DetectionConfig;
use crate::context::DeviceContext;
use crate::error::DetectError;
use crate::probe::{
    CapabilityProbe, HtcProbe, LeCoolpadProbe, LgProbe, NativeHardwareProbe, ObsoleteSamsungProbe,
};

/// Ordered list of capability probes
pub struct DetectionChain {
    probes: Vec<Box<dyn CapabilityProbe>>,
}

impl DetectionChain {
    /// Create the default chain: native, HTC, Le/Coolpad, obsolete Samsung
    ///
    /// The LG probe is appended last only when `config.include_lg` is set.
    pub fn new(config: &DetectionConfig) -> Self {
        let mut probes: Vec<Box<dyn CapabilityProbe>> = vec![
            Box::new(NativeHardwareProbe::new(config)),
            Box::new(HtcProbe::new(config)),
            Box::new(LeCoolpadProbe::new(config)),
            Box::new(ObsoleteSamsungProbe::new(config)),
        ];
        if config.include_lg {
            probes.push(Box::new(LgProbe::new()));
        }
        Self { probes }
    }

    /// Create a chain from an explicit probe order
    pub fn with_probes(probes: Vec<Box<dyn CapabilityProbe>>) -> Self {
        Self { probes }
    }

    /// Names of the probes, in priority order
    pub fn probe_names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name()).collect()
    }

    /// Run probes in order and return the first certified variant
    ///
    /// `None` means no usable transmitter, which is an expected outcome.
    pub fn detect(&self, ctx: &dyn DeviceContext) -> Option<TransmitterVariant> {
        for probe in &self.probes {
            match run_probe(probe.as_ref(), ctx) {
                Ok(true) => {
                    info!("Detected transmitter: {}", probe.variant());
                    return Some(probe.variant());
                }
                Ok(false) => debug!("Probe {} found nothing", probe.name()),
                Err(e) => warn!("Probe {} failed, treating as absent: {}", probe.name(), e),
            }
        }

        info!("No IR transmitter detected (tried {} probes)", self.probes.len());
        None
    }
}

impl Default for DetectionChain {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

/// Run a single probe, converting panics into [`DetectError::ProbePanicked`]
pub fn run_probe(probe: &dyn CapabilityProbe, ctx: &dyn DeviceContext) -> Result<bool, DetectError> {
    debug!("Running probe {}", probe.name());
    match panic::catch_unwind(AssertUnwindSafe(|| probe.has_transmitter(ctx))) {
        Ok(result) => Ok(result?),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(DetectError::ProbePanicked {
                probe: probe.name(),
                message,
            })
        }
    }
}

/// Detect the transmitter variant of a device with the given configuration
///
/// Convenience wrapper over [`DetectionChain::new`] and [`DetectionChain::detect`].
pub fn detect(ctx: &dyn DeviceContext, config: &DetectionConfig) -> Option<TransmitterVariant> {
    DetectionChain::new(config).detect(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let chain = DetectionChain::default();
        assert_eq!(
            chain.probe_names(),
            vec!["native", "htc", "le-coolpad", "obsolete-samsung"]
        );
    }

    #[test]
    fn test_lg_appended_when_enabled() {
        let config = DetectionConfig {
            include_lg: true,
            ..Default::default()
        };
        let chain = DetectionChain::new(&config);
        assert_eq!(chain.probe_names().last(), Some(&"lg"));
        assert_eq!(chain.probe_names().len(), 5);
    }
}
