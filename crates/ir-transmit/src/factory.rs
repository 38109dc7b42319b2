//! Construct the transmitter for a detected variant

use std::sync::Arc;

use ir_detect::{detect, DetectionConfig, DeviceContext};
use ir_protocol::TransmitterVariant;
use tracing::{debug, info, warn};

use crate::config::TransmitterConfig;
use crate::error::TransmitError;
use crate::htc::HtcTransmitter;
use crate::le::LeTransmitter;
use crate::lg::LgTransmitter;
use crate::native::NativeTransmitter;
use crate::obsolete::ObsoleteSamsungTransmitter;
use crate::transmitter::Transmitter;

/// Build the transmitter for `variant`
///
/// Every variant is handled. Failures while initialising the vendor SDK
/// surface as [`TransmitError::Construction`].
pub fn create_transmitter(
    variant: TransmitterVariant,
    ctx: Arc<dyn DeviceContext>,
    config: &TransmitterConfig,
) -> Result<Box<dyn Transmitter>, TransmitError> {
    debug!("Creating transmitter for {}", variant);
    let transmitter: Box<dyn Transmitter> = match variant {
        TransmitterVariant::NativeHardware => Box::new(NativeTransmitter::new(ctx.as_ref())?),
        TransmitterVariant::ObsoleteSamsung => {
            Box::new(ObsoleteSamsungTransmitter::new(ctx.as_ref(), config)?)
        }
        TransmitterVariant::Htc => Box::new(HtcTransmitter::new(ctx.as_ref(), config)?),
        TransmitterVariant::LeCoolpad => Box::new(LeTransmitter::new(ctx, config)),
        TransmitterVariant::LgWithDevice | TransmitterVariant::LgWithoutDevice => {
            Box::new(LgTransmitter::new(ctx.as_ref(), variant)?)
        }
    };
    Ok(transmitter)
}

/// Detect the device's mechanism and build its transmitter
///
/// `Ok(None)` when no mechanism is present.
pub fn transmitter_for_device(
    ctx: Arc<dyn DeviceContext>,
    detection: &DetectionConfig,
    config: &TransmitterConfig,
) -> Result<Option<Box<dyn Transmitter>>, TransmitError> {
    match detect(ctx.as_ref(), detection) {
        Some(variant) => {
            info!("Detected {} transmitter", variant);
            create_transmitter(variant, ctx, config).map(Some)
        }
        None => {
            info!("No IR transmitter found on this device");
            Ok(None)
        }
    }
}

/// Whether the native emitter can send at `frequency` Hz
///
/// Devices without the native service report true; other mechanisms do
/// not publish their ranges.
pub fn supports_frequency(ctx: &dyn DeviceContext, frequency: u32) -> bool {
    let Some(service) = ctx.consumer_ir() else {
        return true;
    };
    match service.carrier_frequencies() {
        Ok(ranges) => ranges.iter().any(|r| r.contains(frequency)),
        Err(e) => {
            warn!("Failed to read carrier frequencies: {}", e);
            false
        }
    }
}
