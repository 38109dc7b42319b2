//! OS-level consumer IR transmitter

use std::sync::Arc;

use ir_detect::{CarrierFrequencyRange, ConsumerIrService, DeviceContext, DeviceError};
use ir_protocol::{TransmitInfo, TransmitterVariant};
use tracing::{debug, error, warn};

use crate::error::TransmitError;
use crate::lifecycle::{Lifecycle, TransmitterState};
use crate::transmitter::Transmitter;

/// Transmitter backed by the native consumer IR service
///
/// Ready immediately after construction.
pub struct NativeTransmitter {
    service: Arc<dyn ConsumerIrService>,
    lifecycle: Lifecycle,
}

impl NativeTransmitter {
    pub fn new(ctx: &dyn DeviceContext) -> Result<Self, TransmitError> {
        debug!("Creating native transmitter");
        let service = ctx.consumer_ir().ok_or_else(|| {
            TransmitError::construction(
                TransmitterVariant::NativeHardware,
                DeviceError::ServiceUnavailable("consumer_ir".to_string()),
            )
        })?;
        Ok(Self {
            service,
            lifecycle: Lifecycle::ready(),
        })
    }

    /// Carrier frequency ranges the emitter supports
    pub fn carrier_frequencies(&self) -> Vec<CarrierFrequencyRange> {
        match self.service.carrier_frequencies() {
            Ok(ranges) => ranges,
            Err(e) => {
                warn!("Failed to read carrier frequencies: {}", e);
                Vec::new()
            }
        }
    }
}

impl Transmitter for NativeTransmitter {
    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::NativeHardware
    }

    fn state(&self) -> TransmitterState {
        self.lifecycle.state()
    }

    fn start(&mut self) {
        self.lifecycle.restart_ready();
    }

    fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    fn transmit(&mut self, info: &TransmitInfo) {
        if !self.lifecycle.begin_transmit() {
            warn!("Native transmitter not ready ({})", self.lifecycle.state().name());
            return;
        }

        debug!("Transmitting {}", info);
        let result = info
            .require_durations()
            .map_err(TransmitError::from)
            .and_then(|durations| {
                self.service
                    .transmit(info.frequency(), durations)
                    .map_err(TransmitError::from)
            });
        match result {
            Ok(()) => debug!("Transmission completed successfully"),
            Err(e) => error!("Error during transmission: {}", e),
        }

        self.lifecycle.finish_transmit();
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}
