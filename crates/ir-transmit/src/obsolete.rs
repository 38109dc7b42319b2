//! Legacy Samsung `irda` transmitter

use std::sync::Arc;

use ir_detect::{DeviceContext, DeviceError, StringPrimitive};
use ir_protocol::{TransmitInfo, TransmitterVariant};
use tracing::{debug, error, warn};

use crate::config::TransmitterConfig;
use crate::error::TransmitError;
use crate::lifecycle::{Lifecycle, TransmitterState};
use crate::transmitter::Transmitter;

/// Transmitter for the legacy Samsung service
///
/// The send primitive is bound once at construction and reused; a device
/// without it fails construction rather than every send.
pub struct ObsoleteSamsungTransmitter {
    send: Arc<dyn StringPrimitive>,
    lifecycle: Lifecycle,
}

impl ObsoleteSamsungTransmitter {
    pub fn new(ctx: &dyn DeviceContext, config: &TransmitterConfig) -> Result<Self, TransmitError> {
        debug!("Creating obsolete Samsung transmitter");
        let fail = |source| TransmitError::construction(TransmitterVariant::ObsoleteSamsung, source);

        let service = ctx
            .system_service(&config.legacy_service_key)
            .ok_or_else(|| fail(DeviceError::ServiceUnavailable(config.legacy_service_key.clone())))?;
        let send = service
            .bind_primitive(&config.legacy_send_primitive)
            .ok_or_else(|| fail(DeviceError::PrimitiveUnavailable(config.legacy_send_primitive.clone())))?;

        Ok(Self {
            send,
            lifecycle: Lifecycle::ready(),
        })
    }
}

impl Transmitter for ObsoleteSamsungTransmitter {
    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::ObsoleteSamsung
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
            warn!("Obsolete transmitter not ready ({})", self.lifecycle.state().name());
            return;
        }

        let result = info
            .require_obsolete_string()
            .map_err(TransmitError::from)
            .and_then(|token| self.send.invoke(token).map_err(TransmitError::from));
        match result {
            Ok(()) => debug!("IR signal transmitted successfully"),
            Err(e) => error!("Obsolete transmission failed: {}", e),
        }

        self.lifecycle.finish_transmit();
    }

    fn stop(&mut self) {
        self.lifecycle.stop();
    }
}
