//! LG IRBlaster transmitter
//!
//! Both LG variants share one transmitter. They differ only in the
//! [`BeforeSend`] hook run ahead of every raw pattern: the device-aware
//! variant first fires a key function of a known device profile.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use ir_detect::{DeviceContext, DeviceError, IrAction, LgDevice, LgIrBlaster, LinkListener};
use ir_protocol::{TransmitInfo, TransmitterVariant};
use tracing::{debug, error, info, warn};

use crate::error::TransmitError;
use crate::lifecycle::{Lifecycle, SharedLifecycle, TransmitterState};
use crate::transmitter::Transmitter;

/// Hook run before each raw pattern is sent
pub trait BeforeSend: Send + Sync {
    fn before_send(&self, blaster: &dyn LgIrBlaster);
}

/// No preamble
pub struct NoPreamble;

impl BeforeSend for NoPreamble {
    fn before_send(&self, _blaster: &dyn LgIrBlaster) {}
}

/// Sends the first key function of the first known device with any
///
/// The device is looked up once, on the first send.
#[derive(Default)]
pub struct KnownDevicePreamble {
    device: OnceLock<Option<LgDevice>>,
}

impl KnownDevicePreamble {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(blaster: &dyn LgIrBlaster) -> Option<LgDevice> {
        match blaster.devices() {
            Ok(devices) => devices.into_iter().find(|d| !d.key_functions.is_empty()),
            Err(e) => {
                error!("Failed to list LG devices: {}", e);
                None
            }
        }
    }
}

impl BeforeSend for KnownDevicePreamble {
    fn before_send(&self, blaster: &dyn LgIrBlaster) {
        let device = self.device.get_or_init(|| Self::select(blaster));
        let Some(device) = device else {
            warn!("No LG device with key functions; skipping preamble");
            return;
        };
        let Some(function) = device.key_functions.first() else {
            return;
        };

        let action = IrAction {
            device_id: device.id,
            function_id: function.id,
            duration: 0,
        };
        debug!("LG preamble {} on {}", function.name, device.name);
        match blaster.send_ir(&action) {
            Ok(code) => debug!("LG preamble result: {}", code),
            Err(e) => error!("LG preamble failed: {}", e),
        }
    }
}

/// Transmitter backed by the LG IRBlaster SDK
///
/// The SDK is opened at construction. Readiness arrives asynchronously
/// when the SDK reports its handshake finished.
pub struct LgTransmitter {
    variant: TransmitterVariant,
    blaster: Arc<dyn LgIrBlaster>,
    link: SharedLifecycle,
    before_send: Box<dyn BeforeSend>,
    closed: bool,
}

impl LgTransmitter {
    pub fn new(ctx: &dyn DeviceContext, variant: TransmitterVariant) -> Result<Self, TransmitError> {
        let before_send: Box<dyn BeforeSend> = match variant {
            TransmitterVariant::LgWithDevice => Box::new(KnownDevicePreamble::new()),
            _ => Box::new(NoPreamble),
        };
        Self::with_preamble(ctx, variant, before_send)
    }

    pub fn with_preamble(
        ctx: &dyn DeviceContext,
        variant: TransmitterVariant,
        before_send: Box<dyn BeforeSend>,
    ) -> Result<Self, TransmitError> {
        debug!("Creating {} transmitter", variant);
        let sdk = ctx.lg_sdk().ok_or_else(|| {
            TransmitError::construction(
                variant,
                DeviceError::ServiceUnavailable("LG IRBlaster".to_string()),
            )
        })?;

        let link = SharedLifecycle::new(Lifecycle::starting());
        let listener: Arc<dyn LinkListener> = Arc::new(link.clone());
        let blaster = sdk
            .open(listener)
            .map_err(|e| TransmitError::construction(variant, e))?;

        Ok(Self {
            variant,
            blaster,
            link,
            before_send,
            closed: false,
        })
    }
}

impl Transmitter for LgTransmitter {
    fn variant(&self) -> TransmitterVariant {
        self.variant
    }

    fn state(&self) -> TransmitterState {
        self.link.state()
    }

    fn start(&mut self) {
        info!("Start not supported in LG IRBlaster");
    }

    fn is_ready(&self) -> bool {
        self.link.is_ready()
    }

    fn wait_ready(&self, timeout: Duration) -> bool {
        self.link.wait_ready(timeout)
    }

    fn transmit(&mut self, info: &TransmitInfo) {
        if !self.link.with(|l| l.begin_transmit()) {
            warn!("LG IRBlaster not ready; pattern dropped");
            return;
        }

        self.before_send.before_send(self.blaster.as_ref());

        let result = info
            .require_durations()
            .map_err(TransmitError::from)
            .and_then(|durations| {
                self.blaster
                    .send_ir_pattern(info.frequency(), durations)
                    .map_err(TransmitError::from)
            });
        match result {
            Ok(code) if code.is_success() => debug!("LG send result: {}", code),
            Ok(code) => warn!("LG send result: {}", code),
            Err(e) => error!("LG transmission failed: {}", e),
        }

        self.link.with(|l| l.finish_transmit());
    }

    fn stop(&mut self) {
        if !self.closed {
            debug!("Closing LG IRBlaster");
            if let Err(e) = self.blaster.close() {
                error!("Failed to close LG IRBlaster: {}", e);
            }
            self.closed = true;
        }
        self.link.with(|l| l.stop());
    }
}
