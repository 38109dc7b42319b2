//! Le/Coolpad UEI remote-control transmitter

use std::sync::Arc;
use std::time::Duration;

use ir_detect::{DeviceContext, LinkListener, ServiceBinding};
use ir_protocol::{TransmitInfo, TransmitterVariant};
use tracing::{debug, error, info, warn};

use crate::config::TransmitterConfig;
use crate::error::TransmitError;
use crate::lifecycle::{Lifecycle, SharedLifecycle, TransmitterState};
use crate::transmitter::Transmitter;

/// Transmitter that binds the vendor remote-control service
///
/// `start` only requests the bind. The service's capability arrives later
/// on a callback thread; until then `transmit` drops patterns with a
/// warning.
pub struct LeTransmitter {
    ctx: Arc<dyn DeviceContext>,
    binding: ServiceBinding,
    link: SharedLifecycle,
    bound: bool,
}

impl LeTransmitter {
    pub fn new(ctx: Arc<dyn DeviceContext>, config: &TransmitterConfig) -> Self {
        let brand = ctx.brand();
        let binding = ServiceBinding {
            package: config.le_package_for_brand(&brand).to_string(),
            class_name: config.le_service_class.clone(),
            action: config.le_service_action.clone(),
        };
        debug!("Le transmitter for brand {:?} uses {}", brand, binding.package);
        Self {
            ctx,
            binding,
            link: SharedLifecycle::new(Lifecycle::new()),
            bound: false,
        }
    }

    /// The bind target chosen for this device
    pub fn binding(&self) -> &ServiceBinding {
        &self.binding
    }
}

impl Transmitter for LeTransmitter {
    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::LeCoolpad
    }

    fn state(&self) -> TransmitterState {
        self.link.state()
    }

    fn start(&mut self) {
        if !self.link.with(|l| l.begin_start()) {
            debug!("Le service bind already live ({})", self.link.state().name());
            return;
        }

        info!("Binding {}/{}", self.binding.package, self.binding.class_name);
        let listener: Arc<dyn LinkListener> = Arc::new(self.link.clone());
        match self.ctx.bind_service(&self.binding, listener) {
            Ok(()) => self.bound = true,
            Err(e) => {
                error!("Failed to bind Le IR service: {}", e);
                self.link.with(|l| l.abort_start());
            }
        }
    }

    fn is_ready(&self) -> bool {
        self.link.is_ready()
    }

    fn wait_ready(&self, timeout: Duration) -> bool {
        self.link.wait_ready(timeout)
    }

    fn transmit(&mut self, info: &TransmitInfo) {
        let remote = self.link.with(|l| {
            if l.begin_transmit() {
                l.remote()
            } else {
                None
            }
        });

        let Some(remote) = remote else {
            // begin_transmit may have succeeded on a ReadySignal without a capability
            self.link.with(|l| l.finish_transmit());
            warn!("Le IR service not ready; pattern dropped");
            return;
        };

        let result = info
            .require_durations()
            .map_err(TransmitError::from)
            .and_then(|durations| {
                remote
                    .transmit(info.frequency(), durations)
                    .map_err(TransmitError::from)
            });
        match result {
            Ok(()) => debug!("Le transmission completed"),
            Err(e) => error!("Le transmission failed: {}", e),
        }

        self.link.with(|l| l.finish_transmit());
    }

    fn stop(&mut self) {
        if self.bound {
            debug!("Unbinding Le IR service");
            if let Err(e) = self.ctx.unbind_service(&self.binding) {
                error!("Failed to unbind Le IR service: {}", e);
            }
            self.bound = false;
        }
        self.link.with(|l| l.stop());
    }
}
