//! Simulated device
//!
//! [`SimulatedDevice`] implements every collaborator trait from
//! `ir-detect`. All traffic is recorded as [`SimCall`]s. Connection
//! callbacks are either fired by the test (`connect_service`,
//! `signal_lg_ready`, ...) or delivered from a background thread when the
//! profile enables `auto_callbacks`.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ir_detect::{
    CarrierFrequencyRange, ConsumerIrService, DeviceContext, DeviceError, HtcCirControl,
    HtcIrData, HtcReply, HtcReplyListener, HtcResultCode, IrAction, LgDevice, LgIrBlaster,
    LgIrSdk, LgResultCode, LinkEvent, LinkListener, RemoteIrControl, ServiceBinding,
    StringPrimitive, SystemService,
};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, info};

use crate::profile::DeviceProfile;

/// One recorded interaction with the simulated device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimCall {
    /// Native consumer IR transmit
    NativeTransmit { frequency: u32, pattern: Vec<u32> },
    /// Legacy primitive invoked with a token
    LegacyInvoke(String),
    /// Service bind requested
    Bind(ServiceBinding),
    /// Service unbind requested
    Unbind(ServiceBinding),
    /// Transmit through a bound remote-control service
    RemoteTransmit { frequency: u32, pattern: Vec<u32> },
    HtcStart,
    HtcStop,
    /// Frame handed to the HTC SDK
    HtcTransmit { data: HtcIrData, droppable: bool },
    LgOpen,
    /// Raw pattern sent through the LG SDK
    LgSendPattern { frequency: u32, pattern: Vec<u32> },
    /// Stored key function sent through the LG SDK
    LgSendIr(IrAction),
    LgClose,
}

#[derive(Default)]
struct Listeners {
    bound: Option<Arc<dyn LinkListener>>,
    lg: Option<Arc<dyn LinkListener>>,
    htc: Option<Arc<dyn HtcReplyListener>>,
}

struct SimShared {
    calls: Mutex<Vec<SimCall>>,
    changed: Condvar,
    listeners: Mutex<Listeners>,
}

impl SimShared {
    fn record(&self, call: SimCall) {
        debug!("sim: {:?}", call);
        self.calls.lock().push(call);
        self.changed.notify_all();
    }
}

/// A fake Android device driven by a [`DeviceProfile`]
///
/// Clones share the same recording and callback state.
#[derive(Clone)]
pub struct SimulatedDevice {
    profile: Arc<DeviceProfile>,
    shared: Arc<SimShared>,
}

impl SimulatedDevice {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            profile: Arc::new(profile),
            shared: Arc::new(SimShared {
                calls: Mutex::new(Vec::new()),
                changed: Condvar::new(),
                listeners: Mutex::new(Listeners::default()),
            }),
        }
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// This device as a shared collaborator handle
    pub fn context(&self) -> Arc<dyn DeviceContext> {
        Arc::new(self.clone())
    }

    /// Snapshot of every recorded call
    pub fn calls(&self) -> Vec<SimCall> {
        self.shared.calls.lock().clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.shared.calls.lock().clear();
    }

    /// Block until `pred` holds for the recorded calls or `timeout` elapses
    pub fn wait_for_calls(&self, timeout: Duration, pred: impl Fn(&[SimCall]) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        let mut calls = self.shared.calls.lock();
        while !pred(&calls) {
            if self.shared.changed.wait_until(&mut calls, deadline).timed_out() {
                return pred(&calls);
            }
        }
        true
    }

    /// Deliver `Connected` to the last bind listener
    ///
    /// Returns false if nothing is bound.
    pub fn connect_service(&self) -> bool {
        let remote: Arc<dyn RemoteIrControl> = Arc::new(SimRemote {
            shared: self.shared.clone(),
            fail: self.profile.fail_transmits,
        });
        self.deliver_bound(LinkEvent::Connected(remote))
    }

    /// Deliver `Disconnected` to the last bind listener
    pub fn disconnect_service(&self) -> bool {
        self.deliver_bound(LinkEvent::Disconnected)
    }

    /// Deliver the LG SDK's ready signal
    pub fn signal_lg_ready(&self) -> bool {
        self.deliver_lg(LinkEvent::ReadySignal)
    }

    /// Deliver an LG SDK failure code
    pub fn signal_lg_failure(&self, code: i32) -> bool {
        self.deliver_lg(LinkEvent::Failure(code))
    }

    /// Deliver an HTC reply message
    pub fn htc_reply(&self, reply: HtcReply) -> bool {
        let listener = self.shared.listeners.lock().htc.clone();
        match listener {
            Some(listener) => {
                listener.on_reply(reply);
                true
            }
            None => false,
        }
    }

    fn deliver_bound(&self, event: LinkEvent) -> bool {
        let listener = self.shared.listeners.lock().bound.clone();
        deliver(listener, event)
    }

    fn deliver_lg(&self, event: LinkEvent) -> bool {
        let listener = self.shared.listeners.lock().lg.clone();
        deliver(listener, event)
    }

    /// Fire `f` on a background thread after the configured delay
    fn later(&self, f: impl FnOnce(SimulatedDevice) + Send + 'static) {
        let device = self.clone();
        let delay = Duration::from_millis(self.profile.callback_delay_ms);
        thread::spawn(move || {
            thread::sleep(delay);
            f(device);
        });
    }
}

fn deliver(listener: Option<Arc<dyn LinkListener>>, event: LinkEvent) -> bool {
    match listener {
        Some(listener) => {
            listener.on_link_event(event);
            true
        }
        None => false,
    }
}

fn send_failure(what: &str) -> DeviceError {
    DeviceError::Invocation(format!("simulated {} failure", what))
}

impl DeviceContext for SimulatedDevice {
    fn consumer_ir(&self) -> Option<Arc<dyn ConsumerIrService>> {
        if !self.profile.consumer_ir {
            return None;
        }
        Some(Arc::new(SimConsumerIr {
            shared: self.shared.clone(),
            has_emitter: self.profile.has_ir_emitter,
            ranges: self.profile.carrier_frequencies.clone(),
            fail: self.profile.fail_transmits,
        }))
    }

    fn installed_packages(&self) -> Result<Vec<String>, DeviceError> {
        if self.profile.enumeration_fails {
            return Err(DeviceError::EnumerationFailed(
                "simulated package manager failure".to_string(),
            ));
        }
        Ok(self.profile.packages.clone())
    }

    fn system_service(&self, key: &str) -> Option<Arc<dyn SystemService>> {
        if key != "irda" || !self.profile.legacy_irda {
            return None;
        }
        Some(Arc::new(SimIrda {
            shared: self.shared.clone(),
            has_primitive: self.profile.legacy_send_primitive,
            fail: self.profile.fail_transmits,
        }))
    }

    fn brand(&self) -> String {
        self.profile.brand.clone()
    }

    fn bind_service(
        &self,
        binding: &ServiceBinding,
        listener: Arc<dyn LinkListener>,
    ) -> Result<(), DeviceError> {
        self.shared.record(SimCall::Bind(binding.clone()));
        if !self.profile.le_service {
            return Err(DeviceError::Binding(format!(
                "no service {}/{}",
                binding.package, binding.class_name
            )));
        }
        self.shared.listeners.lock().bound = Some(listener);

        if self.profile.auto_callbacks {
            self.later(|device| {
                info!("sim: service connected");
                device.connect_service();
            });
        }
        Ok(())
    }

    fn unbind_service(&self, binding: &ServiceBinding) -> Result<(), DeviceError> {
        self.shared.record(SimCall::Unbind(binding.clone()));
        self.shared.listeners.lock().bound = None;
        Ok(())
    }

    fn htc_control(
        &self,
        replies: Arc<dyn HtcReplyListener>,
    ) -> Result<Arc<dyn HtcCirControl>, DeviceError> {
        if !self.profile.htc_sdk {
            return Err(DeviceError::ServiceUnavailable("HTC CIR control".to_string()));
        }
        self.shared.listeners.lock().htc = Some(replies.clone());
        Ok(Arc::new(SimHtcControl {
            shared: self.shared.clone(),
            replies,
            started: Mutex::new(false),
            fail: self.profile.fail_transmits,
        }))
    }

    fn lg_sdk(&self) -> Option<Arc<dyn LgIrSdk>> {
        if !self.profile.lg_sdk {
            return None;
        }
        Some(Arc::new(SimLgSdk {
            device: self.clone(),
        }))
    }
}

// ============================================================================
// Collaborator implementations
// ============================================================================

struct SimConsumerIr {
    shared: Arc<SimShared>,
    has_emitter: bool,
    ranges: Vec<CarrierFrequencyRange>,
    fail: bool,
}

impl ConsumerIrService for SimConsumerIr {
    fn has_ir_emitter(&self) -> Result<bool, DeviceError> {
        Ok(self.has_emitter)
    }

    fn carrier_frequencies(&self) -> Result<Vec<CarrierFrequencyRange>, DeviceError> {
        Ok(self.ranges.clone())
    }

    fn transmit(&self, frequency: u32, pattern: &[u32]) -> Result<(), DeviceError> {
        if self.fail {
            return Err(send_failure("native transmit"));
        }
        self.shared.record(SimCall::NativeTransmit {
            frequency,
            pattern: pattern.to_vec(),
        });
        Ok(())
    }
}

struct SimIrda {
    shared: Arc<SimShared>,
    has_primitive: bool,
    fail: bool,
}

impl SystemService for SimIrda {
    fn bind_primitive(&self, name: &str) -> Option<Arc<dyn StringPrimitive>> {
        if name != "write_irsend" || !self.has_primitive {
            return None;
        }
        Some(Arc::new(SimPrimitive {
            shared: self.shared.clone(),
            fail: self.fail,
        }))
    }
}

struct SimPrimitive {
    shared: Arc<SimShared>,
    fail: bool,
}

impl StringPrimitive for SimPrimitive {
    fn invoke(&self, arg: &str) -> Result<(), DeviceError> {
        if self.fail {
            return Err(send_failure("write_irsend"));
        }
        self.shared.record(SimCall::LegacyInvoke(arg.to_string()));
        Ok(())
    }
}

struct SimRemote {
    shared: Arc<SimShared>,
    fail: bool,
}

impl RemoteIrControl for SimRemote {
    fn transmit(&self, frequency: u32, pattern: &[u32]) -> Result<(), DeviceError> {
        if self.fail {
            return Err(DeviceError::Remote("simulated remote failure".to_string()));
        }
        self.shared.record(SimCall::RemoteTransmit {
            frequency,
            pattern: pattern.to_vec(),
        });
        Ok(())
    }
}

struct SimHtcControl {
    shared: Arc<SimShared>,
    replies: Arc<dyn HtcReplyListener>,
    started: Mutex<bool>,
    fail: bool,
}

impl HtcCirControl for SimHtcControl {
    fn start(&self) -> Result<(), DeviceError> {
        self.shared.record(SimCall::HtcStart);
        *self.started.lock() = true;
        Ok(())
    }

    fn stop(&self) -> Result<(), DeviceError> {
        self.shared.record(SimCall::HtcStop);
        *self.started.lock() = false;
        Ok(())
    }

    fn is_started(&self) -> bool {
        *self.started.lock()
    }

    fn transmit_ir(&self, data: &HtcIrData, droppable: bool) -> Result<(), DeviceError> {
        self.shared.record(SimCall::HtcTransmit {
            data: data.clone(),
            droppable,
        });
        let code = if self.fail {
            HtcResultCode::IoError
        } else {
            HtcResultCode::Success
        };
        self.replies.on_reply(HtcReply::TransmitResult(code));
        Ok(())
    }
}

struct SimLgSdk {
    device: SimulatedDevice,
}

impl LgIrSdk for SimLgSdk {
    fn is_sdk_supported(&self) -> Result<bool, DeviceError> {
        Ok(self.device.profile.lg_supported)
    }

    fn open(&self, listener: Arc<dyn LinkListener>) -> Result<Arc<dyn LgIrBlaster>, DeviceError> {
        let device = &self.device;
        device.shared.record(SimCall::LgOpen);
        if !device.profile.lg_supported {
            return Err(DeviceError::Sdk {
                code: -1,
                message: "IRBlaster not supported".to_string(),
            });
        }
        device.shared.listeners.lock().lg = Some(listener);

        if device.profile.auto_callbacks {
            device.later(|device| {
                info!("sim: LG IRBlaster ready");
                device.signal_lg_ready();
            });
        }

        Ok(Arc::new(SimLgBlaster {
            shared: device.shared.clone(),
            devices: device.profile.lg_devices.iter().map(LgDevice::from).collect(),
            fail: device.profile.fail_transmits,
        }))
    }
}

struct SimLgBlaster {
    shared: Arc<SimShared>,
    devices: Vec<LgDevice>,
    fail: bool,
}

impl SimLgBlaster {
    fn result(&self) -> LgResultCode {
        if self.fail {
            LgResultCode(-1)
        } else {
            LgResultCode::SUCCESS
        }
    }
}

impl LgIrBlaster for SimLgBlaster {
    fn send_ir_pattern(&self, frequency: u32, pattern: &[u32]) -> Result<LgResultCode, DeviceError> {
        self.shared.record(SimCall::LgSendPattern {
            frequency,
            pattern: pattern.to_vec(),
        });
        Ok(self.result())
    }

    fn send_ir(&self, action: &IrAction) -> Result<LgResultCode, DeviceError> {
        self.shared.record(SimCall::LgSendIr(*action));
        Ok(self.result())
    }

    fn devices(&self) -> Result<Vec<LgDevice>, DeviceError> {
        Ok(self.devices.clone())
    }

    fn close(&self) -> Result<(), DeviceError> {
        self.shared.record(SimCall::LgClose);
        Ok(())
    }
}
