//! Vendor SDK collaborator traits
//!
//! These mirror the call shapes of the HTC CIR and LG IRBlaster SDKs.
//! The SDKs themselves are opaque; only their inputs and result codes
//! are modelled here.

use std::fmt;
use std::sync::Arc;

use crate::context::LinkListener;
use crate::error::DeviceError;

// ============================================================================
// HTC CIR control
// ============================================================================

/// Frame handed to the HTC SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtcIrData {
    /// Repeat count
    pub repeat: u32,
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Carrier-cycle counts
    pub frame: Vec<u32>,
}

impl HtcIrData {
    /// Single-shot frame
    pub fn once(frequency: u32, frame: Vec<u32>) -> Self {
        Self {
            repeat: 1,
            frequency,
            frame,
        }
    }
}

/// HTC CIR control handle
pub trait HtcCirControl: Send + Sync {
    fn start(&self) -> Result<(), DeviceError>;
    fn stop(&self) -> Result<(), DeviceError>;
    fn is_started(&self) -> bool;
    /// Queue one frame; `droppable` lets the SDK discard it when busy
    fn transmit_ir(&self, data: &HtcIrData, droppable: bool) -> Result<(), DeviceError>;
}

/// Result codes carried by HTC reply messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtcResultCode {
    Success,
    /// Hardware is busy with an earlier command
    IoError,
    InvalidValue,
    /// SDK too busy; the frame was dropped
    CommandDropped,
    CancelFailed,
    Other(i32),
}

/// Asynchronous reply message from the HTC SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtcReply {
    TransmitResult(HtcResultCode),
    CancelResult(HtcResultCode),
    LearnResult(i32),
    Other(i32),
}

/// Receiver of HTC replies; may be called from any thread
pub trait HtcReplyListener: Send + Sync {
    fn on_reply(&self, reply: HtcReply);
}

// ============================================================================
// LG IRBlaster
// ============================================================================

/// LG SDK entry point, present only when the SDK classes resolve
pub trait LgIrSdk: Send + Sync {
    /// Whether the SDK reports this device as supported
    fn is_sdk_supported(&self) -> Result<bool, DeviceError>;

    /// Open the blaster; readiness arrives later as [`crate::LinkEvent::ReadySignal`]
    fn open(&self, listener: Arc<dyn LinkListener>) -> Result<Arc<dyn LgIrBlaster>, DeviceError>;
}

/// Key function stored for an LG device profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LgKeyFunction {
    pub id: i32,
    pub name: String,
}

/// Device profile known to the LG SDK
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LgDevice {
    pub id: i32,
    pub name: String,
    pub key_functions: Vec<LgKeyFunction>,
}

/// Request to send a stored key function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrAction {
    pub device_id: i32,
    pub function_id: i32,
    pub duration: i32,
}

/// Result code returned by LG send calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LgResultCode(pub i32);

impl LgResultCode {
    pub const SUCCESS: LgResultCode = LgResultCode(0);

    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for LgResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            f.write_str("SUCCESS")
        } else {
            write!(f, "FAILURE({})", self.0)
        }
    }
}

/// Open LG blaster handle
pub trait LgIrBlaster: Send + Sync {
    /// Send microsecond durations at `frequency` Hz
    fn send_ir_pattern(&self, frequency: u32, pattern: &[u32]) -> Result<LgResultCode, DeviceError>;
    /// Send a stored key function
    fn send_ir(&self, action: &IrAction) -> Result<LgResultCode, DeviceError>;
    /// Device profiles known to the SDK
    fn devices(&self) -> Result<Vec<LgDevice>, DeviceError>;
    fn close(&self) -> Result<(), DeviceError>;
}
