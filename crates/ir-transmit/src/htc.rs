//! HTC CIR transmitter
//!
//! Sends run on a dedicated message-loop thread so `transmit` returns
//! immediately. The same loop receives the SDK's reply messages, so sends
//! and replies are handled in the order they were posted.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ir_detect::{
    DeviceContext, HtcCirControl, HtcIrData, HtcReply, HtcReplyListener, HtcResultCode,
};
use ir_protocol::{TransmitInfo, TransmitterVariant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::TransmitterConfig;
use crate::error::TransmitError;
use crate::lifecycle::TransmitterState;
use crate::transmitter::Transmitter;

/// Messages processed by the HTC worker loop
#[derive(Debug)]
enum HtcMessage {
    /// Send one frame
    Send(HtcIrData),
    /// Reply from the SDK
    Reply(HtcReply),
    /// Exit the loop
    Shutdown,
}

/// Posts SDK replies onto the worker loop
struct ReplyForwarder {
    tx: mpsc::UnboundedSender<HtcMessage>,
}

impl HtcReplyListener for ReplyForwarder {
    fn on_reply(&self, reply: HtcReply) {
        if self.tx.send(HtcMessage::Reply(reply)).is_err() {
            debug!("HTC reply {:?} after worker exit", reply);
        }
    }
}

/// Transmitter backed by the HTC CIR control SDK
pub struct HtcTransmitter {
    control: Arc<dyn HtcCirControl>,
    tx: mpsc::UnboundedSender<HtcMessage>,
    worker: Option<JoinHandle<()>>,
    state: TransmitterState,
}

impl HtcTransmitter {
    pub fn new(ctx: &dyn DeviceContext, config: &TransmitterConfig) -> Result<Self, TransmitError> {
        debug!("Creating HTC transmitter");
        let (tx, rx) = mpsc::unbounded_channel();

        let replies = Arc::new(ReplyForwarder { tx: tx.clone() });
        let control = ctx
            .htc_control(replies)
            .map_err(|e| TransmitError::construction(TransmitterVariant::Htc, e))?;

        let worker_control = control.clone();
        let droppable = config.htc_droppable;
        let worker = thread::Builder::new()
            .name("htc-ir".to_string())
            .spawn(move || run_worker(worker_control, droppable, rx))?;

        debug!("HTC transmitter created");
        Ok(Self {
            control,
            tx,
            worker: Some(worker),
            state: TransmitterState::Created,
        })
    }
}

impl Transmitter for HtcTransmitter {
    fn variant(&self) -> TransmitterVariant {
        TransmitterVariant::Htc
    }

    fn state(&self) -> TransmitterState {
        self.state
    }

    fn start(&mut self) {
        debug!("Starting HTC CIR control");
        match self.control.start() {
            Ok(()) => self.state = TransmitterState::Ready,
            Err(e) => error!("Failed to start HTC CIR control: {}", e),
        }
    }

    fn is_ready(&self) -> bool {
        self.state == TransmitterState::Ready && self.control.is_started()
    }

    fn transmit(&mut self, info: &TransmitInfo) {
        if !self.is_ready() {
            warn!("HTC CIR control not started");
            return;
        }

        let frame = match info.require_durations() {
            Ok(frame) => frame.to_vec(),
            Err(e) => {
                error!("Cannot transmit on HTC: {}", e);
                return;
            }
        };

        debug!("Posting HTC frame ({} values)", frame.len());
        if self
            .tx
            .send(HtcMessage::Send(HtcIrData::once(info.frequency(), frame)))
            .is_err()
        {
            error!("HTC worker is gone; frame dropped");
        }
    }

    fn stop(&mut self) {
        if self.state != TransmitterState::Ready {
            self.state = TransmitterState::Stopped;
            return;
        }
        debug!("Stopping HTC CIR control");
        if let Err(e) = self.control.stop() {
            error!("Failed to stop HTC CIR control: {}", e);
        }
        self.state = TransmitterState::Stopped;
    }
}

impl Drop for HtcTransmitter {
    fn drop(&mut self) {
        let _ = self.tx.send(HtcMessage::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("HTC worker panicked");
            }
        }
    }
}

/// Worker loop: executes sends and logs replies in post order
fn run_worker(
    control: Arc<dyn HtcCirControl>,
    droppable: bool,
    mut rx: mpsc::UnboundedReceiver<HtcMessage>,
) {
    info!("HTC worker started");
    while let Some(msg) = rx.blocking_recv() {
        match msg {
            HtcMessage::Send(data) => {
                if let Err(e) = control.transmit_ir(&data, droppable) {
                    error!("HTC transmit failed: {}", e);
                }
            }
            HtcMessage::Reply(reply) => log_reply(reply),
            HtcMessage::Shutdown => break,
        }
    }
    info!("HTC worker stopped");
}

fn log_reply(reply: HtcReply) {
    match reply {
        HtcReply::TransmitResult(code) => match code {
            HtcResultCode::Success => debug!("HTC transmit completed"),
            HtcResultCode::IoError => {
                error!("HTC send error IO_ERROR: CIR hardware busy with an earlier command")
            }
            HtcResultCode::InvalidValue => error!("HTC send error INVALID_VALUE"),
            HtcResultCode::CommandDropped => {
                warn!("HTC send error CMD_DROPPED: SDK too busy, retry later or send non-droppable")
            }
            other => debug!("HTC transmit result {:?}", other),
        },
        HtcReply::CancelResult(code) => match code {
            HtcResultCode::IoError => {
                error!("HTC cancel error IO_ERROR: CIR hardware busy with an earlier command")
            }
            HtcResultCode::CancelFailed => error!("HTC cancel error CANCEL_FAIL"),
            other => debug!("HTC cancel result {:?}", other),
        },
        HtcReply::LearnResult(code) => debug!("HTC learn result {}", code),
        HtcReply::Other(what) => debug!("HTC message {}", what),
    }
}
