//! Async wrapper serializing access to one transmitter

use std::sync::Arc;
use std::time::Duration;

use ir_protocol::{PulsePattern, TransmitInfo, TransmitterVariant};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::TransmitError;
use crate::lifecycle::TransmitterState;
use crate::transmitter::{transmit_pattern, Transmitter};

/// A transmitter shared between async tasks
///
/// Calls are serialized by the lock in acquisition order. Vendor calls may
/// block, so they run on the blocking thread pool.
#[derive(Clone)]
pub struct SharedTransmitter {
    inner: Arc<Mutex<Box<dyn Transmitter>>>,
    variant: TransmitterVariant,
}

impl SharedTransmitter {
    pub fn new(transmitter: Box<dyn Transmitter>) -> Self {
        let variant = transmitter.variant();
        Self {
            inner: Arc::new(Mutex::new(transmitter)),
            variant,
        }
    }

    pub fn variant(&self) -> TransmitterVariant {
        self.variant
    }

    pub async fn state(&self) -> TransmitterState {
        self.inner.lock().await.state()
    }

    pub async fn is_ready(&self) -> bool {
        self.inner.lock().await.is_ready()
    }

    pub async fn start(&self) -> Result<(), TransmitError> {
        self.run(|t| {
            t.start();
            Ok(())
        })
        .await
    }

    /// Wait for readiness without holding the lock across the whole wait
    pub async fn wait_ready(&self, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.is_ready().await {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    pub async fn transmit(&self, info: TransmitInfo) -> Result<(), TransmitError> {
        debug!("Queueing {}", info);
        self.run(move |t| {
            t.transmit(&info);
            Ok(())
        })
        .await
    }

    pub async fn transmit_pattern(&self, pattern: PulsePattern) -> Result<(), TransmitError> {
        self.run(move |t| transmit_pattern(t, &pattern)).await
    }

    pub async fn stop(&self) -> Result<(), TransmitError> {
        self.run(|t| {
            t.stop();
            Ok(())
        })
        .await
    }

    async fn run<F>(&self, f: F) -> Result<(), TransmitError>
    where
        F: FnOnce(&mut dyn Transmitter) -> Result<(), TransmitError> + Send + 'static,
    {
        let mut guard = self.inner.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut **guard))
            .await
            .map_err(|e| TransmitError::Join(e.to_string()))?
    }
}
