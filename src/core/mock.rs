//! Mock transmitter for testing controllers and handlers without IR hardware.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use super::transmitter::Transmitter;
use crate::models::TransmitError;

/// A [`Transmitter`] that records every file it is asked to send and answers
/// with a canned result.
pub struct MockTransmitter {
    device: String,
    result: Result<(), TransmitError>,
    delay: Option<Duration>,
    sent: Mutex<Vec<PathBuf>>,
}

impl MockTransmitter {
    /// Always succeeds
    pub fn ok() -> Self {
        Self::with_result(Ok(()))
    }

    /// Always fails with `err`
    pub fn failing(err: TransmitError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(result: Result<(), TransmitError>) -> Self {
        Self {
            device: "mock0".to_string(),
            result,
            delay: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to simulate a slow emitter
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Files passed to `transmit`, in call order
    pub fn sent(&self) -> Vec<PathBuf> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Transmitter for MockTransmitter {
    async fn transmit(&self, path: &Path) -> Result<(), TransmitError> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.clone()
    }

    fn device(&self) -> &str {
        &self.device
    }
}
