//! IR transmission through an external tool
//!
//! The production transmitter shells out to `ir-ctl -d <device> --send <file>`
//! with a hard timeout. Invocations targeting the same device are serialized
//! through [`DeviceLocks`] so two requests never drive one emitter at once.

use async_trait::async_trait;
use dashmap::DashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::{TransmitError, TransmitterSettings};

/// Sends the IR code stored in a resource file
#[async_trait]
pub trait Transmitter: Send + Sync {
    async fn transmit(&self, path: &Path) -> Result<(), TransmitError>;

    /// Identifier of the hardware this transmitter drives
    fn device(&self) -> &str;
}

/// One async mutex per transmitter device identifier
#[derive(Debug, Default)]
pub struct DeviceLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl DeviceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared lock for `device`, created on first use
    pub fn lock_for(&self, device: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(device.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Transmitter backed by the `ir-ctl` command line tool
pub struct IrCtlTransmitter {
    settings: TransmitterSettings,
    lock: Arc<Mutex<()>>,
}

impl IrCtlTransmitter {
    pub fn new(settings: TransmitterSettings, locks: &DeviceLocks) -> Self {
        let lock = locks.lock_for(&settings.device);
        Self { settings, lock }
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.settings.program);
        cmd.arg("-d")
            .arg(&self.settings.device)
            .arg("--send")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // the child must not outlive a timed-out request
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Transmitter for IrCtlTransmitter {
    async fn transmit(&self, path: &Path) -> Result<(), TransmitError> {
        let limit = self.settings.timeout;

        let _guard = tokio::time::timeout(limit, self.lock.lock())
            .await
            .map_err(|_| {
                warn!(device = %self.settings.device, "transmitter busy, gave up waiting");
                TransmitError::Busy
            })?;

        let start = Instant::now();
        let output = match tokio::time::timeout(limit, self.command(path).output()).await {
            Err(_) => {
                warn!(
                    file = %path.display(),
                    timeout_ms = %limit.as_millis(),
                    "IR transmission timed out"
                );
                return Err(TransmitError::Timeout);
            }
            Ok(Err(e)) => return Err(TransmitError::from_spawn(&self.settings.program, e)),
            Ok(Ok(output)) => output,
        };

        if !output.status.success() {
            return Err(TransmitError::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(
            file = %path.display(),
            latency_ms = %start.elapsed().as_millis(),
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "IR signal sent"
        );
        Ok(())
    }

    fn device(&self) -> &str {
        &self.settings.device
    }
}
