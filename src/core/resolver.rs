//! Resource resolution: command → signal file on disk

use std::path::PathBuf;
use tracing::debug;

use crate::models::{ControlError, Device, IrCommand};

/// Maps commands of one device to `<dir>/<prefix>_<command>.txt`.
///
/// Existence is checked on every call; files may be added or removed while
/// the server runs.
#[derive(Debug, Clone)]
pub struct ResourceResolver {
    device: Device,
    dir: PathBuf,
}

impl ResourceResolver {
    pub fn new(device: Device, dir: impl Into<PathBuf>) -> Self {
        Self {
            device,
            dir: dir.into(),
        }
    }

    pub fn device(&self) -> Device {
        self.device
    }

    /// Deterministic path for `command`, whether or not it exists
    pub fn path_for<C: IrCommand>(&self, command: C) -> PathBuf {
        self.dir
            .join(format!("{}_{}.txt", self.device.prefix(), command.as_str()))
    }

    /// Path for `command`, or `ResourceNotFound` if the file is absent.
    ///
    /// Lookup failures other than absence (permissions, over-long names)
    /// are `ResourceUnreadable`.
    pub async fn resolve<C: IrCommand>(&self, command: C) -> Result<PathBuf, ControlError> {
        let path = self.path_for(command);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Ok(path),
            Ok(false) => {
                debug!(path = %path.display(), "resource file missing");
                Err(ControlError::ResourceNotFound {
                    device: self.device,
                    command: command.as_str(),
                })
            }
            Err(e) => Err(ControlError::ResourceUnreadable {
                device: self.device,
                command: command.as_str(),
                reason: e.to_string(),
            }),
        }
    }
}
