//! Device façades: resolve → transmit → report
//!
//! [`LightController`] and [`AcController`] share one pipeline. Each call is
//! independent; nothing is retained between commands.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::resolver::ResourceResolver;
use super::transmitter::Transmitter;
use crate::models::{
    AcCommand, AcMode, AcTempControl, AcTimerControl, Category, ControlError, Device, IrCommand,
    LightMode,
};

/// Successful command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub device: Device,
    pub command: &'static str,
    pub message: String,
}

/// Shared pipeline for one device
struct DeviceController {
    resolver: ResourceResolver,
    transmitter: Arc<dyn Transmitter>,
}

impl DeviceController {
    async fn execute<C: IrCommand>(&self, command: C) -> Result<CommandOutcome, ControlError> {
        let device = self.resolver.device();
        let path = self.resolver.resolve(command).await.inspect_err(|e| {
            warn!(device = %device, command = %command, "{}", e);
        })?;

        self.transmitter
            .transmit(&path)
            .await
            .map_err(|source| ControlError::Transmission {
                device,
                command: command.as_str(),
                source,
            })
            .inspect_err(|e| {
                warn!(device = %device, command = %command, code = e.code().as_str(), "{}", e);
            })?;

        info!(
            device = %device,
            command = %command,
            transmitter = self.transmitter.device(),
            "IR command sent"
        );
        Ok(CommandOutcome {
            device,
            command: command.as_str(),
            message: command.success_message(),
        })
    }
}

/// Ceiling light controller
pub struct LightController {
    inner: DeviceController,
}

impl LightController {
    pub fn new(resources_dir: impl Into<PathBuf>, transmitter: Arc<dyn Transmitter>) -> Self {
        Self {
            inner: DeviceController {
                resolver: ResourceResolver::new(Device::Light, resources_dir),
                transmitter,
            },
        }
    }

    pub async fn set_mode(&self, mode: LightMode) -> Result<CommandOutcome, ControlError> {
        self.inner.execute(mode).await
    }

    pub fn available_modes(&self) -> Vec<&'static str> {
        Category::Light.commands()
    }
}

/// Every AC command name, grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcStatus {
    pub available_modes: Vec<&'static str>,
    pub available_temp_controls: Vec<&'static str>,
    pub available_timer_controls: Vec<&'static str>,
}

/// Air conditioner controller
pub struct AcController {
    inner: DeviceController,
}

impl AcController {
    pub fn new(resources_dir: impl Into<PathBuf>, transmitter: Arc<dyn Transmitter>) -> Self {
        Self {
            inner: DeviceController {
                resolver: ResourceResolver::new(Device::Ac, resources_dir),
                transmitter,
            },
        }
    }

    pub async fn set_mode(&self, mode: AcMode) -> Result<CommandOutcome, ControlError> {
        self.inner.execute(mode).await
    }

    pub async fn control_temperature(
        &self,
        control: AcTempControl,
    ) -> Result<CommandOutcome, ControlError> {
        self.inner.execute(control).await
    }

    pub async fn control_timer(
        &self,
        control: AcTimerControl,
    ) -> Result<CommandOutcome, ControlError> {
        self.inner.execute(control).await
    }

    pub async fn execute(&self, command: AcCommand) -> Result<CommandOutcome, ControlError> {
        match command {
            AcCommand::Mode(mode) => self.set_mode(mode).await,
            AcCommand::Temp(control) => self.control_temperature(control).await,
            AcCommand::Timer(control) => self.control_timer(control).await,
        }
    }

    pub fn status(&self) -> AcStatus {
        AcStatus {
            available_modes: Category::AcMode.commands(),
            available_temp_controls: Category::AcTemp.commands(),
            available_timer_controls: Category::AcTimer.commands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransmitError;
    use crate::core::mock::MockTransmitter;
    use crate::utils::testing::TempDir;

    #[tokio::test]
    async fn test_light_on_success() {
        let tmp = TempDir::new("light-ok");
        tmp.write("light_on.txt", "+900 -450");
        let stub = Arc::new(MockTransmitter::ok());
        let light = LightController::new(tmp.path(), stub.clone());

        let outcome = light.set_mode(LightMode::On).await.unwrap();
        assert_eq!(outcome.command, "on");
        assert_eq!(outcome.message, "Light set to on mode successfully");
        assert_eq!(stub.sent(), vec![tmp.path().join("light_on.txt")]);
    }

    #[tokio::test]
    async fn test_missing_resource_never_transmits() {
        let tmp = TempDir::new("ac-missing");
        let stub = Arc::new(MockTransmitter::ok());
        let ac = AcController::new(tmp.path(), stub.clone());

        let err = ac.set_mode(AcMode::AirconOn).await.unwrap_err();
        assert!(matches!(err, ControlError::ResourceNotFound { .. }));
        assert!(err.to_string().contains("aircon_on"));
        assert!(stub.sent().is_empty());
    }

    #[tokio::test]
    async fn test_transmit_failure_is_wrapped() {
        let tmp = TempDir::new("light-timeout");
        tmp.write("light_dark.txt", "+900 -450");
        let stub = Arc::new(MockTransmitter::failing(TransmitError::Timeout));
        let light = LightController::new(tmp.path(), stub);

        let err = light.set_mode(LightMode::Dark).await.unwrap_err();
        assert_eq!(
            err,
            ControlError::Transmission {
                device: Device::Light,
                command: "dark",
                source: TransmitError::Timeout,
            }
        );
        assert_eq!(err.code().http_status(), 500);
    }

    #[tokio::test]
    async fn test_ac_dispatch_messages() {
        let tmp = TempDir::new("ac-dispatch");
        tmp.write("ac_heater_temp_up.txt", "x");
        tmp.write("ac_timer_on.txt", "x");
        let ac = AcController::new(tmp.path(), Arc::new(MockTransmitter::ok()));

        let temp = ac
            .execute(AcCommand::Temp(AcTempControl::HeaterTempUp))
            .await
            .unwrap();
        assert_eq!(temp.message, "Temperature control heater_temp_up executed successfully");

        let timer = ac.control_timer(AcTimerControl::TimerOn).await.unwrap();
        assert_eq!(timer.message, "Timer control timer_on executed successfully");
        assert_eq!(timer.device, Device::Ac);
    }

    #[test]
    fn test_status_lists() {
        let ac = AcController::new("/unused", Arc::new(MockTransmitter::ok()));
        let status = ac.status();
        assert_eq!(status.available_modes, vec!["aircon_on", "heater_on", "off"]);
        assert_eq!(status.available_timer_controls.len(), 3);

        let light = LightController::new("/unused", Arc::new(MockTransmitter::ok()));
        assert_eq!(
            light.available_modes(),
            vec!["all_bright", "bright", "dark", "off", "on"]
        );
    }
}
