//! API Request Handlers

use axum::{
    extract::{Json, Path, State},
    http::Uri,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use super::types::*;
use crate::core::{
    AcController, AcStatus, CommandOutcome, DeviceLocks, IrCtlTransmitter, LightController,
    Transmitter,
};
use crate::models::{
    AcCommand, Config, ControlError, Device, IrCommand, LightMode,
};
use crate::utils::telemetry::{TransmissionStats, TransmissionStatsSnapshot};

/// Shared application state
pub struct AppState {
    pub config: Arc<Config>,
    pub light: LightController,
    pub ac: AcController,
    pub stats: TransmissionStats,
    pub start_time: Instant,
}

impl AppState {
    /// Production state: both controllers drive `ir-ctl` on the configured device
    pub fn new(config: Arc<Config>) -> Self {
        // Both transmitters hold the same per-device lock after construction
        let device_locks = DeviceLocks::new();
        let light_tx = Arc::new(IrCtlTransmitter::new(config.transmitter.clone(), &device_locks));
        let ac_tx = Arc::new(IrCtlTransmitter::new(config.transmitter.clone(), &device_locks));
        Self::build(config, light_tx, ac_tx)
    }

    /// State with an explicit transmitter shared by both controllers
    pub fn with_transmitter(config: Arc<Config>, transmitter: Arc<dyn Transmitter>) -> Self {
        Self::build(config, transmitter.clone(), transmitter)
    }

    fn build(
        config: Arc<Config>,
        light_tx: Arc<dyn Transmitter>,
        ac_tx: Arc<dyn Transmitter>,
    ) -> Self {
        Self {
            light: LightController::new(config.resources_dir(Device::Light), light_tx),
            ac: AcController::new(config.resources_dir(Device::Ac), ac_tx),
            config,
            stats: TransmissionStats::new(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    fn record(
        &self,
        device: Device,
        command: &str,
        result: &Result<CommandOutcome, ControlError>,
        start: Instant,
    ) {
        let latency = start.elapsed().as_millis() as u64;
        self.stats
            .record(device, command, result.as_ref().map(|_| ()), latency);
    }
}

// ============================================
// Service info / Health / Stats
// ============================================

pub async fn root() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("health", "/health"),
        ("stats", "/stats"),
        ("light_control", "/light"),
        ("ac_control", "/ac"),
    ]);
    Json(ServiceInfo {
        message: "Home IR Controller API".to_string(),
        status: "running".to_string(),
        endpoints,
    })
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        transmitter_device: state.config.transmitter.device.clone(),
    })
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<TransmissionStatsSnapshot> {
    Json(state.stats.get_stats())
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

// ============================================
// Light
// ============================================

pub async fn light_modes(State(state): State<Arc<AppState>>) -> Json<Vec<&'static str>> {
    Json(state.light.available_modes())
}

pub async fn set_light_mode(
    state: Arc<AppState>,
    mode: LightMode,
) -> Result<Json<LightResponse>, ApiError> {
    let start = Instant::now();
    let result = state.light.set_mode(mode).await;
    state.record(Device::Light, mode.as_str(), &result, start);
    Ok(Json(result?.into()))
}

/// `/light/mode/{name}`: name validated here, before reaching the controller
pub async fn set_light_mode_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<LightResponse>, ApiError> {
    let mode: LightMode = name.parse()?;
    set_light_mode(state, mode).await
}

// ============================================
// AC
// ============================================

pub async fn ac_status(State(state): State<Arc<AppState>>) -> Json<AcStatus> {
    Json(state.ac.status())
}

/// Shared by the fixed AC routes and `/ac/command/{name}`
pub async fn run_ac_command(
    state: Arc<AppState>,
    command: AcCommand,
) -> Result<Json<AcResponse>, ApiError> {
    let start = Instant::now();
    let result = state.ac.execute(command).await;
    state.record(Device::Ac, command.as_str(), &result, start);
    Ok(Json(result?.into()))
}

/// `/ac/command/{name}`: any AC command by wire name
pub async fn ac_command_by_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<AcResponse>, ApiError> {
    let command: AcCommand = name.parse()?;
    run_ac_command(state, command).await
}
