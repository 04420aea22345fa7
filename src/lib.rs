//! Home IR Library
//!
//! Infrared home controller: maps light and air-conditioner commands
//! to recorded IR signal files and replays them through `ir-ctl`.

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use api::{create_router, AppState};
pub use core::{
    AcController, AcStatus, CommandOutcome, DeviceLocks, IrCtlTransmitter, LightController,
    ResourceResolver, Transmitter,
};
pub use models::{
    AcCommand, AcMode, AcTempControl, AcTimerControl, Category, Config, ControlError, Device,
    ErrorCode, IrCommand, LightMode, ParseCommandError, TransmitError, TransmitterSettings,
};
pub use utils::telemetry::{TransmissionStats, TransmissionStatsSnapshot};
