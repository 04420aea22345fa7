//! Runtime configuration
//!
//! Read once from the environment at startup and shared read-only (behind an
//! `Arc`) for the lifetime of the process. A missing required value is a
//! [`ConfigError`] and the server refuses to start.
//!
//! Values from a `.env` file in the working directory fill in whatever the
//! process environment leaves unset.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::commands::Device;
use super::errors::ConfigError;

pub const ENV_IR_CODE_DIR: &str = "IR_CODE_DIR";
pub const ENV_LIGHT_RESOURCES: &str = "IR_LIGHT_RESOURCES_PATH";
pub const ENV_AC_RESOURCES: &str = "IR_AC_RESOURCES_PATH";
pub const ENV_TRANSMITTER_DEVICE: &str = "TRANSMITTER_DEVICE";
pub const ENV_IR_CTL_BIN: &str = "IR_CTL_BIN";
pub const ENV_TRANSMIT_TIMEOUT: &str = "IR_TRANSMIT_TIMEOUT_SECS";
pub const ENV_HOST: &str = "HOME_IR_HOST";
pub const ENV_PORT: &str = "HOME_IR_PORT";
/// Set by hosting platforms; wins over `HOME_IR_PORT`
pub const ENV_PLATFORM_PORT: &str = "PORT";

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default external transmission tool (v4l-utils)
pub const DEFAULT_IR_CTL_BIN: &str = "ir-ctl";
pub const DEFAULT_TRANSMIT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// How the external IR tool is invoked
#[derive(Debug, Clone, PartialEq)]
pub struct TransmitterSettings {
    /// Executable name or path
    pub program: String,
    /// Device identifier passed as `-d <device>`
    pub device: String,
    /// Hard upper bound for one invocation
    pub timeout: Duration,
}

impl TransmitterSettings {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            program: DEFAULT_IR_CTL_BIN.to_string(),
            device: device.into(),
            timeout: DEFAULT_TRANSMIT_TIMEOUT,
        }
    }
}

/// Process-wide configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub ir_code_dir: PathBuf,
    pub light_resources_dir: PathBuf,
    pub ac_resources_dir: PathBuf,
    pub transmitter: TransmitterSettings,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load from the process environment, falling back to `./.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup_with_file(|key| std::env::var(key).ok(), Path::new(DEFAULT_ENV_FILE))
    }

    /// `lookup` first, then the dotenv file at `env_file`. A missing file is
    /// not an error; an unparsable one is.
    pub fn from_lookup_with_file<F>(lookup: F, env_file: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(env_file)?;
        Self::from_lookup(|key| lookup(key).or_else(|| file_vars.get(key).cloned()))
    }

    /// Load from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::MissingEnv(key));

        let light_resources_dir = PathBuf::from(required(ENV_LIGHT_RESOURCES)?);
        let ac_resources_dir = PathBuf::from(required(ENV_AC_RESOURCES)?);
        let ir_code_dir = PathBuf::from(required(ENV_IR_CODE_DIR)?);
        let device = required(ENV_TRANSMITTER_DEVICE)?;

        let timeout = match get(ENV_TRANSMIT_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TRANSMIT_TIMEOUT,
        };

        let port_var = [ENV_PLATFORM_PORT, ENV_PORT]
            .into_iter()
            .find_map(|key| get(key).map(|raw| (key, raw)));
        let port = match port_var {
            Some((key, raw)) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    key,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            ir_code_dir,
            light_resources_dir,
            ac_resources_dir,
            transmitter: TransmitterSettings {
                program: get(ENV_IR_CTL_BIN).unwrap_or_else(|| DEFAULT_IR_CTL_BIN.to_string()),
                device: device.trim().to_string(),
                timeout,
            },
            host: get(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// Resource directory for a device's signal files
    pub fn resources_dir(&self, device: Device) -> &PathBuf {
        match device {
            Device::Light => &self.light_resources_dir,
            Device::Ac => &self.ac_resources_dir,
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
            key: ENV_HOST,
            value: raw.clone(),
            reason: e.to_string(),
        })
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let unreadable = |e: dotenvy::Error| ConfigError::EnvFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.map(|item| item.map_err(unreadable)).collect(),
        Err(e) if e.not_found() => Ok(HashMap::new()),
        Err(e) => Err(unreadable(e)),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        key: ENV_TRANSMIT_TIMEOUT,
        value: raw.to_string(),
        reason,
    };
    let secs: f64 = raw.trim().parse().map_err(|e: std::num::ParseFloatError| invalid(e.to_string()))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(invalid("must be a positive number of seconds".to_string()));
    }
    Ok(Duration::from_secs_f64(secs))
}
