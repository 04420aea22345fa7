//! Centralized Error Handling Module
//!
//! Every failure a request can hit maps to a unique [`ErrorCode`] with a
//! fixed HTTP status, so logs and API responses classify errors the same way.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - RES_xxx: resource file lookup
//! - IR_xxx: IR transmission
//! - CFG_xxx: configuration
//! - API_xxx: request validation

use std::io;
use thiserror::Error;

use super::commands::{Category, Device};

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource file for a command is missing on disk
    ResourceNotFound,
    /// Resource file lookup failed for a reason other than absence
    ResourceUnreadable,
    /// Transmitter device stayed busy for the whole timeout
    TransmitterBusy,
    /// Transmission tool did not finish in time
    TransmissionTimeout,
    /// Transmission tool exited with a failure status
    TransmissionNonZeroExit,
    /// Transmission tool is not installed
    TransmissionToolMissing,
    /// Any other transmission failure
    TransmissionUnexpected,
    /// Missing or malformed startup configuration
    InvalidConfiguration,
    /// Unknown command name in a request
    InvalidCommand,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFound => "RES_NOT_FOUND",
            Self::ResourceUnreadable => "RES_UNREADABLE",
            Self::TransmitterBusy => "IR_BUSY",
            Self::TransmissionTimeout => "IR_TIMEOUT",
            Self::TransmissionNonZeroExit => "IR_NON_ZERO_EXIT",
            Self::TransmissionToolMissing => "IR_TOOL_MISSING",
            Self::TransmissionUnexpected => "IR_UNEXPECTED",
            Self::InvalidConfiguration => "CFG_INVALID",
            Self::InvalidCommand => "API_INVALID_COMMAND",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidCommand | Self::InvalidConfiguration => 400,
            Self::ResourceNotFound => 404,
            _ => 500,
        }
    }
}

/// Failure of a single IR transmission
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransmitError {
    #[error("IR transmission timed out")]
    Timeout,

    /// Another transmission held the device until the timeout; the tool never ran.
    #[error("IR transmitter busy, gave up waiting for the device")]
    Busy,

    /// `code` is `None` when the tool was killed by a signal.
    #[error("Command failed with code {}: {stderr}", display_code(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("IR transmission command not found: {0}")]
    ToolNotFound(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

impl TransmitError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::TransmissionTimeout,
            Self::Busy => ErrorCode::TransmitterBusy,
            Self::NonZeroExit { .. } => ErrorCode::TransmissionNonZeroExit,
            Self::ToolNotFound(_) => ErrorCode::TransmissionToolMissing,
            Self::Unexpected(_) => ErrorCode::TransmissionUnexpected,
        }
    }

    /// Classify a spawn/wait failure of the transmission tool
    pub fn from_spawn(program: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::ToolNotFound(format!("{}: {}", program, err)),
            _ => Self::Unexpected(err.to_string()),
        }
    }
}

/// Failure of a controller command
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControlError {
    #[error("{} resource file not found for {}: {command}", .device.label(), .device.subject())]
    ResourceNotFound {
        device: Device,
        command: &'static str,
    },

    #[error("Failed to check {} resource file for {} '{command}': {reason}", .device.label(), .device.subject())]
    ResourceUnreadable {
        device: Device,
        command: &'static str,
        reason: String,
    },

    #[error("Failed to transmit IR signal for {} '{command}': {source}", .device.subject())]
    Transmission {
        device: Device,
        command: &'static str,
        #[source]
        source: TransmitError,
    },
}

impl ControlError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ResourceNotFound { .. } => ErrorCode::ResourceNotFound,
            Self::ResourceUnreadable { .. } => ErrorCode::ResourceUnreadable,
            Self::Transmission { source, .. } => source.code(),
        }
    }

    /// Machine-readable error kind reported to API clients
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ResourceNotFound {
                device: Device::Light,
                ..
            } => "LightResourceNotFoundError",
            Self::ResourceNotFound {
                device: Device::Ac, ..
            } => "ACResourceNotFoundError",
            Self::ResourceUnreadable { .. } => "ResourceReadError",
            Self::Transmission { .. } => "IRTransmissionError",
        }
    }
}

/// Unknown command name
#[derive(Debug, Clone, Error, PartialEq)]
#[error("'{value}' is not a valid {}", category_label(.category))]
pub struct ParseCommandError {
    /// `None` when the name was matched against every AC category
    pub category: Option<Category>,
    pub value: String,
}

fn category_label(category: &Option<Category>) -> &'static str {
    category.map(|c| c.label()).unwrap_or("AC command")
}

impl ParseCommandError {
    pub fn new(category: Category, value: &str) -> Self {
        Self {
            category: Some(category),
            value: value.to_string(),
        }
    }

    pub fn any_ac(value: &str) -> Self {
        Self {
            category: None,
            value: value.to_string(),
        }
    }

    /// Names the caller could have used instead
    pub fn expected(&self) -> Vec<&'static str> {
        match self.category {
            Some(category) => category.commands(),
            None => [Category::AcMode, Category::AcTemp, Category::AcTimer]
                .iter()
                .flat_map(|c| c.commands())
                .collect(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidCommand
    }
}

/// Startup configuration failure; the server must not start
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingEnv(&'static str),

    #[error("{key} has invalid value '{value}': {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::InvalidConfiguration
    }
}
