//! Transmission statistics
//!
//! Lock-free counters updated on every command, plus a per-error-code
//! breakdown and the most recent command. Served at `GET /stats` and logged
//! on shutdown. Kept in memory only.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::models::{ControlError, Device};

/// Outcome of one command, as seen by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionOutcome {
    Sent,
    ResourceMissing,
    Failed,
}

impl TransmissionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransmissionOutcome::Sent => "sent",
            TransmissionOutcome::ResourceMissing => "resource_missing",
            TransmissionOutcome::Failed => "failed",
        }
    }
}

/// The most recent command handled
#[derive(Debug, Clone, Serialize)]
pub struct LastCommand {
    pub device: Device,
    pub command: String,
    pub outcome: &'static str,
    pub at: DateTime<Utc>,
}

/// Aggregated statistics snapshot
#[derive(Debug, Clone, Serialize, Default)]
pub struct TransmissionStatsSnapshot {
    pub total_commands: u64,
    pub total_sent: u64,
    pub total_resource_missing: u64,
    pub total_failed: u64,
    /// Error code → count
    pub errors_by_code: HashMap<String, u64>,
    pub avg_latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_command: Option<LastCommand>,
    pub since: Option<DateTime<Utc>>,
}

/// Main statistics collector
pub struct TransmissionStats {
    total_commands: AtomicU64,
    total_sent: AtomicU64,
    total_resource_missing: AtomicU64,
    total_failed: AtomicU64,
    total_latency_ms: AtomicU64,
    errors_by_code: RwLock<HashMap<&'static str, u64>>,
    last_command: RwLock<Option<LastCommand>>,
    started_at: DateTime<Utc>,
}

impl Default for TransmissionStats {
    fn default() -> Self {
        Self::new()
    }
}

impl TransmissionStats {
    pub fn new() -> Self {
        Self {
            total_commands: AtomicU64::new(0),
            total_sent: AtomicU64::new(0),
            total_resource_missing: AtomicU64::new(0),
            total_failed: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            errors_by_code: RwLock::new(HashMap::new()),
            last_command: RwLock::new(None),
            started_at: Utc::now(),
        }
    }

    /// Record a command result
    pub fn record(
        &self,
        device: Device,
        command: &str,
        result: Result<(), &ControlError>,
        latency_ms: u64,
    ) {
        self.total_commands.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);

        let outcome = match result {
            Ok(()) => {
                self.total_sent.fetch_add(1, Ordering::Relaxed);
                TransmissionOutcome::Sent
            }
            Err(err) => {
                if let Ok(mut counts) = self.errors_by_code.write() {
                    *counts.entry(err.code().as_str()).or_insert(0) += 1;
                }
                match err {
                    ControlError::ResourceNotFound { .. } => {
                        self.total_resource_missing.fetch_add(1, Ordering::Relaxed);
                        TransmissionOutcome::ResourceMissing
                    }
                    ControlError::ResourceUnreadable { .. } | ControlError::Transmission { .. } => {
                        self.total_failed.fetch_add(1, Ordering::Relaxed);
                        TransmissionOutcome::Failed
                    }
                }
            }
        };

        if let Ok(mut last) = self.last_command.write() {
            *last = Some(LastCommand {
                device,
                command: command.to_string(),
                outcome: outcome.as_str(),
                at: Utc::now(),
            });
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TransmissionStatsSnapshot {
        let total_commands = self.total_commands.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency_ms = if total_commands > 0 {
            total_latency as f64 / total_commands as f64
        } else {
            0.0
        };

        let errors_by_code = self
            .errors_by_code
            .read()
            .map(|counts| counts.iter().map(|(k, v)| (k.to_string(), *v)).collect())
            .unwrap_or_default();

        TransmissionStatsSnapshot {
            total_commands,
            total_sent: self.total_sent.load(Ordering::Relaxed),
            total_resource_missing: self.total_resource_missing.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
            errors_by_code,
            avg_latency_ms,
            last_command: self.last_command.read().ok().and_then(|l| l.clone()),
            since: Some(self.started_at),
        }
    }
}
