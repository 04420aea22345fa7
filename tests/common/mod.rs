//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use home_ir::{Config, TransmitterSettings};

// Same scratch-directory helper the unit tests use
#[path = "../../src/utils/testing.rs"]
mod testing;

pub use testing::TempDir;

/// Write an executable `/bin/sh` script into `dir`
#[cfg(unix)]
pub fn script(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let file = dir.write(name, &format!("#!/bin/sh\n{}\n", body));
    fs::set_permissions(&file, fs::Permissions::from_mode(0o755)).expect("chmod script");
    file
}

/// Config pointing both resource dirs at fresh directories
pub fn test_config(light: &TempDir, ac: &TempDir) -> Arc<Config> {
    Arc::new(Config {
        ir_code_dir: light.path().to_path_buf(),
        light_resources_dir: light.path().to_path_buf(),
        ac_resources_dir: ac.path().to_path_buf(),
        transmitter: TransmitterSettings {
            program: "ir-ctl".to_string(),
            device: "/dev/lirc-test".to_string(),
            timeout: Duration::from_secs(2),
        },
        host: "127.0.0.1".to_string(),
        port: 0,
    })
}
