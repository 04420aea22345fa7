//! Utils Module - Shared helpers

pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use telemetry::*;
