//! Models Module - Commands, Configuration & Errors
//!
//! Single source of truth for the command vocabulary and the error taxonomy.

pub mod commands;
pub mod config;
pub mod errors;

pub use commands::*;
pub use config::*;
pub use errors::*;
