//! Core Module - Resolution, Transmission & Device Controllers

pub mod controller;
pub mod mock;
pub mod resolver;
pub mod transmitter;

pub use controller::*;
pub use resolver::*;
pub use transmitter::*;
