//! Driven adapters — implementations of the port traits.
//!
//! The hardware-facing halves are guarded by `#[cfg(target_os = "espidf")]`
//! inside each module; host targets get simulation stubs for testing.

pub mod adc;
pub mod display;
pub mod telemetry;
