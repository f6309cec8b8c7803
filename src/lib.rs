//! SmartPanel firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod devices;
pub mod error;
pub mod events;
pub mod sampling;
pub mod ui;

// Adapters compile on every target; the hardware-facing halves are
// guarded by cfg attributes inside.
pub mod adapters;
