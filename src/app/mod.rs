//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SmartPanel system:
//! device transitions, popup mediation, and command routing.  All
//! interaction with hardware and the GUI happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals or a rendering library.

pub mod commands;
pub mod ports;
pub mod service;
