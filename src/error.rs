//! Unified error types for the SmartPanel firmware.
//!
//! Follows embedded best practice: a single `Error` enum that every subsystem
//! can convert into, keeping the top-level loop's error handling uniform.
//! All variants are `Copy` so they can be cheaply passed between the sampling
//! task and the input loop without allocation.

use core::fmt;

use crate::devices::DeviceType;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The analog driver failed transiently; callers retain the previous
    /// value and continue (never fatal in the sampling path).
    Driver(DriverError),
    /// The watcher registry has no free slot.  Surfaced to the caller of
    /// `add`; treated as a configuration error, not retried.
    CapacityExceeded,
    /// A state transition that the device type does not support, e.g.
    /// setting a speed on a plain on/off switch.
    InvalidTransition(DeviceType),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(e) => write!(f, "driver: {e}"),
            Self::CapacityExceeded => write!(f, "watcher registry full"),
            Self::InvalidTransition(ty) => {
                write!(f, "operation not supported on {}", ty.name())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Analog driver errors
// ---------------------------------------------------------------------------

/// Transient hardware failures from the [`AnalogPort`](crate::app::ports::AnalogPort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// ADC unit or channel configuration failed.
    InitFailed,
    /// A one-shot conversion returned an error or timed out.
    ReadFailed,
    /// The driver has not been initialised yet.
    NotReady,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => write!(f, "ADC init failed"),
            Self::ReadFailed => write!(f, "ADC read failed"),
            Self::NotReady => write!(f, "driver not initialised"),
        }
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Self::Driver(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
