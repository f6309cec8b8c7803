//! Humidity sampling subsystem.
//!
//! Data flow, leaf to root:
//!
//! ```text
//! AnalogPort ──▶ CalibratedReader ──▶ HumiditySampler ──┬─▶ display value (fast path)
//!                                                       └─▶ WatcherRegistry (throttled,
//!                                                           significance-filtered)
//! ```
//!
//! The sampler runs on its own periodic task and never touches the device
//! state critical section; watchers fire on the sampling task.

pub mod calibration;
pub mod sampler;
pub mod watchers;

pub use calibration::{CalibratedReader, Calibration};
pub use sampler::{HumiditySampler, SamplerState, should_notify};
pub use watchers::{WatcherId, WatcherRegistry};
