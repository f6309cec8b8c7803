//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PanelService / HumiditySampler (domain)
//! ```
//!
//! Driven adapters (the ADC driver, the GUI icon layer, telemetry
//! publishers) implement these traits.  The domain consumes them via
//! generics, so the core never touches hardware or widget code directly.

use crate::devices::DeviceType;
use crate::error::DriverError;

// ───────────────────────────────────────────────────────────────
// Analog driver port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One analog input channel.  The sampler averages multiple
/// `read_raw_sample` calls per reading; a failed call is non-fatal
/// (the previous value is retained and the loop continues).
pub trait AnalogPort {
    /// Configure the underlying ADC unit/channel.
    fn init(&mut self) -> Result<(), DriverError>;

    /// One raw sample in millivolts.
    fn read_raw_sample(&mut self) -> Result<u32, DriverError>;
}

// ───────────────────────────────────────────────────────────────
// Display sync port (driven adapter: domain → GUI)
// ───────────────────────────────────────────────────────────────

/// Called synchronously inside the device-state critical section on every
/// mutation.  Implementations must do bounded, ideally non-blocking work
/// only — queue a redraw, never wait for one.
pub trait DisplayPort {
    fn sync_icon(&mut self, device: DeviceType, power: bool);
}

// ───────────────────────────────────────────────────────────────
// Humidity observer (driven adapter: domain → telemetry / widgets)
// ───────────────────────────────────────────────────────────────

/// Receives significant humidity changes from the sampling loop.
///
/// Invoked on the sampling task, outside the device-state critical
/// section.  Failures inside a watcher are the watcher's own business;
/// there is no error channel back into the registry.
pub trait HumidityWatcher {
    fn on_humidity_changed(&mut self, value: i32);
}

// Forwarding impl so the firmware can register heterogeneous boxed watchers.
impl HumidityWatcher for Box<dyn HumidityWatcher + Send> {
    fn on_humidity_changed(&mut self, value: i32) {
        (**self).on_humidity_changed(value);
    }
}
