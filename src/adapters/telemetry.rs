//! Log-based humidity watcher adapter.
//!
//! Stand-in for the telemetry publisher: every significant humidity
//! change is written to the serial console.  An MQTT adapter would
//! implement the same [`HumidityWatcher`] trait and publish instead.

use log::info;

use crate::app::ports::HumidityWatcher;

/// Watcher that logs significant humidity changes.
pub struct LogHumidityPublisher;

impl LogHumidityPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl HumidityWatcher for LogHumidityPublisher {
    fn on_humidity_changed(&mut self, value: i32) {
        info!("TELEM | humidity={}%", value);
    }
}
