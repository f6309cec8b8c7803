//! System configuration parameters
//!
//! All tunable parameters for the SmartPanel system.  Values can be
//! overridden at construction time by provisioning or a serial console;
//! the defaults match the factory-measured board characteristics.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Humidity sampling ---
    /// Fast display-refresh cadence (milliseconds).
    pub sample_interval_ms: u32,
    /// Minimum time between watcher notifications (milliseconds).
    pub notify_interval_ms: u32,
    /// Minimum absolute change (physical units) required to notify watchers.
    pub notify_min_delta: i32,
    /// Equally-weighted ADC samples averaged per reading.
    pub samples_per_read: u32,

    // --- Humidity calibration (factory-measured linear range) ---
    /// Raw reading (millivolts) at or below which humidity reads 100%.
    pub calib_min_mv: u32,
    /// Raw reading (millivolts) at or above which humidity reads 0%.
    pub calib_max_mv: u32,

    // --- Devices ---
    /// Speed applied when powering on a speed-capable device at speed 0.
    pub default_speed_percent: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Sampling
            sample_interval_ms: 20,  // 50 Hz display refresh
            notify_interval_ms: 500, // watcher throttle
            notify_min_delta: 2,
            samples_per_read: 32,

            // Calibration — soil probe output swing on the 3.3 V rail
            calib_min_mv: 1200,
            calib_max_mv: 3300,

            // Devices
            default_speed_percent: 50,
        }
    }
}
