//! Calibrated reading of the humidity ADC channel.
//!
//! The probe's analog output falls as humidity rises, so the map is
//! inverting: low voltage = wet (100%), high voltage = dry (0%).
//! Calibration bounds are the factory-measured linear range supplied at
//! construction — there is no runtime re-characterisation.  Out-of-range
//! raw input is clamped, never rejected, to tolerate sensor noise at the
//! extremes.

use crate::app::ports::AnalogPort;
use crate::error::DriverError;

/// Fixed linear calibration range mapping raw millivolts to physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    /// Raw reading at or below which the physical value saturates high.
    pub raw_min: u32,
    /// Raw reading at or above which the physical value saturates low.
    pub raw_max: u32,
    /// Physical value at `raw_max` (dry end).
    pub phys_min: i32,
    /// Physical value at `raw_min` (wet end).
    pub phys_max: i32,
}

impl Calibration {
    /// Relative-humidity calibration over a 0–100% scale.
    pub fn humidity(raw_min: u32, raw_max: u32) -> Self {
        Self {
            raw_min,
            raw_max,
            phys_min: 0,
            phys_max: 100,
        }
    }
}

/// Map one averaged raw reading to physical units.
///
/// Piecewise linear: saturates at the calibration bounds, interpolates
/// (with rounding) in between, and clamps the result so float error can
/// never push it outside `[phys_min, phys_max]`.
pub fn raw_to_physical(raw: u32, cal: &Calibration) -> i32 {
    if raw <= cal.raw_min {
        return cal.phys_max;
    }
    if raw >= cal.raw_max {
        return cal.phys_min;
    }
    let span = (cal.raw_max - cal.raw_min) as f32;
    let p = 1.0 - (raw - cal.raw_min) as f32 / span;
    let phys = cal.phys_min + (p * (cal.phys_max - cal.phys_min) as f32).round() as i32;
    phys.clamp(cal.phys_min, cal.phys_max)
}

/// One averaged, calibrated reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Mean of the raw samples, truncated to an integer.
    pub raw: u32,
    /// Calibrated physical value.
    pub physical: i32,
}

/// Averages N raw samples per reading and applies the calibration map.
pub struct CalibratedReader {
    cal: Calibration,
    samples_per_read: u32,
}

impl CalibratedReader {
    pub fn new(cal: Calibration, samples_per_read: u32) -> Self {
        debug_assert!(samples_per_read > 0);
        Self {
            cal,
            samples_per_read,
        }
    }

    /// Arithmetic mean of `samples_per_read` raw samples.
    /// Any single failed sample fails the whole reading.
    pub fn read_raw(&self, port: &mut impl AnalogPort) -> Result<u32, DriverError> {
        let mut sum: u64 = 0;
        for _ in 0..self.samples_per_read {
            sum += u64::from(port.read_raw_sample()?);
        }
        Ok((sum / u64::from(self.samples_per_read)) as u32)
    }

    /// Averaged raw reading plus its calibrated physical value.
    pub fn read(&self, port: &mut impl AnalogPort) -> Result<Reading, DriverError> {
        let raw = self.read_raw(port)?;
        Ok(Reading {
            raw,
            physical: raw_to_physical(raw, &self.cal),
        })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.cal
    }
}
