//! Periodic humidity sampling loop.
//!
//! Two cadences share one execution context:
//!
//! - **Fast** (every tick, ~20 ms): read through the calibrated reader and
//!   refresh the display value.  Never invokes watchers.
//! - **Slow** (throttle, ~500 ms, measured by an elapsed-time check inside
//!   the fast tick): compare the latest reading against the last notified
//!   value; notify watchers only when the change is significant.  The
//!   elapsed-time anchor resets after every check whether or not a
//!   notification fired, so bursts of small changes can neither flood
//!   watchers nor "catch up" with repeated fires.
//!
//! The loop's failure policy is best-effort sensing: a failed read is
//! logged and the previous value is retained.  The display may go stale
//! during transient failures but never falls back to a default.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::{info, warn};

use crate::app::ports::{AnalogPort, HumidityWatcher};
use crate::config::SystemConfig;
use crate::error::Result;

use super::calibration::CalibratedReader;
use super::watchers::{WatcherId, WatcherRegistry};

/// Decide whether a new calibrated value is different enough from the
/// last notified one to justify an event.
pub fn should_notify(previous: i32, candidate: i32, min_delta: i32) -> bool {
    (candidate - previous).abs() >= min_delta
}

// ---------------------------------------------------------------------------
// Shared handles
// ---------------------------------------------------------------------------

/// Sentinel stored before the first successful read.
const UNSET: i32 = i32::MIN;

/// Cross-task handle polling the latest display value.
///
/// High-refresh visual consumers read this directly instead of waiting
/// for watcher notifications.
#[derive(Clone)]
pub struct DisplayValue(Arc<AtomicI32>);

impl DisplayValue {
    fn new() -> Self {
        Self(Arc::new(AtomicI32::new(UNSET)))
    }

    /// Latest calibrated value; `None` until a read has ever succeeded.
    pub fn get(&self) -> Option<i32> {
        match self.0.load(Ordering::Relaxed) {
            UNSET => None,
            v => Some(v),
        }
    }

    fn set(&self, value: i32) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Cooperative cancellation flag, checked once per fast tick.
#[derive(Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Request cancellation.  Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

/// Lifecycle of the sampling loop.  `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Running,
    Cancelled,
}

/// The humidity channel's sampling engine.
///
/// Owns the watcher registry; watchers fire on whatever task drives
/// [`tick`](Self::tick) — in the firmware that is the dedicated sampling
/// task, never the input loop, so notification fan-out happens outside
/// the device-state critical section.
pub struct HumiditySampler<W> {
    reader: CalibratedReader,
    watchers: WatcherRegistry<W>,
    state: SamplerState,
    cancel: CancelToken,

    /// Last averaged raw reading (millivolts).
    raw: u32,
    /// Latest calibrated value, refreshed every fast tick.
    display_value: i32,
    /// Value last delivered to watchers.
    notified_value: i32,
    /// False until the first successful read.
    seeded: bool,

    /// Anchor of the slow-cadence elapsed-time check.
    last_check_ms: u32,
    notify_interval_ms: u32,
    min_delta: i32,

    shared_display: DisplayValue,
}

impl<W: HumidityWatcher> HumiditySampler<W> {
    pub fn new(reader: CalibratedReader, config: &SystemConfig) -> Self {
        Self {
            reader,
            watchers: WatcherRegistry::new(),
            state: SamplerState::Idle,
            cancel: CancelToken::new(),
            raw: 0,
            display_value: UNSET,
            notified_value: UNSET,
            seeded: false,
            last_check_ms: 0,
            notify_interval_ms: config.notify_interval_ms,
            min_delta: config.notify_min_delta,
            shared_display: DisplayValue::new(),
        }
    }

    // ── Watcher registration ──────────────────────────────────

    pub fn add_watcher(&mut self, watcher: W) -> Result<WatcherId> {
        self.watchers.add(watcher)
    }

    pub fn remove_watcher(&mut self, id: WatcherId) -> Option<W> {
        self.watchers.remove(id)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Move `Idle → Running` and perform one synchronous seed read so the
    /// first observers see a real value instead of a default.  A failed
    /// seed read is logged; the first successful tick read seeds instead.
    pub fn start(&mut self, port: &mut impl AnalogPort, now_ms: u32) {
        if self.state != SamplerState::Idle {
            return;
        }
        self.state = SamplerState::Running;
        self.last_check_ms = now_ms;

        match self.reader.read(port) {
            Ok(r) => {
                self.apply_reading(r.raw, r.physical);
                info!("humidity sampling started (seed value {}%)", r.physical);
            }
            Err(e) => warn!("humidity seed read failed ({e}); will seed on first good tick"),
        }
    }

    /// One fast-cadence cycle.  Call every `sample_interval_ms`.
    pub fn tick(&mut self, port: &mut impl AnalogPort, now_ms: u32) {
        if self.cancel.is_cancelled() {
            if self.state == SamplerState::Running {
                info!("humidity sampling cancelled");
            }
            self.state = SamplerState::Cancelled;
        }
        if self.state != SamplerState::Running {
            return;
        }

        // Fast path: refresh the display value.  Read failures keep the
        // previous value; a stale display beats a dead loop.
        match self.reader.read(port) {
            Ok(r) => self.apply_reading(r.raw, r.physical),
            Err(e) => warn!("humidity read failed ({e}); keeping previous value"),
        }

        // Slow path: throttled, significance-filtered notification.
        if now_ms.wrapping_sub(self.last_check_ms) >= self.notify_interval_ms {
            if self.seeded {
                let candidate = self.display_value;
                if should_notify(self.notified_value, candidate, self.min_delta) {
                    self.notified_value = candidate;
                    self.watchers.notify_all(candidate);
                }
            }
            // Reset the anchor after every check, fired or not.
            self.last_check_ms = now_ms;
        }
    }

    /// Token for cancelling the loop from another task.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Latest calibrated value (fast path); `None` until the first
    /// successful read.
    pub fn display_value(&self) -> Option<i32> {
        self.seeded.then_some(self.display_value)
    }

    /// Value last delivered to watchers (telemetry path).
    pub fn notified_value(&self) -> Option<i32> {
        self.seeded.then_some(self.notified_value)
    }

    /// Last averaged raw reading (millivolts).
    pub fn raw(&self) -> u32 {
        self.raw
    }

    /// Cross-task polling handle for the display value.
    pub fn display_handle(&self) -> DisplayValue {
        self.shared_display.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_reading(&mut self, raw: u32, physical: i32) {
        self.raw = raw;
        self.display_value = physical;
        self.shared_display.set(physical);
        if !self.seeded {
            self.notified_value = physical;
            self.seeded = true;
        }
    }
}
