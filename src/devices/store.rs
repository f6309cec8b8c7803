//! Device state store — the single source of truth for panel device state.
//!
//! One [`DeviceState`] per [`DeviceType`], created at process start with
//! everything off, mutated only through the transition functions in
//! [`actions`](super::actions), last write wins.  Every successful mutation
//! synchronously pushes the resulting power state to the display collaborator
//! so the icon can never drift from the stored state.
//!
//! The store itself is not synchronised.  Callers that share it between the
//! input loop and the sampling task wrap it (via
//! [`PanelService`](crate::app::service::PanelService)) in a single
//! critical-section mutex, held for one transition at a time.

use log::info;

use crate::app::ports::DisplayPort;
use crate::error::Result;

use super::{DeviceState, DeviceType, actions};

/// Per-device-type boolean/analog state with last-write-wins semantics.
pub struct DeviceStateStore {
    states: [DeviceState; DeviceType::COUNT],
    default_speed: u8,
}

impl DeviceStateStore {
    /// All devices start powered off at speed 0.
    pub fn new(default_speed: u8) -> Self {
        Self {
            states: [DeviceState::default(); DeviceType::COUNT],
            default_speed,
        }
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Set power and sync the icon.
    pub fn set_power<D: DisplayPort>(&mut self, ty: DeviceType, on: bool, display: &mut D) {
        let state = &mut self.states[ty as usize];
        actions::set_power(ty, state, on, self.default_speed);
        display.sync_icon(ty, state.power);
    }

    /// Set speed (clamped) and sync the icon.  A non-zero speed powers
    /// the device on as a side effect.
    pub fn set_speed<D: DisplayPort>(
        &mut self,
        ty: DeviceType,
        value: u8,
        display: &mut D,
    ) -> Result<()> {
        let state = &mut self.states[ty as usize];
        actions::set_speed(ty, state, value)?;
        info!("{}: speed set to {}%", ty.name(), state.speed);
        display.sync_icon(ty, state.power);
        Ok(())
    }

    /// Flip power and sync the icon; returns the new power state.
    pub fn toggle_power<D: DisplayPort>(&mut self, ty: DeviceType, display: &mut D) -> bool {
        let state = &mut self.states[ty as usize];
        let on = actions::toggle_power(ty, state, self.default_speed);
        display.sync_icon(ty, on);
        on
    }

    /// Push the current power state of every device to the display.
    /// Called once when the control screen is (re)built.
    pub fn sync_all_icons<D: DisplayPort>(&self, display: &mut D) {
        for ty in DeviceType::ALL {
            display.sync_icon(ty, self.states[ty as usize].power);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn power(&self, ty: DeviceType) -> bool {
        self.states[ty as usize].power
    }

    pub fn speed(&self, ty: DeviceType) -> u8 {
        self.states[ty as usize].speed
    }

    /// Copy of the full state for one device (popup binding snapshot).
    pub fn state(&self, ty: DeviceType) -> DeviceState {
        self.states[ty as usize]
    }
}
