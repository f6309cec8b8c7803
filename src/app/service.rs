//! Panel service — the hexagonal core for device control.
//!
//! [`PanelService`] owns the device state store and the popup controller
//! and routes every inbound [`PanelCommand`].  All GUI interaction flows
//! through the [`DisplayPort`] injected at call sites, making the whole
//! service testable with mock adapters.
//!
//! ```text
//!  PanelCommand ──▶ ┌──────────────────────────┐
//!                   │       PanelService        │ ──▶ DisplayPort
//!                   │  DeviceStateStore · Popup │
//!                   └──────────────────────────┘
//! ```
//!
//! Concurrency contract: the firmware shares one `PanelService` between
//! the input loop and any other mutating context through a single
//! critical-section mutex (see `main.rs`).  Each `handle_command` call is
//! one state transition and must run entirely inside that lock, icon sync
//! included.  Watcher notification fan-out never happens under this lock.

use log::info;

use crate::config::SystemConfig;
use crate::devices::{DeviceStateStore, DeviceType};
use crate::error::Result;
use crate::ui::popup::{PopupController, PopupState};

use super::commands::PanelCommand;
use super::ports::DisplayPort;

/// Orchestrates device transitions and popup mediation.
pub struct PanelService {
    store: DeviceStateStore,
    popup: PopupController,
}

impl PanelService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            store: DeviceStateStore::new(config.default_speed_percent),
            popup: PopupController::new(),
        }
    }

    /// Push the stored power state of every device to the display.
    /// Called once after the control screen is built.
    pub fn sync_all_icons<D: DisplayPort>(&self, display: &mut D) {
        self.store.sync_all_icons(display);
    }

    /// Process one external command.  Runs inside the caller's critical
    /// section; does exactly one state transition.
    pub fn handle_command<D: DisplayPort>(
        &mut self,
        cmd: PanelCommand,
        display: &mut D,
    ) -> Result<()> {
        match cmd {
            PanelCommand::PressDevice(ty) if ty.is_speed_capable() => {
                // Speed-capable tiles open/dismiss the control popup
                // instead of toggling power directly.
                self.popup.trigger(ty, &self.store);
            }
            PanelCommand::PressDevice(ty) => {
                let on = self.store.toggle_power(ty, display);
                info!("{}: toggled {}", ty.name(), if on { "on" } else { "off" });
            }
            PanelCommand::SetPower(ty, on) => {
                self.store.set_power(ty, on, display);
            }
            PanelCommand::SetSpeed(ty, value) => {
                self.store.set_speed(ty, value, display)?;
            }
            PanelCommand::LeaveControlScreen => {
                self.popup.close();
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn power(&self, ty: DeviceType) -> bool {
        self.store.power(ty)
    }

    pub fn speed(&self, ty: DeviceType) -> u8 {
        self.store.speed(ty)
    }

    pub fn popup_state(&self) -> PopupState {
        self.popup.state()
    }

    /// Read access for popup binding snapshots in tests and widgets.
    pub fn popup(&self) -> &PopupController {
        &self.popup
    }

    pub fn store(&self) -> &DeviceStateStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullDisplay;
    impl DisplayPort for NullDisplay {
        fn sync_icon(&mut self, _device: DeviceType, _power: bool) {}
    }

    fn service() -> PanelService {
        PanelService::new(&SystemConfig::default())
    }

    #[test]
    fn press_plain_device_toggles_power() {
        let mut svc = service();
        let mut d = NullDisplay;

        svc.handle_command(PanelCommand::PressDevice(DeviceType::Light), &mut d)
            .unwrap();
        assert!(svc.power(DeviceType::Light));
        assert_eq!(svc.popup_state(), PopupState::Closed);

        svc.handle_command(PanelCommand::PressDevice(DeviceType::Light), &mut d)
            .unwrap();
        assert!(!svc.power(DeviceType::Light));
    }

    #[test]
    fn press_speed_capable_device_opens_popup_without_toggling() {
        let mut svc = service();
        let mut d = NullDisplay;

        svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut d)
            .unwrap();
        assert_eq!(svc.popup_state(), PopupState::Open(DeviceType::Fan));
        assert!(!svc.power(DeviceType::Fan));
    }

    #[test]
    fn leave_screen_closes_popup_idempotently() {
        let mut svc = service();
        let mut d = NullDisplay;

        svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut d)
            .unwrap();
        svc.handle_command(PanelCommand::LeaveControlScreen, &mut d)
            .unwrap();
        assert_eq!(svc.popup_state(), PopupState::Closed);

        // Closing again is a no-op, not an error.
        svc.handle_command(PanelCommand::LeaveControlScreen, &mut d)
            .unwrap();
        assert_eq!(svc.popup_state(), PopupState::Closed);
    }

    #[test]
    fn slider_command_clamps_and_powers_on() {
        let mut svc = service();
        let mut d = NullDisplay;

        svc.handle_command(PanelCommand::SetSpeed(DeviceType::Fan, 180), &mut d)
            .unwrap();
        assert_eq!(svc.speed(DeviceType::Fan), 100);
        assert!(svc.power(DeviceType::Fan));
    }

    #[test]
    fn slider_command_on_plain_device_is_surfaced() {
        let mut svc = service();
        let mut d = NullDisplay;

        let err = svc
            .handle_command(PanelCommand::SetSpeed(DeviceType::Switch, 10), &mut d)
            .unwrap_err();
        assert_eq!(
            err,
            crate::error::Error::InvalidTransition(DeviceType::Switch)
        );
    }
}
