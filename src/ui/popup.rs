//! Single-instance modal popup controller.
//!
//! At most one device-detail popup exists at any time.  Triggering the
//! device that is already open dismisses it (press again to close);
//! triggering a different device closes the old session before opening
//! the new one, so no residual modal can survive a switch.
//!
//! The controller is a pure state machine: it snapshots device state into
//! a [`ModalBinding`] at open time and hands that to the rendering
//! collaborator.  The binding is **not** live — if external code mutates
//! the device while the popup is open, the widgets keep showing the
//! snapshot.  That matches the reference behaviour and is accepted.

use log::info;

use crate::devices::{DeviceStateStore, DeviceType};

// ---------------------------------------------------------------------------
// Binding snapshot
// ---------------------------------------------------------------------------

/// Initial widget values for a freshly opened popup, captured from the
/// store at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalBinding {
    pub device: DeviceType,
    pub power: bool,
    pub speed: u8,
}

impl ModalBinding {
    fn snapshot(device: DeviceType, store: &DeviceStateStore) -> Self {
        let state = store.state(device);
        Self {
            device,
            power: state.power,
            speed: state.speed,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Observable popup state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    Closed,
    Open(DeviceType),
}

/// What a [`PopupController::trigger`] call did, so the GUI collaborator
/// knows which widgets to tear down and/or build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTransition {
    /// No session was open; one was created.
    Opened(ModalBinding),
    /// The same device was triggered again; its session closed.
    Dismissed(DeviceType),
    /// A different device was triggered; the old session closed first.
    Switched {
        closed: DeviceType,
        opened: ModalBinding,
    },
}

/// State machine guaranteeing at most one active modal.
pub struct PopupController {
    session: Option<ModalBinding>,
}

impl PopupController {
    pub fn new() -> Self {
        Self { session: None }
    }

    /// Handle a popup trigger for `target` (a device tile press).
    ///
    /// - `Closed` → open, bound to the target's current state.
    /// - `Open(target)` → close (idempotent re-trigger dismisses).
    /// - `Open(other)` → close the old session, then open for `target`.
    pub fn trigger(&mut self, target: DeviceType, store: &DeviceStateStore) -> PopupTransition {
        match self.session {
            None => {
                let binding = ModalBinding::snapshot(target, store);
                self.session = Some(binding);
                info!("popup: open {}", target.name());
                PopupTransition::Opened(binding)
            }
            Some(open) if open.device == target => {
                self.session = None;
                info!("popup: dismiss {}", target.name());
                PopupTransition::Dismissed(target)
            }
            Some(open) => {
                let binding = ModalBinding::snapshot(target, store);
                self.session = Some(binding);
                info!("popup: switch {} -> {}", open.device.name(), target.name());
                PopupTransition::Switched {
                    closed: open.device,
                    opened: binding,
                }
            }
        }
    }

    /// Close whatever is open.  No-op when already closed; returns what
    /// was closed so the caller can tear down widgets.
    pub fn close(&mut self) -> Option<DeviceType> {
        let closed = self.session.take().map(|b| b.device);
        if let Some(device) = closed {
            info!("popup: close {}", device.name());
        }
        closed
    }

    /// Current state.
    pub fn state(&self) -> PopupState {
        match self.session {
            None => PopupState::Closed,
            Some(b) => PopupState::Open(b.device),
        }
    }

    /// Binding snapshot of the open session, if any.
    pub fn binding(&self) -> Option<&ModalBinding> {
        self.session.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::DisplayPort;

    struct NullDisplay;
    impl DisplayPort for NullDisplay {
        fn sync_icon(&mut self, _device: DeviceType, _power: bool) {}
    }

    fn store() -> DeviceStateStore {
        DeviceStateStore::new(50)
    }

    #[test]
    fn starts_closed() {
        let ctrl = PopupController::new();
        assert_eq!(ctrl.state(), PopupState::Closed);
    }

    #[test]
    fn retrigger_same_device_dismisses() {
        let store = store();
        let mut ctrl = PopupController::new();

        ctrl.trigger(DeviceType::Fan, &store);
        assert_eq!(ctrl.state(), PopupState::Open(DeviceType::Fan));

        let t = ctrl.trigger(DeviceType::Fan, &store);
        assert_eq!(t, PopupTransition::Dismissed(DeviceType::Fan));
        assert_eq!(ctrl.state(), PopupState::Closed);
    }

    #[test]
    fn trigger_other_device_switches_with_no_residual_session() {
        let store = store();
        let mut ctrl = PopupController::new();

        ctrl.trigger(DeviceType::Fan, &store);
        let t = ctrl.trigger(DeviceType::Light, &store);

        match t {
            PopupTransition::Switched { closed, opened } => {
                assert_eq!(closed, DeviceType::Fan);
                assert_eq!(opened.device, DeviceType::Light);
            }
            other => panic!("expected Switched, got {:?}", other),
        }
        assert_eq!(ctrl.state(), PopupState::Open(DeviceType::Light));
    }

    #[test]
    fn binding_snapshots_store_state_at_open() {
        let mut store = store();
        let mut display = NullDisplay;
        store.set_speed(DeviceType::Fan, 70, &mut display).unwrap();

        let mut ctrl = PopupController::new();
        let t = ctrl.trigger(DeviceType::Fan, &store);
        let PopupTransition::Opened(binding) = t else {
            panic!("expected Opened");
        };
        assert!(binding.power);
        assert_eq!(binding.speed, 70);
    }

    #[test]
    fn binding_does_not_live_refresh() {
        let mut store = store();
        let mut display = NullDisplay;
        let mut ctrl = PopupController::new();

        ctrl.trigger(DeviceType::Fan, &store);
        store.set_speed(DeviceType::Fan, 90, &mut display).unwrap();

        // Snapshot keeps the values from open time.
        assert_eq!(ctrl.binding().unwrap().speed, 0);
    }

    #[test]
    fn close_is_idempotent() {
        let store = store();
        let mut ctrl = PopupController::new();

        ctrl.trigger(DeviceType::Air, &store);
        assert_eq!(ctrl.close(), Some(DeviceType::Air));
        assert_eq!(ctrl.close(), None);
        assert_eq!(ctrl.state(), PopupState::Closed);
    }
}
