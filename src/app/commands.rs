//! Inbound commands to the panel service.
//!
//! These represent actions requested by the outside world (touch input,
//! physical buttons, a serial console) that the
//! [`PanelService`](super::service::PanelService) interprets and acts upon.

use crate::devices::DeviceType;

/// Commands that external input adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    /// The user pressed a device tile.  Plain devices toggle power;
    /// speed-capable devices open (or dismiss) the control popup.
    PressDevice(DeviceType),

    /// The popup's power toggle changed.
    SetPower(DeviceType, bool),

    /// The popup's speed slider moved (0–100, clamped).
    SetSpeed(DeviceType, u8),

    /// The user navigated away from the control screen; any open popup
    /// must close.  Idempotent.
    LeaveControlScreen,
}
