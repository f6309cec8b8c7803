//! Controllable devices — types, pure transitions, and the state store.
//!
//! The panel controls four logical devices.  [`DeviceStateStore`] is the
//! single source of truth for their power/speed state; every mutation goes
//! through the pure transition functions in [`actions`] and synchronously
//! syncs the on-screen icon through the
//! [`DisplayPort`](crate::app::ports::DisplayPort).

pub mod actions;
pub mod store;

pub use store::DeviceStateStore;

// ---------------------------------------------------------------------------
// Device identity
// ---------------------------------------------------------------------------

/// Enumeration of the controllable device types on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DeviceType {
    Light = 0,
    Switch = 1,
    Fan = 2,
    Air = 3,
}

impl DeviceType {
    /// Total number of device types — used to size the state array.
    pub const COUNT: usize = 4;

    /// All device types in panel layout order.
    pub const ALL: [Self; Self::COUNT] = [Self::Light, Self::Switch, Self::Fan, Self::Air];

    /// Convert a `u8` index back to `DeviceType`.  Returns `None` for
    /// out-of-range values (e.g. a corrupted input event byte).
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::Light),
            1 => Some(Self::Switch),
            2 => Some(Self::Fan),
            3 => Some(Self::Air),
            _ => None,
        }
    }

    /// Whether this device carries an analog speed in addition to power.
    pub fn is_speed_capable(self) -> bool {
        matches!(self, Self::Fan | Self::Air)
    }

    /// Human-readable name for logs and UI labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Switch => "Switch",
            Self::Fan => "Fan",
            Self::Air => "Air",
        }
    }
}

// ---------------------------------------------------------------------------
// Per-device state
// ---------------------------------------------------------------------------

/// Logical state of one device.
///
/// Invariants (maintained by [`actions`], never checked at this level):
/// - `speed <= 100`
/// - a successful non-zero speed write turns `power` on
/// - powering off retains the stored speed as memory for the next
///   power-on, so `speed > 0` with `power == false` is a valid
///   resting state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    /// Power switch.
    pub power: bool,
    /// Logical speed percentage, 0–100.  Meaningful only on
    /// speed-capable types; always 0 otherwise.
    pub speed: u8,
}
