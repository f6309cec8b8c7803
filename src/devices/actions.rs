//! Pure state-transition functions for device control.
//!
//! These functions mutate a [`DeviceState`] in place and perform no I/O,
//! which keeps the full transition table unit-testable.  Icon sync and
//! locking happen one layer up in [`store`](super::store).

use crate::error::{Error, Result};

use super::{DeviceState, DeviceType};

/// Maximum logical speed (percent).  Values above are clamped, never rejected.
pub const MAX_SPEED: u8 = 100;

/// Set the power switch.
///
/// Turning a speed-capable device on while its speed is 0 applies
/// `default_speed` so that "on" is always distinguishable from
/// "off at speed 0".  Turning off leaves the stored speed untouched.
pub fn set_power(ty: DeviceType, state: &mut DeviceState, on: bool, default_speed: u8) {
    if on {
        state.power = true;
        if ty.is_speed_capable() && state.speed == 0 {
            state.speed = default_speed;
        }
    } else {
        state.power = false;
    }
}

/// Set the logical speed, clamped to [0, [`MAX_SPEED`]].
///
/// A non-zero speed forces the device on (power side effect without
/// re-applying the default-speed rule — the speed was just written).
/// Returns [`Error::InvalidTransition`] on non-speed-capable types.
pub fn set_speed(ty: DeviceType, state: &mut DeviceState, value: u8) -> Result<()> {
    if !ty.is_speed_capable() {
        return Err(Error::InvalidTransition(ty));
    }
    state.speed = value.min(MAX_SPEED);
    if state.speed > 0 {
        state.power = true;
    }
    Ok(())
}

/// Flip the power switch; returns the new power state.
pub fn toggle_power(ty: DeviceType, state: &mut DeviceState, default_speed: u8) -> bool {
    let on = !state.power;
    set_power(ty, state, on, default_speed);
    state.power
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_on_at_zero_speed_applies_default() {
        let mut s = DeviceState::default();
        set_power(DeviceType::Fan, &mut s, true, 50);
        assert!(s.power);
        assert_eq!(s.speed, 50);
    }

    #[test]
    fn power_on_preserves_nonzero_speed() {
        let mut s = DeviceState {
            power: false,
            speed: 30,
        };
        set_power(DeviceType::Fan, &mut s, true, 50);
        assert_eq!(s.speed, 30);
    }

    #[test]
    fn power_on_plain_device_never_touches_speed() {
        let mut s = DeviceState::default();
        set_power(DeviceType::Light, &mut s, true, 50);
        assert!(s.power);
        assert_eq!(s.speed, 0);
    }

    #[test]
    fn power_off_keeps_speed() {
        let mut s = DeviceState {
            power: true,
            speed: 70,
        };
        set_power(DeviceType::Fan, &mut s, false, 50);
        assert!(!s.power);
        assert_eq!(s.speed, 70);
    }

    #[test]
    fn speed_clamps_above_max() {
        let mut s = DeviceState::default();
        set_speed(DeviceType::Fan, &mut s, 250).unwrap();
        assert_eq!(s.speed, 100);
    }

    #[test]
    fn nonzero_speed_forces_power_on() {
        let mut s = DeviceState::default();
        set_speed(DeviceType::Air, &mut s, 1).unwrap();
        assert!(s.power);
        assert_eq!(s.speed, 1);
    }

    #[test]
    fn zero_speed_leaves_power_alone() {
        let mut s = DeviceState {
            power: true,
            speed: 40,
        };
        set_speed(DeviceType::Fan, &mut s, 0).unwrap();
        assert!(s.power);
        assert_eq!(s.speed, 0);
    }

    #[test]
    fn speed_on_plain_device_is_invalid() {
        let mut s = DeviceState::default();
        let err = set_speed(DeviceType::Switch, &mut s, 10).unwrap_err();
        assert_eq!(err, Error::InvalidTransition(DeviceType::Switch));
        assert_eq!(s, DeviceState::default());
    }

    #[test]
    fn toggle_roundtrip() {
        let mut s = DeviceState::default();
        assert!(toggle_power(DeviceType::Light, &mut s, 50));
        assert!(!toggle_power(DeviceType::Light, &mut s, 50));
    }
}
