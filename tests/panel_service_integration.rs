//! Integration tests: PanelService → device store → display port.

use smartpanel::app::commands::PanelCommand;
use smartpanel::app::ports::DisplayPort;
use smartpanel::app::service::PanelService;
use smartpanel::config::SystemConfig;
use smartpanel::devices::DeviceType;
use smartpanel::error::Error;
use smartpanel::ui::popup::PopupState;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct IconSync {
    device: DeviceType,
    power: bool,
}

struct MockDisplay {
    syncs: Vec<IconSync>,
}

impl MockDisplay {
    fn new() -> Self {
        Self { syncs: Vec::new() }
    }

    fn last_for(&self, device: DeviceType) -> Option<bool> {
        self.syncs
            .iter()
            .rev()
            .find(|s| s.device == device)
            .map(|s| s.power)
    }
}

impl DisplayPort for MockDisplay {
    fn sync_icon(&mut self, device: DeviceType, power: bool) {
        self.syncs.push(IconSync { device, power });
    }
}

fn service() -> PanelService {
    PanelService::new(&SystemConfig::default())
}

// ── Device control flows ──────────────────────────────────────

#[test]
fn toggle_flow_keeps_icons_in_sync() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Light), &mut display)
        .unwrap();
    assert_eq!(display.last_for(DeviceType::Light), Some(true));

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Light), &mut display)
        .unwrap();
    assert_eq!(display.last_for(DeviceType::Light), Some(false));

    // Two presses, two syncs, nothing for other devices.
    assert_eq!(display.syncs.len(), 2);
}

#[test]
fn power_on_at_zero_speed_applies_default_speed() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::SetPower(DeviceType::Fan, true), &mut display)
        .unwrap();
    assert!(svc.power(DeviceType::Fan));
    assert_eq!(svc.speed(DeviceType::Fan), 50);
}

#[test]
fn power_on_with_existing_speed_preserves_it() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::SetSpeed(DeviceType::Fan, 30), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::SetPower(DeviceType::Fan, false), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::SetPower(DeviceType::Fan, true), &mut display)
        .unwrap();
    assert_eq!(svc.speed(DeviceType::Fan), 30);
}

#[test]
fn power_off_retains_speed_as_memory() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::SetSpeed(DeviceType::Fan, 30), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::SetPower(DeviceType::Fan, false), &mut display)
        .unwrap();

    // Off, but the speed survives as the value to restore on power-on.
    assert!(!svc.power(DeviceType::Fan));
    assert_eq!(svc.speed(DeviceType::Fan), 30);
    assert_eq!(display.last_for(DeviceType::Fan), Some(false));
}

#[test]
fn overspeed_clamps_and_powers_on() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::SetSpeed(DeviceType::Air, 255), &mut display)
        .unwrap();
    assert_eq!(svc.speed(DeviceType::Air), 100);
    assert!(svc.power(DeviceType::Air));
    assert_eq!(display.last_for(DeviceType::Air), Some(true));
}

#[test]
fn speed_on_plain_device_is_rejected_without_side_effects() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    let err = svc
        .handle_command(PanelCommand::SetSpeed(DeviceType::Light, 40), &mut display)
        .unwrap_err();
    assert_eq!(err, Error::InvalidTransition(DeviceType::Light));
    assert!(!svc.power(DeviceType::Light));
    assert!(display.syncs.is_empty());
}

#[test]
fn initial_icon_sync_reports_every_device_off() {
    let svc = service();
    let mut display = MockDisplay::new();

    svc.sync_all_icons(&mut display);
    assert_eq!(display.syncs.len(), DeviceType::COUNT);
    assert!(display.syncs.iter().all(|s| !s.power));
}

// ── Popup mediation ───────────────────────────────────────────

#[test]
fn press_fan_opens_popup_press_again_dismisses() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut display)
        .unwrap();
    assert_eq!(svc.popup_state(), PopupState::Open(DeviceType::Fan));

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut display)
        .unwrap();
    assert_eq!(svc.popup_state(), PopupState::Closed);
}

#[test]
fn switching_between_speed_capable_devices_keeps_one_modal() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::PressDevice(DeviceType::Air), &mut display)
        .unwrap();
    assert_eq!(svc.popup_state(), PopupState::Open(DeviceType::Air));
}

#[test]
fn popup_binding_reflects_state_at_open_time() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::SetSpeed(DeviceType::Fan, 60), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut display)
        .unwrap();

    let binding = svc.popup().binding().expect("popup open");
    assert!(binding.power);
    assert_eq!(binding.speed, 60);
}

#[test]
fn modal_controls_route_to_store_while_open() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Fan), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::SetPower(DeviceType::Fan, true), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::SetSpeed(DeviceType::Fan, 75), &mut display)
        .unwrap();

    assert!(svc.power(DeviceType::Fan));
    assert_eq!(svc.speed(DeviceType::Fan), 75);
    assert_eq!(display.last_for(DeviceType::Fan), Some(true));
    // The binding is a snapshot; it does not follow store mutations.
    assert_eq!(svc.popup().binding().unwrap().speed, 0);
}

#[test]
fn leaving_control_screen_closes_popup_and_is_idempotent() {
    let mut svc = service();
    let mut display = MockDisplay::new();

    svc.handle_command(PanelCommand::PressDevice(DeviceType::Air), &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::LeaveControlScreen, &mut display)
        .unwrap();
    svc.handle_command(PanelCommand::LeaveControlScreen, &mut display)
        .unwrap();
    assert_eq!(svc.popup_state(), PopupState::Closed);

    // Device state survives popup teardown.
    assert!(!svc.power(DeviceType::Air));
}
