//! SmartPanel Firmware — Main Entry Point
//!
//! Hexagonal architecture with a dedicated sampling task and an
//! event-driven input loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HumidityAdc      LogDisplaySync      LogHumidityPublisher   │
//! │  (AnalogPort)     (DisplayPort)       (HumidityWatcher)      │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────┐  ┌────────────────────────────┐  │
//! │  │ PanelService           │  │ HumiditySampler            │  │
//! │  │ store · popup (locked) │  │ reader · filter · watchers │  │
//! │  └────────────────────────┘  └────────────────────────────┘  │
//! │        ▲ input loop                ▲ sampling task           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrency: `PanelService` sits behind a single critical-section
//! mutex shared by every mutating context; each command is one state
//! transition held for the shortest possible scope.  Watcher fan-out
//! runs on the sampling task, never under that mutex.
#![deny(unused_must_use)]

use std::cell::RefCell;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{info, warn};

use smartpanel::adapters::adc::HumidityAdc;
use smartpanel::adapters::display::LogDisplaySync;
use smartpanel::adapters::telemetry::LogHumidityPublisher;
use smartpanel::app::commands::PanelCommand;
use smartpanel::app::ports::{AnalogPort, HumidityWatcher};
use smartpanel::app::service::PanelService;
use smartpanel::config::SystemConfig;
use smartpanel::events::{self, InputEvent};
use smartpanel::sampling::{CalibratedReader, Calibration, HumiditySampler, SamplerState};

/// The single device-state critical section (spec'd ordering: icon sync
/// inside, watcher fan-out outside).
type SharedPanel = Mutex<CriticalSectionRawMutex, RefCell<PanelService>>;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("SmartPanel v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Panel service + display adapter ────────────────────
    let panel: SharedPanel = Mutex::new(RefCell::new(PanelService::new(&config)));
    let mut display = LogDisplaySync::new();

    // Seed the control-screen icons from the (all-off) stored state.
    panel.lock(|p| p.borrow().sync_all_icons(&mut display));

    // ── 3. Humidity sampling task ─────────────────────────────
    let mut adc = HumidityAdc::new();
    if let Err(e) = adc.init() {
        // Non-fatal: the sampling loop logs failed reads and keeps the
        // display on the previous value.
        warn!("humidity ADC init failed ({e})");
    }

    let reader = CalibratedReader::new(
        Calibration::humidity(config.calib_min_mv, config.calib_max_mv),
        config.samples_per_read,
    );
    let mut sampler: HumiditySampler<Box<dyn HumidityWatcher + Send>> =
        HumiditySampler::new(reader, &config);
    sampler
        .add_watcher(Box::new(LogHumidityPublisher::new()))
        .map_err(|e| anyhow::anyhow!("watcher registration failed: {e}"))?;

    let humidity = sampler.display_handle();
    let boot = Instant::now();
    let sample_interval = Duration::from_millis(u64::from(config.sample_interval_ms));

    std::thread::Builder::new()
        .name("humidity".into())
        .stack_size(4096)
        .spawn(move || {
            sampler.start(&mut adc, boot.elapsed().as_millis() as u32);
            loop {
                std::thread::sleep(sample_interval);
                sampler.tick(&mut adc, boot.elapsed().as_millis() as u32);
                if sampler.state() == SamplerState::Cancelled {
                    break;
                }
            }
        })
        .context("spawning humidity task")?;

    info!("System ready. Entering input loop.");

    // ── 4. Input loop ─────────────────────────────────────────
    let mut last_humidity_refresh = Instant::now();

    loop {
        std::thread::sleep(Duration::from_millis(50));

        events::drain_events(|event| {
            let cmd = match event {
                InputEvent::DevicePressed(ty) => PanelCommand::PressDevice(ty),
                InputEvent::ReturnPressed => PanelCommand::LeaveControlScreen,
            };
            panel.lock(|p| {
                if let Err(e) = p.borrow_mut().handle_command(cmd, &mut display) {
                    warn!("command rejected: {e}");
                }
            });
        });

        // Fast-path humidity label refresh (polls the display value
        // directly; watcher events are reserved for telemetry).
        if last_humidity_refresh.elapsed() >= Duration::from_secs(1) {
            if let Some(value) = humidity.get() {
                info!("humidity display: {value}%");
            }
            last_humidity_refresh = Instant::now();
        }
    }
}
