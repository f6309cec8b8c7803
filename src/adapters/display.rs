//! Log-based display sync adapter.
//!
//! Implements [`DisplayPort`] by writing icon state changes to the
//! ESP-IDF logger.  The GUI layer proper (widget tree, icon bitmaps)
//! lives outside this crate; its adapter implements the same trait and
//! must keep `sync_icon` bounded — queue a redraw, never wait for one.

use log::info;

use crate::app::ports::DisplayPort;
use crate::devices::DeviceType;

/// Adapter that logs every icon sync to the serial console.
pub struct LogDisplaySync;

impl LogDisplaySync {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayPort for LogDisplaySync {
    fn sync_icon(&mut self, device: DeviceType, power: bool) {
        info!(
            "ICON  | {} -> {}",
            device.name(),
            if power { "on" } else { "off" }
        );
    }
}
