//! Interrupt-driven input event queue.
//!
//! Input events are produced by the GPIO/touch ISR layer (device tile
//! presses, the return button) and consumed by the main loop, which
//! translates them into [`PanelCommand`](crate::app::commands::PanelCommand)s
//! one at a time.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Touch ISR   │────▶│              │     │              │
//! │ Button ISR  │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Software    │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

use crate::devices::DeviceType;

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 16;

/// User-input events, pre-classified by the ISR/driver layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A device tile was pressed.
    DevicePressed(DeviceType),
    /// The return/back control was pressed (leave the control screen).
    ReturnPressed,
}

// ── Wire encoding ─────────────────────────────────────────────
//
// Events cross the ISR boundary as a single byte: the low nibble holds
// the device index for presses, 0x20 marks the return button.

const DEVICE_PRESSED_BASE: u8 = 0x10;
const RETURN_PRESSED: u8 = 0x20;

fn event_to_u8(event: InputEvent) -> u8 {
    match event {
        InputEvent::DevicePressed(ty) => DEVICE_PRESSED_BASE | ty as u8,
        InputEvent::ReturnPressed => RETURN_PRESSED,
    }
}

fn event_from_u8(raw: u8) -> Option<InputEvent> {
    match raw {
        RETURN_PRESSED => Some(InputEvent::ReturnPressed),
        b if b & 0xF0 == DEVICE_PRESSED_BASE => {
            DeviceType::from_index((b & 0x0F) as usize).map(InputEvent::DevicePressed)
        }
        _ => None,
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume).
// Uses atomic head/tail indices.  The buffer is intentionally
// kept in a static so ISR callbacks can access it.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed under the SPSC discipline only.
// Producer (push_event): ISR / input-driver context — one writer.
// Consumer (pop_event): main-loop task — one reader.
// The acquire/release pairs on EVENT_HEAD/EVENT_TAIL order the slot
// writes against index publication.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from ISR context (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: InputEvent) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; the slot at `head` is not visible to the
    // consumer until the Release store below.
    unsafe {
        EVENT_BUFFER[head as usize] = event_to_u8(event);
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<InputEvent> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer; the Acquire load of EVENT_HEAD above
    // ordered the producer's slot write before this read.
    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, FIFO order.
pub fn drain_events(mut handler: impl FnMut(InputEvent)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}
