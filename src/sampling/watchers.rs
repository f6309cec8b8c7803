//! Capacity-bounded watcher registry.
//!
//! A small arena of observer slots with stable ids: no heap growth, O(capacity)
//! add/remove/notify, first-free-slot reuse after removal.  Exceeding the
//! capacity is a configuration error surfaced to the caller of [`add`],
//! never retried here.
//!
//! Reentrancy: `notify_all` takes `&mut self`, so a watcher cannot reach
//! back into its own registry during the fan-out — the hazard the old
//! callback-array design had to defend against is ruled out by ownership.
//!
//! [`add`]: WatcherRegistry::add

use heapless::Vec;

use crate::app::ports::HumidityWatcher;
use crate::error::{Error, Result};

/// Maximum concurrently registered watchers.
pub const MAX_WATCHERS: usize = 5;

/// Stable handle for a registered watcher; survives unrelated removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatcherId(u32);

struct Slot<W> {
    id: WatcherId,
    watcher: W,
}

/// Fixed-capacity set of humidity observers.
pub struct WatcherRegistry<W> {
    slots: Vec<Option<Slot<W>>, MAX_WATCHERS>,
    next_id: u32,
}

impl<W: HumidityWatcher> WatcherRegistry<W> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a watcher in the first free slot.
    pub fn add(&mut self, watcher: W) -> Result<WatcherId> {
        let id = WatcherId(self.next_id);
        let slot = Slot { id, watcher };

        if let Some(free) = self.slots.iter_mut().find(|s| s.is_none()) {
            *free = Some(slot);
        } else if self.slots.push(Some(slot)).is_err() {
            return Err(Error::CapacityExceeded);
        }

        self.next_id = self.next_id.wrapping_add(1);
        Ok(id)
    }

    /// Remove a watcher by id, returning it.  Unknown ids are a no-op.
    pub fn remove(&mut self, id: WatcherId) -> Option<W> {
        self.slots
            .iter_mut()
            .find(|s| s.as_ref().is_some_and(|slot| slot.id == id))
            .and_then(Option::take)
            .map(|slot| slot.watcher)
    }

    /// Invoke every registered watcher with `value`, in slot order.
    /// Slot order equals insertion order only until a removal reuses a slot.
    pub fn notify_all(&mut self, value: i32) {
        for slot in self.slots.iter_mut().flatten() {
            slot.watcher.on_humidity_changed(value);
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        MAX_WATCHERS
    }
}
