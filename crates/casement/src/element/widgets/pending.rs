//! Fixed pool of pending position-and-size updates.
//!
//! A window that is asked to move and resize at once must not move before
//! the client has redrawn at the new size. Each such request is parked in a
//! slot keyed by the serial of the size request; the position is applied
//! when the client commits at (or past) that serial.
//!
//! Slots live in a fixed array. Their indices are partitioned between an
//! `available` list and a `pending` list; `pending` is kept in request
//! order, which is serial order.

use std::collections::VecDeque;

use casement_core::Serial;

/// Number of slots per window.
pub const MAX_PENDING: usize = 64;

/// A requested move, waiting for the client to commit its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingUpdate {
    pub serial: Serial,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug)]
pub(crate) struct PendingUpdates {
    slots: [PendingUpdate; MAX_PENDING],
    /// Oldest first.
    pending: VecDeque<usize>,
    /// Most recently released first.
    available: VecDeque<usize>,
}

impl Default for PendingUpdates {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingUpdates {
    pub(crate) fn new() -> Self {
        Self {
            slots: [PendingUpdate::default(); MAX_PENDING],
            pending: VecDeque::with_capacity(MAX_PENDING),
            available: (0..MAX_PENDING).collect(),
        }
    }

    /// Park `update` behind all pending ones.
    ///
    /// When no slot is available the oldest pending update is dropped to
    /// make room, and returned.
    pub(crate) fn push(&mut self, update: PendingUpdate) -> Option<PendingUpdate> {
        let (index, recycled) = match self.available.pop_front() {
            Some(index) => (index, None),
            None => {
                let index = self.pending.pop_front()?;
                (index, Some(self.slots[index]))
            }
        };
        self.slots[index] = update;
        self.pending.push_back(index);
        recycled
    }

    /// Release every pending update whose serial is at or before `serial`,
    /// oldest first. Newer updates stay pending, in order.
    pub(crate) fn take_through(&mut self, serial: Serial) -> Vec<PendingUpdate> {
        let mut taken = Vec::new();
        while let Some(&index) = self.pending.front() {
            if self.slots[index].serial.delta(serial) > 0 {
                break;
            }
            self.pending.pop_front();
            self.available.push_front(index);
            taken.push(self.slots[index]);
        }
        taken
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn available_len(&self) -> usize {
        self.available.len()
    }

    /// Pending updates, oldest first.
    pub(crate) fn iter_pending(&self) -> impl Iterator<Item = &PendingUpdate> + '_ {
        self.pending.iter().map(|index| &self.slots[*index])
    }
}
