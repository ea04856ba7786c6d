// Plain snapshot types reported by the queue.

/// Point-in-time view of a queue's counters and cursors.
///
/// Taken under the queue lock. The counters are only guaranteed to add up
/// to `capacity` when no read or write is in flight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FifoStats {
    pub capacity: usize,
    pub elem_size: usize,
    pub free_slots: usize,
    pub filled_slots: usize,
    pub head: usize,
    pub tail: usize,
}

impl FifoStats {
    /// Counters add up to the capacity and the cursors span exactly the
    /// filled slots.
    pub fn is_consistent(&self) -> bool {
        if self.capacity == 0 {
            return false;
        }
        let span = (self.tail + self.capacity - self.head) % self.capacity;
        self.free_slots + self.filled_slots == self.capacity
            && span == self.filled_slots % self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.filled_slots == 0
    }

    pub fn is_full(&self) -> bool {
        self.free_slots == 0
    }
}
