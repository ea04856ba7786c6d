use crate::Core::semaphore::Semaphore;
use crate::FIFO::Buffer::RingBuffer;
use crate::FIFO::Fifo;
use std::fmt;

/// Debug function for Fifo
///
/// Shows:
/// - Configured capacity and record size
/// - Both semaphore counts
/// - Whether the lock is currently held
///
/// Does not take the queue lock, so it is safe to call from inside a
/// critical section or while the queue is contended.
pub fn debug_fifo(fifo: &Fifo, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let sync = fifo.sync();
    f.debug_struct("Fifo")
        .field("capacity", &fifo.capacity())
        .field("elem_size", &fifo.max_record_size())
        .field("free_slots", &sync.free_slots())
        .field("filled_slots", &sync.filled_slots())
        .field("locked", &sync.is_locked())
        .finish_non_exhaustive()
}

/// Debug function for RingBuffer
///
/// Shows geometry and cursors without dumping the payload region.
pub fn debug_ring_buffer(ring: &RingBuffer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RingBuffer")
        .field("region", &format_args!("{} bytes", ring.region_len()))
        .field("capacity", &ring.capacity())
        .field("stride", &ring.slot_stride())
        .field("head", &ring.head())
        .field("tail", &ring.tail())
        .finish()
}

pub fn debug_semaphore(sem: &Semaphore, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Semaphore")
        .field("available", &sem.available())
        .finish()
}
