// The blocking record queue: read/write on top of the ring and the
// synchronization core.

use crate::error::FifoError;
use crate::trace;
use crate::Core::alloc;
use crate::Core::signal::Signal;
use crate::Core::sync::SyncCore;
use crate::FIFO::transfer::{UserSink, UserSource};
use crate::FIFO::Buffer::RingBuffer;
use crate::FIFO::Structs::FifoStats;

/// A bounded first-in first-out queue of byte records.
///
/// Any number of threads may read and write concurrently through a shared
/// reference (typically an `Arc<Fifo>`). Writers block while all slots are
/// filled, readers block while none are. Every blocking call takes a
/// [`Signal`] through which the wait can be cancelled.
pub struct Fifo {
    sync: SyncCore<RingBuffer>,
    capacity: usize,
    elem_size: usize,
}

impl Fifo {
    /// Allocate a queue of `capacity` slots holding records of up to
    /// `elem_size` bytes.
    pub fn create(capacity: usize, elem_size: usize) -> Result<Self, FifoError> {
        let ring = alloc::allocate_ring(capacity, elem_size)?;
        trace::info!("scull: FIFO SIZE={}, ELEMSZ={}", capacity, elem_size);

        Ok(Self {
            sync: SyncCore::new(capacity, ring),
            capacity,
            elem_size,
        })
    }

    /// Release the ring. Equivalent to dropping the queue.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        alloc::release_ring(self.sync.storage_mut());
    }

    /// Nothing to set up per opener.
    pub fn open(&self) -> Result<(), FifoError> {
        Ok(())
    }

    /// Nothing to tear down per opener.
    pub fn close(&self) -> Result<(), FifoError> {
        Ok(())
    }

    /// Append one record of `len` bytes taken from `src`.
    ///
    /// Records longer than [`max_record_size`](Self::max_record_size) are
    /// silently truncated to it. Blocks while the queue is full.
    ///
    /// # Returns
    /// * `Ok(n)` - the number of bytes stored, `min(len, max_record_size())`
    /// * `Err(Interrupted)` - `signal` was raised while waiting; nothing changed
    /// * `Err(Fault)` - `src` could not supply `n` bytes; nothing changed
    pub fn write<S: UserSource + ?Sized>(
        &self,
        src: &S,
        len: usize,
        signal: &Signal,
    ) -> Result<usize, FifoError> {
        let len = len.min(self.elem_size);

        self.sync.acquire_free(signal)?;
        match self.sync.with_lock(signal, |ring| ring.produce(src, len)) {
            Ok(written) => {
                self.sync.release_filled();
                Ok(written)
            }
            Err(err) => {
                // Give back the slot we claimed, not the reader's.
                self.sync.release_free();
                Err(err)
            }
        }
    }

    /// Remove the oldest record, copying at most `max_len` bytes of it into
    /// `dst`. Any remainder of the record is discarded. Blocks while the
    /// queue is empty.
    ///
    /// # Returns
    /// * `Ok(n)` - bytes copied, `min(max_len, record length)`
    /// * `Err(Interrupted)` - `signal` was raised while waiting; nothing changed
    /// * `Err(Fault)` - `dst` could not take `n` bytes; the record stays queued
    pub fn read<D: UserSink + ?Sized>(
        &self,
        dst: &mut D,
        max_len: usize,
        signal: &Signal,
    ) -> Result<usize, FifoError> {
        self.sync.acquire_filled(signal)?;
        match self.sync.with_lock(signal, |ring| ring.consume(dst, max_len)) {
            Ok(read) => {
                self.sync.release_free();
                Ok(read)
            }
            Err(err) => {
                self.sync.release_filled();
                Err(err)
            }
        }
    }

    /// Largest record payload the queue stores without truncation.
    pub fn max_record_size(&self) -> usize {
        self.elem_size
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot counters and cursors. Waits for the lock, ignoring interruption.
    pub fn stats(&self) -> FifoStats {
        self.sync.inspect(|ring| FifoStats {
            capacity: self.capacity,
            elem_size: self.elem_size,
            free_slots: self.sync.free_slots(),
            filled_slots: self.sync.filled_slots(),
            head: ring.head(),
            tail: ring.tail(),
        })
    }

    /// Records currently queued and not yet claimed by a reader.
    pub fn len(&self) -> usize {
        self.sync.filled_slots()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn sync(&self) -> &SyncCore<RingBuffer> {
        &self.sync
    }
}

impl Drop for Fifo {
    fn drop(&mut self) {
        self.teardown();
    }
}
