// The bounded-buffer synchronization core: two counting semaphores and one
// mutex around the protected storage.

use super::lock::InterruptibleMutex;
use super::semaphore::Semaphore;
use super::signal::Signal;
use crate::error::FifoError;
use crossbeam_utils::CachePadded;

/// Synchronization state of a bounded buffer holding `capacity` slots.
///
/// ### Protocol:
/// - **Writers** take a `free_slots` permit, then the lock, fill the tail
///   slot, unlock, and release a `filled_slots` permit.
/// - **Readers** take a `filled_slots` permit, then the lock, drain the head
///   slot, unlock, and release a `free_slots` permit.
///
/// Permits are always taken before the lock and never while holding it.
/// A caller that fails after taking a permit gives back that same permit.
pub struct SyncCore<T> {
    /// Slots a writer may still claim. Starts at `capacity`.
    free_slots: CachePadded<Semaphore>,
    /// Slots a reader may still claim. Starts at 0.
    filled_slots: CachePadded<Semaphore>,
    storage: InterruptibleMutex<T>,
}

impl<T> SyncCore<T> {
    pub fn new(capacity: usize, storage: T) -> Self {
        Self {
            free_slots: CachePadded::new(Semaphore::new(capacity)),
            filled_slots: CachePadded::new(Semaphore::new(0)),
            storage: InterruptibleMutex::new(storage),
        }
    }

    pub fn acquire_free(&self, signal: &Signal) -> Result<(), FifoError> {
        self.free_slots.acquire(signal)
    }

    pub fn release_free(&self) {
        self.free_slots.release();
    }

    pub fn acquire_filled(&self, signal: &Signal) -> Result<(), FifoError> {
        self.filled_slots.acquire(signal)
    }

    pub fn release_filled(&self) {
        self.filled_slots.release();
    }

    /// Run `f` with exclusive access to the storage.
    ///
    /// Fails with `Interrupted` if the lock wait is cancelled, in which case
    /// `f` is not run.
    pub fn with_lock<R>(
        &self,
        signal: &Signal,
        f: impl FnOnce(&mut T) -> Result<R, FifoError>,
    ) -> Result<R, FifoError> {
        let mut guard = self.storage.lock(signal)?;
        f(&mut *guard)
    }

    /// Read-only access under the lock, ignoring interruption.
    pub fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.storage.lock_uninterruptible();
        f(&*guard)
    }

    pub fn free_slots(&self) -> usize {
        self.free_slots.available()
    }

    pub fn filled_slots(&self) -> usize {
        self.filled_slots.available()
    }

    pub fn is_locked(&self) -> bool {
        self.storage.is_locked()
    }

    pub fn storage_mut(&mut self) -> &mut T {
        self.storage.get_mut()
    }
}
