// Counting semaphore with interruptible waits.

use super::signal::Signal;
use crate::error::FifoError;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;

/// Shared permit counter and its wait queue.
///
/// Kept behind an `Arc` so that a [`Signal`] can reach the condvar of the
/// gate its owner is parked on.
pub(crate) struct Gate {
    permits: Mutex<usize>,
    available: Condvar,
}

impl Gate {
    fn new(permits: usize) -> Self {
        Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
        }
    }

    /// Wake every waiter so it can re-check its signal.
    pub(crate) fn wake_all(&self) {
        let _permits = self.permits.lock();
        self.available.notify_all();
    }
}

/// A counting semaphore.
///
/// `acquire` blocks until a permit is available and takes it, or fails with
/// [`FifoError::Interrupted`] once the caller's [`Signal`] is raised. An
/// interrupted acquire never takes a permit.
pub struct Semaphore {
    pub(crate) gate: Arc<Gate>,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Self {
            gate: Arc::new(Gate::new(permits)),
        }
    }

    /// Take one permit, blocking until one is available.
    ///
    /// A permit that is already available is granted even if `signal` has
    /// been raised; only an actual wait is interruptible.
    pub fn acquire(&self, signal: &Signal) -> Result<(), FifoError> {
        if self.try_acquire() {
            return Ok(());
        }

        let _parked = signal.park(&self.gate);
        let mut permits = self.gate.permits.lock();
        loop {
            if *permits > 0 {
                *permits -= 1;
                return Ok(());
            }
            if signal.is_raised() {
                return Err(FifoError::Interrupted);
            }
            self.gate.available.wait(&mut permits);
        }
    }

    /// Take one permit, ignoring interruption.
    pub fn acquire_uninterruptible(&self) {
        let mut permits = self.gate.permits.lock();
        while *permits == 0 {
            self.gate.available.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Take one permit if one is available right now.
    pub fn try_acquire(&self) -> bool {
        let mut permits = self.gate.permits.lock();
        if *permits > 0 {
            *permits -= 1;
            true
        } else {
            false
        }
    }

    /// Return one permit and wake one waiter.
    pub fn release(&self) {
        let mut permits = self.gate.permits.lock();
        *permits += 1;
        self.gate.available.notify_one();
    }

    /// Current number of available permits.
    pub fn available(&self) -> usize {
        *self.gate.permits.lock()
    }
}
