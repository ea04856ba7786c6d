// Mutual exclusion whose acquisition can be interrupted.

use super::semaphore::Semaphore;
use super::signal::Signal;
use crate::error::FifoError;
use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};

/// A mutex built on a one-permit [`Semaphore`], so that waiting for it can
/// be cancelled through a [`Signal`] like any other blocking acquire.
pub struct InterruptibleMutex<T> {
    gate: Semaphore,
    value: UnsafeCell<T>,
}

// Access to `value` is serialized by the one-permit gate.
unsafe impl<T: Send> Send for InterruptibleMutex<T> {}
unsafe impl<T: Send> Sync for InterruptibleMutex<T> {}

impl<T> InterruptibleMutex<T> {
    pub fn new(value: T) -> Self {
        Self {
            gate: Semaphore::new(1),
            value: UnsafeCell::new(value),
        }
    }

    pub fn lock(&self, signal: &Signal) -> Result<InterruptibleMutexGuard<'_, T>, FifoError> {
        self.gate.acquire(signal)?;
        Ok(InterruptibleMutexGuard { mutex: self })
    }

    pub fn lock_uninterruptible(&self) -> InterruptibleMutexGuard<'_, T> {
        self.gate.acquire_uninterruptible();
        InterruptibleMutexGuard { mutex: self }
    }

    pub fn try_lock(&self) -> Option<InterruptibleMutexGuard<'_, T>> {
        if self.gate.try_acquire() {
            Some(InterruptibleMutexGuard { mutex: self })
        } else {
            None
        }
    }

    pub fn is_locked(&self) -> bool {
        self.gate.available() == 0
    }

    /// Exclusive access without locking; the borrow checker proves no guard exists.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

pub struct InterruptibleMutexGuard<'a, T> {
    mutex: &'a InterruptibleMutex<T>,
}

impl<T> Deref for InterruptibleMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // Safety: the guard owns the only permit of the gate.
        unsafe { &*self.mutex.value.get() }
    }
}

impl<T> DerefMut for InterruptibleMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the guard owns the only permit of the gate.
        unsafe { &mut *self.mutex.value.get() }
    }
}

impl<T> Drop for InterruptibleMutexGuard<'_, T> {
    fn drop(&mut self) {
        self.mutex.gate.release();
    }
}
