// Interruption tokens for blocking waits.

use super::semaphore::Gate;
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct SignalInner {
    raised: AtomicBool,
    /// Gates that a waiter holding this signal is currently parked on.
    parked: Mutex<Vec<Arc<Gate>>>,
}

/// A cancellation token for blocking queue operations.
///
/// Every blocking acquire takes a `Signal`. Raising it wakes all waits
/// registered with it and makes them return [`FifoError::Interrupted`]
/// without consuming a permit. Clones share the same state, so one signal
/// can cancel several threads at once (e.g. from a Ctrl+C handler or a
/// caller-side timeout thread).
///
/// [`FifoError::Interrupted`]: crate::FifoError::Interrupted
#[derive(Clone)]
pub struct Signal {
    inner: Arc<SignalInner>,
}

impl Signal {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SignalInner {
                raised: AtomicBool::new(false),
                parked: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Interrupt every wait currently parked on this signal, and every
    /// future wait until [`clear`](Self::clear) is called.
    pub fn raise(&self) {
        self.inner.raised.store(true, Ordering::SeqCst);

        // Waiters never hold a gate lock while touching `parked`,
        // so taking both here cannot deadlock.
        let parked = self.inner.parked.lock();
        for gate in parked.iter() {
            gate.wake_all();
        }
    }

    /// Re-arm the signal after it has been raised.
    pub fn clear(&self) {
        self.inner.raised.store(false, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::SeqCst)
    }

    /// Register `gate` as the wait target until the returned guard drops.
    ///
    /// Must be called before the waiter checks `is_raised` under the gate
    /// lock, otherwise a concurrent `raise` can be missed.
    pub(crate) fn park(&self, gate: &Arc<Gate>) -> Parked<'_> {
        self.inner.parked.lock().push(Arc::clone(gate));
        Parked {
            signal: self,
            gate: Arc::clone(gate),
        }
    }

    /// Number of waits currently registered with this signal.
    pub fn parked_waiters(&self) -> usize {
        self.inner.parked.lock().len()
    }
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("raised", &self.is_raised())
            .field("parked", &self.parked_waiters())
            .finish()
    }
}

/// Registration of one parked wait; unregisters on drop.
pub(crate) struct Parked<'a> {
    signal: &'a Signal,
    gate: Arc<Gate>,
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        let mut parked = self.signal.inner.parked.lock();
        if let Some(pos) = parked.iter().position(|g| Arc::ptr_eq(g, &self.gate)) {
            parked.swap_remove(pos);
        }
    }
}
