pub mod alloc;
pub mod lock;
pub mod semaphore;
pub mod signal;
pub mod sync;

pub use lock::{InterruptibleMutex, InterruptibleMutexGuard};
pub use semaphore::Semaphore;
pub use signal::Signal;
pub use sync::SyncCore;
