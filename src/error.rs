// Error taxonomy shared by the queue, its lifecycle and the C ABI.

use std::io;
use thiserror::Error;

/// Errors returned by queue operations and construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FifoError {
    /// A blocking acquire was cancelled before the resource was granted.
    /// No counter or cursor was touched; the call may be retried.
    #[error("operation interrupted while waiting")]
    Interrupted,

    /// The caller's buffer could not be read from or written to.
    /// The permit taken for the call has been returned.
    #[error("bad address: user buffer transfer failed")]
    Fault,

    /// The ring region could not be allocated.
    #[error("failed to allocate FIFO buffer ({bytes} bytes requested)")]
    AllocationFailed { bytes: usize },

    /// Construction parameters were rejected.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl FifoError {
    /// Negative errno for this error, as returned across the C ABI.
    pub fn errno(&self) -> i32 {
        match self {
            FifoError::Interrupted => -libc::EINTR,
            FifoError::Fault => -libc::EFAULT,
            FifoError::AllocationFailed { .. } => -libc::ENOMEM,
            FifoError::InvalidRequest(_) => -libc::EINVAL,
        }
    }

    /// True for the two conditions that leave the queue untouched and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FifoError::Interrupted | FifoError::Fault)
    }
}

impl From<FifoError> for io::Error {
    fn from(err: FifoError) -> Self {
        let kind = match err {
            FifoError::Interrupted => io::ErrorKind::Interrupted,
            FifoError::Fault => io::ErrorKind::InvalidData,
            FifoError::AllocationFailed { .. } => io::ErrorKind::OutOfMemory,
            FifoError::InvalidRequest(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

/// A failed `copy_in`/`copy_out` on a user buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user buffer is not accessible for the requested length")]
pub struct TransferFault;

impl From<TransferFault> for FifoError {
    fn from(_: TransferFault) -> Self {
        FifoError::Fault
    }
}
