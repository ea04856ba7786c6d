//! A bounded, blocking, interruptible record queue shared between any number
//! of producer and consumer threads, with a C ABI for foreign callers.

pub mod error;
pub mod ffi;
pub mod trace;

// Module naming follows project convention (FIFO = the record queue itself)
#[allow(non_snake_case)]
pub mod FIFO;

#[allow(non_snake_case)]
pub mod Core;

#[allow(non_snake_case)]
pub mod Debug {
    pub mod StructDebug;
}

pub use error::{FifoError, TransferFault};
pub use Core::Signal;
pub use FIFO::Structs::FifoStats;
pub use FIFO::{Fifo, FifoBuilder, UserSink, UserSource};
