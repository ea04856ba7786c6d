mod builder;
mod queue;
pub mod transfer;

pub use builder::{FifoBuilder, ENV_FIFO_ELEMSZ, ENV_FIFO_SIZE};
pub use queue::Fifo;
pub use transfer::{UserSink, UserSource};

pub mod Buffer {
    pub mod Buffer;
    pub mod Buffer_impl;
    pub mod layout;
    pub use Buffer::{RingBuffer, FIFO_ELEMSZ_DEFAULT, FIFO_SIZE_DEFAULT}; // re-export for stable path
    pub use layout::{SlotHeader, SlotLayout};
}

pub mod Structs {
    pub mod Fifo_Structs;
    pub use Fifo_Structs::FifoStats; // re-export for stable path
}
