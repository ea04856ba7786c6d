use crate::Core::semaphore::Semaphore;
use crate::FIFO::Buffer::RingBuffer;
use crate::FIFO::Fifo;
use std::fmt;

// Debug proxy implementations that call the standalone debug functions
impl fmt::Debug for Fifo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_fifo(self, f)
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_ring_buffer(self, f)
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::Debug::StructDebug::debug_semaphore(self, f)
    }
}
