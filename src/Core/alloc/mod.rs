// Allocation and release of the ring region.

use crate::error::FifoError;
use crate::trace;
use crate::FIFO::Buffer::layout::SlotLayout;
use crate::FIFO::Buffer::RingBuffer;
mod debug;

/// Allocate a zeroed region for `capacity` slots of `layout`.
///
/// Both an unrepresentable size and an allocator refusal are reported as
/// `AllocationFailed`; nothing is left allocated on failure.
pub fn allocate_region(layout: &SlotLayout, capacity: usize) -> Result<Box<[u8]>, FifoError> {
    let bytes = layout
        .region_size(capacity)
        .ok_or(FifoError::AllocationFailed { bytes: usize::MAX })?;

    let mut region: Vec<u8> = Vec::new();
    region
        .try_reserve_exact(bytes)
        .map_err(|_| FifoError::AllocationFailed { bytes })?;
    region.resize(bytes, 0);

    Ok(region.into_boxed_slice())
}

/// Allocate and initialize a ring of `capacity` slots, each holding up to
/// `elem_size` payload bytes. Cursors start at slot 0.
pub fn allocate_ring(capacity: usize, elem_size: usize) -> Result<RingBuffer, FifoError> {
    if capacity == 0 {
        return Err(FifoError::InvalidRequest(
            "FIFO size must be greater than zero".into(),
        ));
    }

    let layout =
        SlotLayout::new(elem_size).ok_or(FifoError::AllocationFailed { bytes: usize::MAX })?;
    let region = allocate_region(&layout, capacity).map_err(|e| {
        trace::warn!(capacity, elem_size, error = %e, "scull: failed to allocate FIFO buffer");
        e
    })?;

    RingBuffer::from_region(region, layout, capacity)
}

/// Release the ring region. Safe on a ring that was already released.
pub fn release_ring(ring: &mut RingBuffer) {
    if !ring.is_released() {
        trace::debug!(bytes = ring.region_len(), "scull: releasing FIFO buffer");
        ring.release_region();
    }
}
