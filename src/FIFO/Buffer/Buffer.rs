// Circular record storage for the FIFO - one contiguous byte region split
// into fixed-size slots.

use super::layout::SlotLayout;

/// Default number of slots.
pub const FIFO_SIZE_DEFAULT: usize = 10;

/// Default maximum record payload, in bytes.
pub const FIFO_ELEMSZ_DEFAULT: usize = 4000;

/// Fixed-capacity ring of length-prefixed record slots.
///
/// This struct holds no synchronization of its own. Which slots are filled
/// is implied by the cursors together with the semaphore counts kept by the
/// owning queue; the slots themselves carry no state flag.
///
/// ### Layout:
/// - `region` is `capacity * layout.stride()` bytes.
/// - Slot `k` is a [`SlotHeader`](super::SlotHeader) followed by
///   `elem_size` payload bytes.
/// - `head` is the next slot to consume, `tail` the next slot to produce
///   into; both advance by one modulo `capacity`.
pub struct RingBuffer {
    pub(crate) region: Box<[u8]>,

    pub(crate) layout: SlotLayout,

    /// Number of slots.
    pub(crate) capacity: usize,

    pub(crate) head: usize,

    pub(crate) tail: usize,
}
