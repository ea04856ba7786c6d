use std::mem::size_of;
use std::ops::Range;

/// Header stored in front of every slot's payload.
///
/// Serialized little-endian at the start of the slot, so the region layout
/// does not depend on the host's alignment of the byte buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotHeader {
    /// Number of payload bytes holding the record. Never exceeds `elem_size`.
    pub length: u64,
}

impl SlotHeader {
    pub const SIZE: usize = size_of::<SlotHeader>();

    pub fn encode(&self) -> [u8; SlotHeader::SIZE] {
        self.length.to_le_bytes()
    }

    pub fn decode(bytes: &[u8; SlotHeader::SIZE]) -> Self {
        Self {
            length: u64::from_le_bytes(*bytes),
        }
    }
}

/// Byte geometry of one slot: a [`SlotHeader`] followed by `elem_size`
/// payload bytes. Slot `k` starts at `k * stride`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotLayout {
    elem_size: usize,
    stride: usize,
}

impl SlotLayout {
    /// Returns `None` if the stride is not representable.
    pub fn new(elem_size: usize) -> Option<Self> {
        let stride = SlotHeader::SIZE.checked_add(elem_size)?;
        Some(Self { elem_size, stride })
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        self.elem_size
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Total region size for `capacity` slots, or `None` on overflow.
    pub fn region_size(&self, capacity: usize) -> Option<usize> {
        capacity.checked_mul(self.stride)
    }

    #[inline]
    pub fn header_range(&self, index: usize) -> Range<usize> {
        let base = index * self.stride;
        base..base + SlotHeader::SIZE
    }

    /// The first `len` payload bytes of slot `index`. `len` must not exceed `elem_size`.
    #[inline]
    pub fn payload_range(&self, index: usize, len: usize) -> Range<usize> {
        debug_assert!(len <= self.elem_size);
        let start = index * self.stride + SlotHeader::SIZE;
        start..start + len
    }
}
