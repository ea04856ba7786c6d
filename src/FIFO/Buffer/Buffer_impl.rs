use super::layout::{SlotHeader, SlotLayout};
use super::Buffer::RingBuffer;
use crate::error::FifoError;
use crate::FIFO::transfer::{UserSink, UserSource};

impl RingBuffer {
    /// Build a ring over an already allocated region.
    ///
    /// The region must be exactly `capacity * layout.stride()` bytes and
    /// `capacity` must be non-zero. Cursors start at slot 0.
    pub fn from_region(
        region: Box<[u8]>,
        layout: SlotLayout,
        capacity: usize,
    ) -> Result<Self, FifoError> {
        if capacity == 0 {
            return Err(FifoError::InvalidRequest(
                "ring capacity must be greater than zero".into(),
            ));
        }
        if layout.region_size(capacity) != Some(region.len()) {
            return Err(FifoError::InvalidRequest(format!(
                "region of {} bytes does not fit {} slots of {} bytes",
                region.len(),
                capacity,
                layout.stride()
            )));
        }
        Ok(Self {
            region,
            layout,
            capacity,
            head: 0,
            tail: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn elem_size(&self) -> usize {
        self.layout.elem_size()
    }

    /// Size in bytes of one slot stride in the region.
    #[inline]
    pub fn slot_stride(&self) -> usize {
        self.layout.stride()
    }

    /// Index of the next slot to consume.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Index of the next slot to produce into.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Bytes currently backing the ring; zero once released.
    pub fn region_len(&self) -> usize {
        self.region.len()
    }

    pub fn is_released(&self) -> bool {
        self.region.is_empty()
    }

    #[inline]
    fn next(&self, cursor: usize) -> usize {
        (cursor + 1) % self.capacity
    }

    /// Stored record length of slot `index`, clamped to `elem_size`.
    pub fn slot_len(&self, index: usize) -> usize {
        let range = self.layout.header_range(index);
        let mut bytes = [0u8; SlotHeader::SIZE];
        bytes.copy_from_slice(&self.region[range]);
        let length = SlotHeader::decode(&bytes).length;
        usize::try_from(length)
            .unwrap_or(usize::MAX)
            .min(self.elem_size())
    }

    fn set_slot_len(&mut self, index: usize, len: usize) {
        let range = self.layout.header_range(index);
        let header = SlotHeader { length: len as u64 };
        self.region[range].copy_from_slice(&header.encode());
    }

    /// Copy up to `elem_size` bytes from `src` into the tail slot and
    /// advance the tail.
    ///
    /// On a transfer fault the header and the tail are left as they were;
    /// the payload bytes of the free slot may have been partly overwritten.
    pub fn produce<S: UserSource + ?Sized>(
        &mut self,
        src: &S,
        len: usize,
    ) -> Result<usize, FifoError> {
        let len = len.min(self.elem_size());
        let index = self.tail;
        let range = self.layout.payload_range(index, len);
        src.copy_in(&mut self.region[range])?;

        self.set_slot_len(index, len);
        self.tail = self.next(index);
        Ok(len)
    }

    /// Copy at most `max_len` bytes of the head record into `dst` and
    /// advance the head. Bytes of the record beyond `max_len` are dropped.
    ///
    /// On a transfer fault the head is left as it was.
    pub fn consume<D: UserSink + ?Sized>(
        &mut self,
        dst: &mut D,
        max_len: usize,
    ) -> Result<usize, FifoError> {
        let index = self.head;
        let len = self.slot_len(index).min(max_len);
        let range = self.layout.payload_range(index, len);
        dst.copy_out(&self.region[range])?;

        self.head = self.next(index);
        Ok(len)
    }

    /// Payload of slot `index` as currently stored, without moving any cursor.
    /// `None` once the region has been released.
    pub fn peek(&self, index: usize) -> Option<&[u8]> {
        if self.is_released() {
            return None;
        }
        let index = index % self.capacity;
        let len = self.slot_len(index);
        self.region.get(self.layout.payload_range(index, len))
    }

    /// Drop the backing region. Safe to call more than once.
    pub(crate) fn release_region(&mut self) {
        self.region = Box::default();
        self.head = 0;
        self.tail = 0;
    }
}
