use scull_fifo::Core::alloc::{allocate_region, allocate_ring, release_ring};
use scull_fifo::FIFO::Buffer::{RingBuffer, SlotHeader, SlotLayout};
use scull_fifo::{FifoError, TransferFault, UserSource};

struct UnreadableSource;

impl UserSource for UnreadableSource {
    fn copy_in(&self, _dst: &mut [u8]) -> Result<(), TransferFault> {
        Err(TransferFault)
    }
}

#[test]
fn simple_produce_consume() {
    let mut ring = allocate_ring(4, 16).unwrap();
    assert_eq!(ring.capacity(), 4);
    assert_eq!(ring.elem_size(), 16);
    assert_eq!(ring.slot_stride(), SlotHeader::SIZE + 16);
    assert_eq!(ring.region_len(), 4 * (SlotHeader::SIZE + 16));

    let payload = vec![1u8, 2, 3, 4];
    assert_eq!(ring.produce(&payload, payload.len()), Ok(4));
    assert_eq!(ring.tail(), 1);
    assert_eq!(ring.slot_len(0), 4);
    assert_eq!(ring.peek(0), Some(&payload[..]));

    let mut out = Vec::new();
    assert_eq!(ring.consume(&mut out, 16), Ok(4));
    assert_eq!(out, payload);
    assert_eq!(ring.head(), 1);
}

#[test]
fn cursors_wrap_around() {
    let mut ring = allocate_ring(3, 4).unwrap();
    let mut out = Vec::new();

    for i in 0..10u8 {
        ring.produce(&[i], 1).unwrap();
        ring.consume(&mut out, 4).unwrap();
        assert_eq!(out, [i]);
    }
    // 10 mod 3
    assert_eq!(ring.head(), 1);
    assert_eq!(ring.tail(), 1);
}

#[test]
fn produce_clamps_to_elem_size() {
    let mut ring = allocate_ring(2, 4).unwrap();
    assert_eq!(ring.produce("abcdefgh", 8), Ok(4));
    assert_eq!(ring.slot_len(0), 4);
    assert_eq!(ring.peek(0), Some(&b"abcd"[..]));
}

#[test]
fn consume_takes_min_of_request_and_record() {
    let mut ring = allocate_ring(2, 8).unwrap();
    ring.produce("abcdef", 6).unwrap();

    let mut out = [0u8; 8];
    assert_eq!(ring.consume(&mut out, 3), Ok(3));
    assert_eq!(&out[..3], b"abc");
    assert_eq!(ring.head(), 1);
}

#[test]
fn fault_leaves_cursors_and_header() {
    let mut ring = allocate_ring(2, 8).unwrap();
    ring.produce("old", 3).unwrap();
    ring.consume(&mut Vec::<u8>::new(), 8).unwrap();
    ring.produce("xy", 2).unwrap();
    ring.produce("zz", 2).unwrap();
    assert_eq!(ring.tail(), 1);

    assert_eq!(ring.produce(&UnreadableSource, 5), Err(FifoError::Fault));
    assert_eq!(ring.tail(), 1);
    assert_eq!(ring.slot_len(1), 2);

    let mut tiny = [0u8; 1];
    assert_eq!(ring.consume(&mut tiny, 8), Err(FifoError::Fault));
    assert_eq!(ring.head(), 1);
}

#[test]
fn from_region_checks_geometry() {
    let layout = SlotLayout::new(8).unwrap();
    let region = allocate_region(&layout, 3).unwrap();
    assert_eq!(region.len(), 3 * layout.stride());
    assert!(RingBuffer::from_region(region, layout, 3).is_ok());

    let region = allocate_region(&layout, 3).unwrap();
    assert!(matches!(
        RingBuffer::from_region(region, layout, 4),
        Err(FifoError::InvalidRequest(_))
    ));

    assert!(matches!(
        RingBuffer::from_region(Box::default(), layout, 0),
        Err(FifoError::InvalidRequest(_))
    ));
}

#[test]
fn release_is_idempotent() {
    let mut ring = allocate_ring(2, 8).unwrap();
    release_ring(&mut ring);
    assert!(ring.is_released());
    assert_eq!(ring.peek(0), None);
    release_ring(&mut ring);
    assert!(ring.is_released());
    println!("Released ring: {ring:?}");
}
