// Layout conformance tests for the slot format.
// These tests assert the header size and offsets, and the slot geometry
// derived from them. They also print the observed values to aid debugging
// when a mismatch occurs on a given platform.
use memoffset::offset_of;
use scull_fifo::FIFO::Buffer::{SlotHeader, SlotLayout};
use std::mem::{align_of, size_of};

#[test]
fn test_slot_header_layout() {
    let size = size_of::<SlotHeader>();
    let align = align_of::<SlotHeader>();
    let off_length = offset_of!(SlotHeader, length);

    println!("SlotHeader => size: {size}, align: {align}, offsets: [length:{off_length}]");

    assert_eq!(size, 8);
    assert_eq!(SlotHeader::SIZE, size);
    assert_eq!(align, align_of::<u64>());
    assert_eq!(off_length, 0);
}

#[test]
fn test_slot_header_is_little_endian() {
    let header = SlotHeader { length: 0x0102 };
    assert_eq!(header.encode(), [0x02, 0x01, 0, 0, 0, 0, 0, 0]);
    assert_eq!(SlotHeader::decode(&header.encode()), header);
}

#[test]
fn test_slot_geometry() {
    let layout = SlotLayout::new(4000).unwrap();
    assert_eq!(layout.elem_size(), 4000);
    assert_eq!(layout.stride(), 4008);
    assert_eq!(layout.region_size(10), Some(40080));

    assert_eq!(layout.header_range(0), 0..8);
    assert_eq!(layout.payload_range(0, 4000), 8..4008);
    assert_eq!(layout.header_range(3), 3 * 4008..3 * 4008 + 8);
    assert_eq!(layout.payload_range(3, 5), 3 * 4008 + 8..3 * 4008 + 13);
}

#[test]
fn test_slot_geometry_overflow() {
    assert!(SlotLayout::new(usize::MAX).is_none());

    let layout = SlotLayout::new(4000).unwrap();
    assert_eq!(layout.region_size(usize::MAX), None);
}
