use super::{BinaryReader, BinaryWriterBuilder};

#[test]
fn test_push_bits_layout_is_msb_first() {
    let mut writer = BinaryWriterBuilder::new();

    writer.push_bits(0xface8200, 32);

    let built = writer.build();
    assert_eq!(built.os.as_ref(), &[0xfa, 0xce, 0x82, 0x00]);
}

#[test]
fn test_partial_byte_is_zero_padded_on_build() {
    let mut writer = BinaryWriterBuilder::new();

    writer.push_bits(0b111, 3);

    let built = writer.build();
    assert_eq!(built.os.as_ref(), &[0b1110_0000]);
}

#[test]
fn test_empty_writer_builds_empty_buffer() {
    let writer = BinaryWriterBuilder::new();
    assert_eq!(writer.build().os.len(), 0);
}

#[test]
fn test_written_bits_accounting() {
    let mut writer = BinaryWriterBuilder::new();

    writer.push_bits(1, 1);
    writer.push_bits(0x1ff, 9);
    writer.push_bits(12345, 32);

    assert_eq!(writer.written_bits, 42);
}

#[test]
fn test_write_read_round_trip_mixed_widths() {
    let values = [
        (0u64, 1u64),
        (1, 1),
        (0b101, 3),
        (256, 9),
        (0xface8200, 32),
        (0, 32),
        (u64::MAX, 64),
        (123_456_789_012, 40),
    ];

    let mut writer = BinaryWriterBuilder::new();
    for &(x, len) in values.iter() {
        writer.push_bits(x, len);
    }

    let mut reader = BinaryReader::new(writer.build().os);
    for &(x, len) in values.iter() {
        assert_eq!(reader.read_int(len), Some(x));
    }
}

#[test]
fn test_read_across_byte_boundaries() {
    let mut writer = BinaryWriterBuilder::new();
    for x in 0..100u64 {
        writer.push_bits(x, 9);
    }

    let mut reader = BinaryReader::new(writer.build().os);
    for x in 0..100u64 {
        assert_eq!(reader.read_int(9), Some(x));
    }
    assert_eq!(reader.read_bits, 900);
}

#[test]
fn test_read_int_returns_none_at_end_of_stream() {
    let mut reader = BinaryReader::new(vec![0xab].into_boxed_slice());

    assert_eq!(reader.read_int(8), Some(0xab));
    assert_eq!(reader.read_int(1), None);
}

#[test]
fn test_read_int_none_when_value_is_cut_short() {
    let mut reader = BinaryReader::new(vec![0xff, 0xff].into_boxed_slice());

    // 17 bits requested but only 16 available
    assert_eq!(reader.read_int(17), None);
}

#[test]
fn test_single_bits_round_trip() {
    let bits = [1u64, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1];

    let mut writer = BinaryWriterBuilder::new();
    for &b in bits.iter() {
        writer.push_bits(b, 1);
    }

    let mut reader = BinaryReader::new(writer.build().os);
    for &b in bits.iter() {
        assert_eq!(reader.read_int(1), Some(b));
    }
}
