use super::{CompressOutcome, HuffProcessor};
use crate::huffman::{HeaderFormat, HuffError};
use crate::NoopSink;

fn compress_forced(input: &[u8], format: HeaderFormat) -> (Box<[u8]>, u64) {
    let mut processor = HuffProcessor::new();
    processor.preprocess_compress(input, format);

    match processor.compress(input, true, &mut NoopSink) {
        CompressOutcome::Written { data, bits } => (data, bits),
        CompressOutcome::Declined => panic!("forced compression must not decline"),
    }
}

#[test]
fn test_preprocess_reports_bits_saved() {
    let input = vec![b'a'; 4000];

    let mut processor = HuffProcessor::new();
    let saved = processor.preprocess_compress(&input, HeaderFormat::Tree);

    assert_eq!(
        saved,
        processor.original_bits() as i64 - processor.estimated_bits() as i64
    );
    assert!(saved > 0);
}

#[test]
fn test_estimate_equals_written_bits() {
    let input = b"estimates must be exact, not approximate";

    for format in [HeaderFormat::Counts, HeaderFormat::Tree] {
        let mut processor = HuffProcessor::new();
        processor.preprocess_compress(input, format);

        let (_, bits) = match processor.compress(input, true, &mut NoopSink) {
            CompressOutcome::Written { data, bits } => (data, bits),
            CompressOutcome::Declined => panic!("forced compression must not decline"),
        };
        assert_eq!(bits as usize, processor.estimated_bits());
    }
}

#[test]
fn test_declines_when_output_would_grow() {
    // far too small for the header to ever pay off
    let input = b"ab";

    let mut processor = HuffProcessor::new();
    let saved = processor.preprocess_compress(input, HeaderFormat::Counts);
    assert!(saved < 0);

    assert!(matches!(
        processor.compress(input, false, &mut NoopSink),
        CompressOutcome::Declined
    ));
    // force overrides the policy
    assert!(matches!(
        processor.compress(input, true, &mut NoopSink),
        CompressOutcome::Written { .. }
    ));
}

#[test]
fn test_round_trip_through_processor() {
    let input = b"workflow round trip: preprocess, compress, uncompress";

    for format in [HeaderFormat::Counts, HeaderFormat::Tree] {
        let (data, _) = compress_forced(input, format);

        let processor = HuffProcessor::new();
        let (decoded, bits) = processor.uncompress(&data, &mut NoopSink).unwrap();
        assert_eq!(decoded, input);
        assert_eq!(bits, input.len() as u64 * 8);
    }
}

#[test]
fn test_tree_header_smaller_for_sparse_alphabet() {
    // 2 distinct byte values: the 256-entry count table dwarfs the tree shape
    let mut input = vec![b'a'; 500];
    input.extend(vec![b'b'; 500]);

    let mut counts_processor = HuffProcessor::new();
    counts_processor.preprocess_compress(&input, HeaderFormat::Counts);
    let mut tree_processor = HuffProcessor::new();
    tree_processor.preprocess_compress(&input, HeaderFormat::Tree);

    assert!(tree_processor.estimated_bits() < counts_processor.estimated_bits());

    for format in [HeaderFormat::Counts, HeaderFormat::Tree] {
        let (data, _) = compress_forced(&input, format);
        let processor = HuffProcessor::new();
        let (decoded, _) = processor.uncompress(&data, &mut NoopSink).unwrap();
        assert_eq!(decoded, input);
    }
}

#[test]
fn test_empty_input_round_trip() {
    let (data, _) = compress_forced(b"", HeaderFormat::Tree);

    let processor = HuffProcessor::new();
    let (decoded, bits) = processor.uncompress(&data, &mut NoopSink).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(bits, 0);
}

#[test]
fn test_uncompress_rejects_garbage() {
    let processor = HuffProcessor::new();

    assert_eq!(
        processor.uncompress(b"not a huff file at all", &mut NoopSink),
        Err(HuffError::BadMagic)
    );
}

#[test]
#[should_panic(expected = "preprocess_compress must be called before compress")]
fn test_compress_before_preprocess_panics() {
    let processor = HuffProcessor::new();
    processor.compress(b"data", true, &mut NoopSink);
}
