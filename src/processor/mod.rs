//! Compression workflow: preprocess (count, build, estimate), then compress
//! with a size-guard policy, or uncompress a previously compressed stream.

use log::{debug, info};

use crate::bitstreams::{BinaryReader, BinaryWriterBuilder};
use crate::huffman::decoder::HuffmanDecoder;
use crate::huffman::encoder::{count_frequencies, original_bits, HuffmanEncoder};
use crate::huffman::{HeaderFormat, HuffError};
use crate::StatusSink;

/// Result of a compress call: either the compressed bytes, or a refusal
/// because the output would not be smaller and `force` was not given. The
/// refusal is an expected policy outcome, not a data error.
pub enum CompressOutcome {
    Written { data: Box<[u8]>, bits: u64 },
    Declined,
}

struct Prepared {
    encoder: HuffmanEncoder,
    original_bits: usize,
    estimated_bits: usize,
}

/// Sequences preprocessing and compression. `preprocess_compress` must run
/// before `compress` (the original input is needed twice: once for counting,
/// once for emission); calling out of order is a programmer fault.
#[derive(Default)]
pub struct HuffProcessor {
    prepared: Option<Prepared>,
}

impl HuffProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts frequencies, builds tree and codes, and estimates the
    /// compressed size under `format`. Returns the projected saving in bits
    /// (negative when compression would grow the input).
    pub fn preprocess_compress(&mut self, input: &[u8], format: HeaderFormat) -> i64 {
        let encoder = HuffmanEncoder::new(count_frequencies(input), format);
        let original = original_bits(input);
        let estimated = encoder.total_bits();

        debug!(
            "Preprocessed {} bytes: {} bits estimated vs {} original",
            input.len(),
            estimated,
            original
        );

        self.prepared = Some(Prepared {
            encoder,
            original_bits: original,
            estimated_bits: estimated,
        });

        original as i64 - estimated as i64
    }

    /// Compresses `input`, which must be the same data that was
    /// preprocessed. Unless `force` is set, declines when the estimated
    /// output is not smaller than the original.
    pub fn compress(&self, input: &[u8], force: bool, sink: &mut dyn StatusSink) -> CompressOutcome {
        let prepared = self
            .prepared
            .as_ref()
            .expect("preprocess_compress must be called before compress");

        if !force && prepared.estimated_bits >= prepared.original_bits {
            sink.show_error("Compressed file would not be smaller. Use force to write anyway.");
            return CompressOutcome::Declined;
        }

        let mut writer = BinaryWriterBuilder::new();
        let bits = prepared.encoder.encode(input, &mut writer);
        info!("Compression wrote {} bits", bits);
        sink.show_status(&format!("Wrote {} bits of compressed data", bits));

        CompressOutcome::Written {
            data: writer.build().os,
            bits,
        }
    }

    /// Decompresses a full compressed stream. Returns the decoded bytes and
    /// the decoded size in bits.
    pub fn uncompress(
        &self,
        input: &[u8],
        sink: &mut dyn StatusSink,
    ) -> Result<(Vec<u8>, u64), HuffError> {
        let mut reader = BinaryReader::new(input.into());
        let mut decoder = HuffmanDecoder::new();

        decoder.read_header(&mut reader, sink)?;

        let mut out = Vec::new();
        let bits = decoder.decode(&mut reader, &mut out, sink)?;
        info!("Decompression produced {} bytes", out.len());
        sink.show_status(&format!("Decoded {} bytes", out.len()));

        Ok((out, bits))
    }

    /// Uncompressed size of the preprocessed input in bits.
    pub fn original_bits(&self) -> usize {
        self.prepared
            .as_ref()
            .expect("preprocess_compress must be called first")
            .original_bits
    }

    /// Estimated compressed size of the preprocessed input in bits.
    pub fn estimated_bits(&self) -> usize {
        self.prepared
            .as_ref()
            .expect("preprocess_compress must be called first")
            .estimated_bits
    }
}

#[cfg(test)]
mod tests;
