use log::debug;

use crate::bitstreams::BinaryWriterBuilder;
use crate::huffman::tree::HuffmanTree;
use crate::huffman::{
    HeaderFormat, ALPH_SIZE, BITS_PER_INT, BITS_PER_WORD, MAGIC_NUMBER, PSEUDO_EOF,
};

/// Counts byte occurrences into a table of length `ALPH_SIZE + 1` with the
/// sentinel entry forced to 1.
pub fn count_frequencies(input: &[u8]) -> Vec<u64> {
    let mut freqs = vec![0u64; ALPH_SIZE + 1];
    for &b in input {
        freqs[b as usize] += 1;
    }
    freqs[PSEUDO_EOF] = 1;
    freqs
}

/// Encoder for one frequency distribution: owns the tree and the code table
/// and emits the full compressed stream (header, body, sentinel code).
pub struct HuffmanEncoder {
    freqs: Vec<u64>,
    tree: HuffmanTree,
    codes: Vec<Option<Box<[u8]>>>,
    format: HeaderFormat,
}

impl HuffmanEncoder {
    /// Builds the tree and code table for `freqs` (length `ALPH_SIZE + 1`,
    /// sentinel entry equal to 1; violations panic).
    pub fn new(freqs: Vec<u64>, format: HeaderFormat) -> Self {
        let tree = HuffmanTree::from_frequencies(&freqs);
        let codes = tree.make_codes();

        debug!(
            "Built encoder over {} distinct symbols ({:?} header)",
            freqs.iter().filter(|&&f| f > 0).count(),
            format
        );

        HuffmanEncoder {
            freqs,
            tree,
            codes,
            format,
        }
    }

    /// Convenience constructor counting frequencies from the input itself.
    pub fn from_input(input: &[u8], format: HeaderFormat) -> Self {
        Self::new(count_frequencies(input), format)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &[Option<Box<[u8]>>] {
        &self.codes
    }

    pub fn format(&self) -> HeaderFormat {
        self.format
    }

    /// Bits the magic number, format selector and header payload occupy.
    pub fn header_bits(&self) -> usize {
        BITS_PER_INT * 2 + self.header_payload_bits()
    }

    fn header_payload_bits(&self) -> usize {
        match self.format {
            HeaderFormat::Counts => ALPH_SIZE * BITS_PER_INT,
            HeaderFormat::Tree => BITS_PER_INT + self.tree.tree_bits(),
        }
    }

    /// Bits the encoded body occupies: one code per input occurrence plus
    /// the sentinel code that terminates the stream.
    pub fn body_bits(&self) -> usize {
        let mut bits = 0;
        for value in 0..ALPH_SIZE {
            if let Some(code) = &self.codes[value] {
                bits += self.freqs[value] as usize * code.len();
            }
        }
        bits + self.code(PSEUDO_EOF).len()
    }

    /// Exact size of the compressed stream in bits.
    pub fn total_bits(&self) -> usize {
        self.header_bits() + self.body_bits()
    }

    /// Writes header, one code per input byte, then the sentinel code.
    /// Returns the number of bits written, which always equals
    /// [`total_bits`](Self::total_bits) when the tree was built from this
    /// input's frequencies.
    pub fn encode(&self, input: &[u8], writer: &mut BinaryWriterBuilder) -> u64 {
        let mut bits = self.write_header(writer);

        for &b in input {
            bits += self.write_code(b as usize, writer);
        }
        bits += self.write_code(PSEUDO_EOF, writer);

        debug!("Encoded {} bytes into {} bits", input.len(), bits);
        bits
    }

    fn write_header(&self, writer: &mut BinaryWriterBuilder) -> u64 {
        let mut bits = writer.push_bits(MAGIC_NUMBER as u64, BITS_PER_INT as u64);
        bits += writer.push_bits(self.format.code() as u64, BITS_PER_INT as u64);

        match self.format {
            HeaderFormat::Counts => {
                // one fixed-width count per real symbol, sentinel excluded
                for value in 0..ALPH_SIZE {
                    bits += writer.push_bits(self.freqs[value], BITS_PER_INT as u64);
                }
            }
            HeaderFormat::Tree => {
                bits += writer.push_bits(self.tree.tree_bits() as u64, BITS_PER_INT as u64);
                bits += self.tree.write_tree(writer);
            }
        }

        bits
    }

    fn write_code(&self, value: usize, writer: &mut BinaryWriterBuilder) -> u64 {
        let code = self.code(value);
        for &bit in code.iter() {
            writer.push_bits(bit as u64, 1);
        }
        code.len() as u64
    }

    #[inline(always)]
    fn code(&self, value: usize) -> &[u8] {
        self.codes[value]
            .as_deref()
            .unwrap_or_else(|| panic!("Missing Huffman code for symbol {}", value))
    }
}

/// Uncompressed size of the input in bits.
pub fn original_bits(input: &[u8]) -> usize {
    input.len() * BITS_PER_WORD
}
