use log::debug;

use crate::bitstreams::BinaryReader;
use crate::huffman::tree::{HuffNode, HuffmanTree};
use crate::huffman::{
    HeaderFormat, HuffError, ALPH_SIZE, BITS_PER_INT, BITS_PER_WORD, MAGIC_NUMBER, PSEUDO_EOF,
};
use crate::StatusSink;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum DecoderState {
    AwaitingHeader,
    Decoding,
    Done,
    Failed,
}

/// Decoder for one compressed stream. Parsing the header rebuilds the tree
/// and moves the state machine from `AwaitingHeader` to `Decoding`; the
/// decode loop then walks the tree one bit per step until the sentinel leaf
/// moves it to `Done`. Any data-format problem moves it to `Failed`, reports
/// through the sink and returns an error; no partial header state leaks.
pub struct HuffmanDecoder {
    tree: Option<HuffmanTree>,
    state: DecoderState,
}

impl Default for HuffmanDecoder {
    fn default() -> Self {
        HuffmanDecoder {
            tree: None,
            state: DecoderState::AwaitingHeader,
        }
    }
}

impl HuffmanDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// The tree reconstructed from the header, once parsing succeeded.
    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    /// Parses magic number, format selector and header payload, rebuilding
    /// the Huffman tree. On success the decoder is ready for [`decode`].
    ///
    /// [`decode`]: Self::decode
    pub fn read_header(
        &mut self,
        reader: &mut BinaryReader,
        sink: &mut dyn StatusSink,
    ) -> Result<HeaderFormat, HuffError> {
        assert_eq!(
            self.state,
            DecoderState::AwaitingHeader,
            "read_header called on a decoder that already consumed a header"
        );

        let magic = match reader.read_int(BITS_PER_INT as u64) {
            Some(v) => v,
            None => return Err(self.fail(sink, HuffError::UnexpectedEof)),
        };
        if magic != MAGIC_NUMBER as u64 {
            return Err(self.fail(sink, HuffError::BadMagic));
        }

        let format = match reader.read_int(BITS_PER_INT as u64) {
            Some(v) => v,
            None => return Err(self.fail(sink, HuffError::UnexpectedEof)),
        };
        let format = match HeaderFormat::try_from(format) {
            Ok(f) => f,
            Err(e) => return Err(self.fail(sink, e)),
        };

        let tree = match format {
            HeaderFormat::Counts => self.read_counts_payload(reader),
            HeaderFormat::Tree => self.read_tree_payload(reader),
        };
        match tree {
            Ok(tree) => {
                debug!("Header parsed ({:?}), tree rebuilt", format);
                self.tree = Some(tree);
                self.state = DecoderState::Decoding;
                Ok(format)
            }
            Err(e) => Err(self.fail(sink, e)),
        }
    }

    /// Reads `ALPH_SIZE` fixed-width counts, forces the sentinel entry to 1
    /// and rebuilds the tree from frequencies. Counts are taken at face
    /// value; only a truncated table is rejected.
    fn read_counts_payload(&mut self, reader: &mut BinaryReader) -> Result<HuffmanTree, HuffError> {
        let mut freqs = vec![0u64; ALPH_SIZE + 1];
        for freq in freqs.iter_mut().take(ALPH_SIZE) {
            *freq = reader
                .read_int(BITS_PER_INT as u64)
                .ok_or(HuffError::UnexpectedEof)?;
        }
        freqs[PSEUDO_EOF] = 1;
        Ok(HuffmanTree::from_frequencies(&freqs))
    }

    /// Reads the declared bit length, then exactly that many preorder bits,
    /// and rebuilds the tree shape. The declared length must be positive and
    /// must be consumed exactly.
    fn read_tree_payload(&mut self, reader: &mut BinaryReader) -> Result<HuffmanTree, HuffError> {
        let size = reader
            .read_int(BITS_PER_INT as u64)
            .ok_or(HuffError::UnexpectedEof)?;
        if size == 0 {
            return Err(HuffError::MalformedHeader);
        }

        let mut bits = Vec::with_capacity(size as usize);
        for _ in 0..size {
            bits.push(reader.read_int(1).ok_or(HuffError::UnexpectedEof)? as u8);
        }

        HuffmanTree::rebuild(&bits)
    }

    /// Decodes the body: walks from the root one bit at a time (0 = left,
    /// 1 = right), emits a byte at every non-sentinel leaf and stops at the
    /// sentinel. Returns the decoded size in bits (`BITS_PER_WORD` per byte
    /// written, not the count of compressed bits consumed).
    ///
    /// Panics unless a header was parsed successfully first.
    pub fn decode(
        &mut self,
        reader: &mut BinaryReader,
        out: &mut Vec<u8>,
        sink: &mut dyn StatusSink,
    ) -> Result<u64, HuffError> {
        assert_eq!(
            self.state,
            DecoderState::Decoding,
            "decode called before a successful read_header"
        );

        let tree = self.tree.as_ref().expect("Decoding state implies a tree");
        let result = Self::walk(tree, reader, out, sink);
        self.state = match result {
            Ok(_) => DecoderState::Done,
            Err(_) => DecoderState::Failed,
        };
        result
    }

    fn walk(
        tree: &HuffmanTree,
        reader: &mut BinaryReader,
        out: &mut Vec<u8>,
        sink: &mut dyn StatusSink,
    ) -> Result<u64, HuffError> {
        let root = tree.root();
        let mut node = root;
        let mut written = 0u64;

        loop {
            let bit = match reader.read_int(1) {
                Some(b) => b,
                None => {
                    // ran out of bits without ever reaching the sentinel leaf
                    sink.show_error(&format!(
                        "Error reading compressed file: {}",
                        HuffError::UnexpectedEof
                    ));
                    return Err(HuffError::UnexpectedEof);
                }
            };

            node = match node {
                HuffNode::Internal { left, right, .. } => {
                    if bit == 0 {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    }
                }
                // single-leaf tree: every bit resolves to the lone leaf
                HuffNode::Leaf { .. } => node,
            };

            if let HuffNode::Leaf { value, .. } = node {
                if *value as usize == PSEUDO_EOF {
                    debug!("Sentinel reached after {} decoded bits", written);
                    return Ok(written);
                }
                out.push(*value as u8);
                written += BITS_PER_WORD as u64;
                node = root;
            }
        }
    }

    fn fail(&mut self, sink: &mut dyn StatusSink, err: HuffError) -> HuffError {
        self.state = DecoderState::Failed;
        sink.show_error(&format!("Error reading compressed file: {}", err));
        err
    }
}
