//! Byte-oriented Huffman coding: tree construction with fair tie-breaking,
//! the two header layouts (explicit counts vs. serialized tree shape), and
//! the streaming encode/decode loops.

pub mod decoder;
pub mod encoder;
pub mod node_queue;
pub mod tree;

use std::fmt;

/// Width of one input symbol in bits.
pub const BITS_PER_WORD: usize = 8;
/// Width of the magic number, the format selector, each stored count and the
/// tree-description length field.
pub const BITS_PER_INT: usize = 32;
/// Number of real symbols.
pub const ALPH_SIZE: usize = 1 << BITS_PER_WORD;
/// Sentinel symbol marking the end of the encoded body. One past the real
/// alphabet, always assigned frequency 1, never present in raw input.
pub const PSEUDO_EOF: usize = ALPH_SIZE;
/// Leading constant of every compressed stream.
pub const MAGIC_NUMBER: u32 = 0xface8200;
/// Format selector for a header carrying the full frequency table.
pub const STORE_COUNTS: u32 = 1;
/// Format selector for a header carrying the serialized tree shape.
pub const STORE_TREE: u32 = 2;

/// Symbol value: a byte value in `0..ALPH_SIZE`, or [`PSEUDO_EOF`].
pub type Symbol = u16;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum HeaderFormat {
    Counts,
    Tree,
}

impl HeaderFormat {
    pub fn code(&self) -> u32 {
        match self {
            HeaderFormat::Counts => STORE_COUNTS,
            HeaderFormat::Tree => STORE_TREE,
        }
    }
}

impl TryFrom<u64> for HeaderFormat {
    type Error = HuffError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            v if v == STORE_COUNTS as u64 => Ok(HeaderFormat::Counts),
            v if v == STORE_TREE as u64 => Ok(HeaderFormat::Tree),
            v => Err(HuffError::BadHeaderFormat(v)),
        }
    }
}

/// Data-format failures: everything a corrupt or truncated input can cause.
/// Programmer errors (wrong call order, missing codes) panic instead.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum HuffError {
    /// The stream did not start with [`MAGIC_NUMBER`].
    BadMagic,
    /// The format selector was neither [`STORE_COUNTS`] nor [`STORE_TREE`].
    BadHeaderFormat(u64),
    /// The stream ended before the expected data was complete.
    UnexpectedEof,
    /// The serialized tree description is structurally invalid.
    MalformedHeader,
}

impl fmt::Display for HuffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffError::BadMagic => {
                write!(f, "file did not start with the huff magic number")
            }
            HuffError::BadHeaderFormat(v) => {
                write!(f, "header format value {} is invalid", v)
            }
            HuffError::UnexpectedEof => write!(f, "unexpected end of input"),
            HuffError::MalformedHeader => write!(f, "malformed tree header"),
        }
    }
}

impl std::error::Error for HuffError {}
