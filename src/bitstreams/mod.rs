//! Bit-granular reading and writing over in-memory byte buffers.
//!
//! Integers are packed MSB-first, so the bit order on the wire matches the
//! left-to-right order of the Huffman codes written through `push_bits`.

/// Frozen output of a [`BinaryWriterBuilder`].
pub struct BinaryWriter {
    pub os: Box<[u8]>,
}

pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    current: u64,
    free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flushes the partial last byte, zero-padded on the right.
    pub fn build(mut self) -> BinaryWriter {
        if self.free < 8 {
            self.os.push(self.current as u8);
        }

        BinaryWriter {
            os: self.os.into_boxed_slice(),
        }
    }

    /// Appends the `len` low bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from a single integer", len);

        let mut remaining = len;
        while remaining > 0 {
            let amount = remaining.min(self.free as u64);
            let chunk = if remaining < 64 {
                (x >> (remaining - amount)) & ((1 << amount) - 1)
            } else {
                // remaining == 64 would need a full-width shift; peel the
                // top byte instead (amount <= 8 here)
                (x >> 56) >> (8 - amount)
            };

            self.free -= amount as usize;
            self.current |= chunk << self.free;

            if self.free == 0 {
                self.os.push(self.current as u8);
                self.current = 0;
                self.free = 8;
            }

            remaining -= amount;
        }

        self.written_bits += len as usize;
        len
    }
}

/// Bit-granular reader over a byte buffer. End of stream is signaled by
/// `None` rather than a panic, so truncated inputs stay recoverable.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BinaryReader {
    is: Box<[u8]>,
    position: usize,
    pub read_bits: usize,
    current: u64,
    fill: usize,
}

impl BinaryReader {
    pub fn new(input_stream: Box<[u8]>) -> Self {
        BinaryReader {
            is: input_stream,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    #[inline(always)]
    fn read(&mut self) -> Option<u64> {
        if self.position >= self.is.len() {
            return None;
        }

        self.position += 1;
        Some(self.is[self.position - 1] as u64)
    }

    /// Reads the next `len` bits as an unsigned integer, MSB first.
    /// Returns `None` once the underlying buffer is exhausted.
    #[inline(always)]
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 64, "Cannot read {} bits into a single integer", len);

        let mut x = 0u64;
        let mut remaining = len;
        while remaining > 0 {
            if self.fill == 0 {
                self.current = self.read()?;
                self.fill = 8;
            }

            let amount = remaining.min(self.fill as u64);
            self.fill -= amount as usize;
            x = (x << amount) | ((self.current >> self.fill) & ((1 << amount) - 1));

            self.read_bits += amount as usize;
            remaining -= amount;
        }

        Some(x)
    }
}

#[cfg(test)]
mod tests;
