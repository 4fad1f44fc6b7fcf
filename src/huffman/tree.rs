use crate::bitstreams::BinaryWriterBuilder;
use crate::huffman::node_queue::NodeQueue;
use crate::huffman::{HuffError, Symbol, ALPH_SIZE, BITS_PER_WORD, PSEUDO_EOF};

/// Width of a leaf value field in the preorder description: one bit wider
/// than a symbol so that [`PSEUDO_EOF`] (one past the alphabet) fits.
pub const LEAF_VALUE_BITS: usize = BITS_PER_WORD + 1;

/// A node of the Huffman tree. Internal nodes always own exactly two
/// children; the tree is immutable once built.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum HuffNode {
    Leaf {
        value: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(value: Symbol, weight: u64) -> Self {
        HuffNode::Leaf { value, weight }
    }

    /// Combines two subtrees under a new internal node whose weight is the
    /// sum of both.
    pub fn merge(left: HuffNode, right: HuffNode) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[inline(always)]
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    #[inline(always)]
    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Cursor over a flat bit buffer, threaded through the recursive tree
/// rebuild so each call consumes bits in exact preorder.
struct BitCursor<'a> {
    bits: &'a [u8],
    index: usize,
}

impl<'a> BitCursor<'a> {
    fn new(bits: &'a [u8]) -> Self {
        BitCursor { bits, index: 0 }
    }

    fn next_bit(&mut self) -> Result<u8, HuffError> {
        if self.index >= self.bits.len() {
            return Err(HuffError::MalformedHeader);
        }
        self.index += 1;
        Ok(self.bits[self.index - 1])
    }
}

/// A Huffman tree over the byte alphabet plus [`PSEUDO_EOF`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the tree from a frequency table of length `ALPH_SIZE + 1`.
    ///
    /// One leaf is created per nonzero entry, in ascending symbol order, and
    /// the two minimum-weight nodes are merged (first dequeued = left child)
    /// until a single root remains. The sentinel entry must already be 1, so
    /// the queue is never empty and the tree never has zero leaves.
    pub fn from_frequencies(freq: &[u64]) -> Self {
        assert_eq!(
            freq.len(),
            ALPH_SIZE + 1,
            "Frequency table must have one entry per symbol plus the sentinel"
        );
        assert_eq!(
            freq[PSEUDO_EOF], 1,
            "Sentinel frequency must be exactly 1 before building the tree"
        );

        let mut queue = NodeQueue::new();
        for (value, &weight) in freq.iter().enumerate() {
            if weight > 0 {
                queue.enqueue(HuffNode::leaf(value as Symbol, weight));
            }
        }

        while queue.len() > 1 {
            let left = queue.dequeue();
            let right = queue.dequeue();
            queue.enqueue(HuffNode::merge(left, right));
        }

        HuffmanTree {
            root: queue.dequeue(),
        }
    }

    /// Wraps an already-reconstructed root.
    pub fn from_root(root: HuffNode) -> Self {
        HuffmanTree { root }
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    /// Generates the per-symbol codes: `codes[v]` is the root-to-leaf path
    /// for value `v` (0 = left, 1 = right), or `None` if `v` has no leaf.
    ///
    /// A degenerate single-leaf tree gets the one-bit code `[0]`; an empty
    /// code would make the encoded body ambiguous.
    pub fn make_codes(&self) -> Vec<Option<Box<[u8]>>> {
        let mut codes: Vec<Option<Box<[u8]>>> = vec![None; ALPH_SIZE + 1];

        if let HuffNode::Leaf { value, .. } = &self.root {
            codes[*value as usize] = Some(Box::from([0u8]));
            return codes;
        }

        let mut path = Vec::new();
        Self::build_codes(&self.root, &mut path, &mut codes);
        codes
    }

    fn build_codes(node: &HuffNode, path: &mut Vec<u8>, codes: &mut [Option<Box<[u8]>>]) {
        match node {
            HuffNode::Leaf { value, .. } => {
                codes[*value as usize] = Some(path.as_slice().into());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push(0);
                Self::build_codes(left, path, codes);
                path.pop();

                path.push(1);
                Self::build_codes(right, path, codes);
                path.pop();
            }
        }
    }

    /// Exact number of bits `write_tree` emits for this tree.
    pub fn tree_bits(&self) -> usize {
        Self::node_bits(&self.root)
    }

    fn node_bits(node: &HuffNode) -> usize {
        match node {
            HuffNode::Leaf { .. } => 1 + LEAF_VALUE_BITS,
            HuffNode::Internal { left, right, .. } => {
                1 + Self::node_bits(left) + Self::node_bits(right)
            }
        }
    }

    /// Writes the preorder description: internal nodes as a `0` bit followed
    /// by both subtrees, leaves as a `1` bit followed by the value in
    /// [`LEAF_VALUE_BITS`] bits. Returns the number of bits written.
    pub fn write_tree(&self, writer: &mut BinaryWriterBuilder) -> u64 {
        Self::write_node(&self.root, writer)
    }

    fn write_node(node: &HuffNode, writer: &mut BinaryWriterBuilder) -> u64 {
        match node {
            HuffNode::Leaf { value, .. } => {
                writer.push_bits(1, 1)
                    + writer.push_bits(*value as u64, LEAF_VALUE_BITS as u64)
            }
            HuffNode::Internal { left, right, .. } => {
                writer.push_bits(0, 1)
                    + Self::write_node(left, writer)
                    + Self::write_node(right, writer)
            }
        }
    }

    /// Rebuilds a tree from a preorder bit description. Fails if the buffer
    /// ends before a subtree is complete or if unconsumed bits remain after
    /// the root — both signal a corrupt header.
    pub fn rebuild(bits: &[u8]) -> Result<Self, HuffError> {
        let mut cursor = BitCursor::new(bits);
        let root = Self::rebuild_node(&mut cursor)?;

        if cursor.index != bits.len() {
            return Err(HuffError::MalformedHeader);
        }

        Ok(HuffmanTree { root })
    }

    fn rebuild_node(cursor: &mut BitCursor) -> Result<HuffNode, HuffError> {
        if cursor.next_bit()? == 0 {
            let left = Self::rebuild_node(cursor)?;
            let right = Self::rebuild_node(cursor)?;
            Ok(HuffNode::merge(left, right))
        } else {
            let mut value: u64 = 0;
            for _ in 0..LEAF_VALUE_BITS {
                value = (value << 1) | cursor.next_bit()? as u64;
            }
            Ok(HuffNode::leaf(value as Symbol, 0))
        }
    }
}
