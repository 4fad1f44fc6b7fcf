use crate::huffman::tree::HuffNode;

/// Ascending-order queue over tree nodes used during Huffman tree
/// construction. Nodes with equal weight keep their insertion order, so the
/// merge sequence (and with it the bit output) is fully deterministic.
#[derive(Default, Debug)]
pub struct NodeQueue {
    data: Vec<HuffNode>,
}

impl NodeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` after every node of strictly smaller weight and after
    /// every node of equal weight already in the queue.
    pub fn enqueue(&mut self, node: HuffNode) {
        let weight = node.weight();
        let mut i = 0;
        while i < self.data.len() && self.data[i].weight() < weight {
            i += 1;
        }
        while i < self.data.len() && self.data[i].weight() == weight {
            i += 1;
        }
        self.data.insert(i, node);
    }

    /// Removes and returns the minimum-weight node.
    pub fn dequeue(&mut self) -> HuffNode {
        assert!(!self.data.is_empty(), "Cannot dequeue from an empty NodeQueue");
        self.data.remove(0)
    }

    /// Returns the minimum-weight node without removing it.
    pub fn peek(&self) -> &HuffNode {
        assert!(!self.data.is_empty(), "Cannot peek into an empty NodeQueue");
        &self.data[0]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
