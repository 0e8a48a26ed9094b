//! Node and data block types.

/// A populated slot of the node array.
///
/// Leaf and internal nodes share this type; a node's kind follows from its
/// position. `hash` is `None` only between the moment a parent slot is
/// allocated and the moment its digest is computed within the same
/// operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node<D> {
    pub(crate) hash: Option<D>,
}

impl<D> Node<D> {
    /// An allocated internal node whose digest has not been computed yet.
    pub(crate) fn pending() -> Self {
        Node { hash: None }
    }

    /// A node holding `hash`.
    pub(crate) fn with_hash(hash: D) -> Self {
        Node { hash: Some(hash) }
    }
}

/// User data backing one leaf. At most `block_size` bytes long.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DataBlock {
    payload: Vec<u8>,
}

impl DataBlock {
    pub(crate) fn len(&self) -> usize {
        self.payload.len()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.payload
    }

    /// Append bytes to the end of the block.
    pub(crate) fn extend(&mut self, data: &[u8]) {
        self.payload.extend_from_slice(data);
    }

    /// Replace the whole content of the block.
    pub(crate) fn replace(&mut self, data: &[u8]) {
        self.payload.clear();
        self.payload.extend_from_slice(data);
    }
}

impl From<&[u8]> for DataBlock {
    fn from(data: &[u8]) -> Self {
        DataBlock {
            payload: data.to_vec(),
        }
    }
}
