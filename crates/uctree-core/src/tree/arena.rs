use crate::tree::ids::NodeId;

/// Contiguous node storage. Ids are handed out in allocation order and never reused,
/// so a `NodeId` stays valid for the whole lifetime of the tree.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    nodes: Vec<T>,
}

impl<T> Arena<T> {
    /// Create an arena seeded with its first (root) item at index 0
    pub fn with_root(root: T) -> Self {
        Arena { nodes: vec![root] }
    }

    /// Store a new item and return the id it can be looked up with
    pub fn allocate(&mut self, item: T) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(item);
        id
    }

    pub fn get(&self, node_id: NodeId) -> Option<&T> {
        self.nodes.get(node_id.index())
    }

    pub fn get_mut(&mut self, node_id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(node_id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Walk nodes in allocation order, paired with their ids
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, item)| (NodeId::from(idx), item))
    }
}
