use crate::{domain::DomainState, tree::ids::NodeId, tree::stats::NodeStats};

#[derive(Debug, Clone)]
/// One position in the search tree.
/// Owns a private copy of the domain state; links to parent and children are arena ids.
pub struct Node<S: DomainState> {
    state: S,
    depth: u64,
    parent: Option<NodeId>,
    incoming_action: Option<S::Action>,
    children: Vec<NodeId>,
    stats: NodeStats,
}

impl<S: DomainState> Node<S> {
    /// Create the root node; it has neither parent nor incoming action
    pub fn root(state: S) -> Self {
        Node {
            state,
            depth: 0,
            parent: None,
            incoming_action: None,
            children: Vec::new(),
            stats: NodeStats::new(),
        }
    }

    /// Create a child reached from `parent` through `action`
    pub fn child(state: S, depth: u64, parent: NodeId, action: S::Action) -> Self {
        Node {
            state,
            depth,
            parent: Some(parent),
            incoming_action: Some(action),
            children: Vec::new(),
            stats: NodeStats::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn depth(&self) -> u64 {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn incoming_action(&self) -> Option<&S::Action> {
        self.incoming_action.as_ref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    /// Backpropagation entry point: one visit plus its reward
    pub fn record(&mut self, reward: f64) {
        self.stats.record(reward);
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Fully expanded once there is a child for every available action
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.state.action_count()
    }
}
