use crate::{
    clone::CloneContext,
    domain::DomainState,
    tree::{arena::Arena, error::TreeError, ids::NodeId, node::Node},
};

#[derive(Debug, Clone, Copy)]
/// Where the tree policy stopped during one iteration
pub struct TreePolicyResult {
    pub leaf: NodeId,      // node where the rollout starts (often newly created)
    pub leaf_is_new: bool, // whether the leaf was created in this iteration
    pub depth: u64,        // depth of the leaf below the root
}

#[derive(Debug, Clone)]
/// Owns the arena (root is always at index 0) and the clone configuration
/// used whenever a node copies its state.
pub struct Tree<S: DomainState> {
    arena: Arena<Node<S>>,
    clone_ctx: CloneContext,
}

impl<S: DomainState> Tree<S> {
    /// Create a tree whose root holds a deep clone of `state`.
    pub fn new(state: &S, clone_ctx: CloneContext) -> Self {
        let root = Node::root(state.deep_clone(&clone_ctx));
        Tree {
            arena: Arena::with_root(root),
            clone_ctx,
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        NodeId::from(0)
    }

    /// Return how many nodes exist in the tree arena.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn clone_context(&self) -> &CloneContext {
        &self.clone_ctx
    }

    pub(crate) fn node(&self, node_id: NodeId) -> Result<&Node<S>, TreeError> {
        self.arena
            .get(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Result<&mut Node<S>, TreeError> {
        self.arena
            .get_mut(node_id)
            .ok_or(TreeError::MissingNode { node_id })
    }

    pub(crate) fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node<S>)> {
        self.arena.iter()
    }

    /// Borrow the state a node represents.
    pub fn state(&self, node_id: NodeId) -> Result<&S, TreeError> {
        Ok(self.node(node_id)?.state())
    }

    /// Hand out an independent copy of the state a node represents.
    pub fn deep_clone_state(&self, node_id: NodeId) -> Result<S, TreeError> {
        Ok(self.node(node_id)?.state().deep_clone(&self.clone_ctx))
    }

    pub fn parent(&self, node_id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(node_id)?.parent())
    }

    pub fn children(&self, node_id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.node(node_id)?.children())
    }

    /// The action that led from the parent to this node, `None` at the root.
    pub fn incoming_action(&self, node_id: NodeId) -> Result<Option<&S::Action>, TreeError> {
        Ok(self.node(node_id)?.incoming_action())
    }

    pub fn depth(&self, node_id: NodeId) -> Result<u64, TreeError> {
        Ok(self.node(node_id)?.depth())
    }

    pub fn visit_count(&self, node_id: NodeId) -> Result<u64, TreeError> {
        Ok(self.node(node_id)?.stats().visits())
    }

    pub fn total_reward(&self, node_id: NodeId) -> Result<f64, TreeError> {
        Ok(self.node(node_id)?.stats().total_reward())
    }

    /// Accumulated reward divided by visits; fails on a node that was never visited.
    pub fn mean_value(&self, node_id: NodeId) -> Result<f64, TreeError> {
        self.node(node_id)?
            .stats()
            .mean()
            .ok_or(TreeError::UnvisitedNode { node_id })
    }

    pub fn is_terminal(&self, node_id: NodeId) -> Result<bool, TreeError> {
        Ok(self.node(node_id)?.is_terminal())
    }

    pub fn is_fully_expanded(&self, node_id: NodeId) -> Result<bool, TreeError> {
        Ok(self.node(node_id)?.is_fully_expanded())
    }

    /// Available actions of the node's state that no child has been created for yet,
    /// in the state's enumeration order.
    pub fn untried_actions(&self, node_id: NodeId) -> Result<Vec<S::Action>, TreeError> {
        let node = self.node(node_id)?;
        let tried: Vec<&S::Action> = node
            .children()
            .iter()
            .map(|child| self.node(*child).map(|c| c.incoming_action()))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten()
            .collect();

        Ok(node
            .state()
            .available_actions()
            .into_iter()
            .filter(|action| !tried.contains(&action))
            .collect())
    }

    /// Create the child reached by applying `action` to a clone of the node's state.
    /// `action` must be one of the node's untried actions.
    pub fn add_child(&mut self, node_id: NodeId, action: S::Action) -> Result<NodeId, TreeError> {
        if !self.untried_actions(node_id)?.contains(&action) {
            return Err(TreeError::InvalidAction {
                node_id,
                action: format!("{action:?}"),
            });
        }

        let (mut child_state, depth) = {
            let node = self.node(node_id)?;
            (node.state().deep_clone(&self.clone_ctx), node.depth() + 1)
        };
        child_state.apply_action(&action);

        let child_id = self
            .arena
            .allocate(Node::child(child_state, depth, node_id, action));
        self.node_mut(node_id)?.push_child(child_id);
        Ok(child_id)
    }

    /// Pick the child with the highest UCT score for exploration constant `c`.
    /// Requires a fully expanded node whose children have all been visited;
    /// ties go to the earliest child.
    pub fn best_child(&self, node_id: NodeId, c: f64) -> Result<NodeId, TreeError> {
        let node = self.node(node_id)?;
        if !node.is_fully_expanded() {
            return Err(TreeError::NotFullyExpanded {
                node_id,
                children: node.children().len(),
                available: node.state().action_count(),
            });
        }

        let parent_visits = node.stats().visits();
        let mut best: Option<(NodeId, f64)> = None;

        for &child_id in node.children() {
            let score = self
                .node(child_id)?
                .stats()
                .uct_score(parent_visits, c)
                .ok_or(TreeError::UnvisitedChild { node_id, child_id })?;

            best = match best {
                Some((best_id, best_score)) if best_score >= score => Some((best_id, best_score)),
                _ => Some((child_id, score)),
            };
        }

        best.map(|(child_id, _)| child_id)
            .ok_or(TreeError::NoChildren { node_id })
    }

    /// Count one visit on the node and add `reward` to its running total.
    pub fn record_outcome(&mut self, node_id: NodeId, reward: f64) -> Result<(), TreeError> {
        self.node_mut(node_id)?.record(reward);
        Ok(())
    }

    /// Incoming action of the root's best child with exploration disabled.
    pub fn most_promising_action(&self) -> Result<S::Action, TreeError> {
        let best = self.best_child(self.root_id(), 0.0)?;
        self.node(best)?
            .incoming_action()
            .cloned()
            .ok_or(TreeError::MissingIncomingAction { node_id: best })
    }
}
