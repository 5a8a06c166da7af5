use std::fmt;

use crate::tree::ids::NodeId;

/// Error type for tree operations and searches.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Attempted to access a node id that does not exist in the arena.
    MissingNode { node_id: NodeId },
    /// Expansion was asked for an action that is not currently untried at the node.
    InvalidAction { node_id: NodeId, action: String },
    /// Best-child selection on a node that still has untried actions.
    NotFullyExpanded {
        node_id: NodeId,
        children: usize,
        available: usize,
    },
    /// Best-child selection on a node without any children.
    NoChildren { node_id: NodeId },
    /// Best-child selection while a child has never been visited.
    UnvisitedChild { node_id: NodeId, child_id: NodeId },
    /// Mean value requested for a node with zero visits.
    UnvisitedNode { node_id: NodeId },
    /// The node reports missing children but the domain lists no untried action.
    NoUntriedActions { node_id: NodeId },
    /// A non-root node was found without the action that created it.
    MissingIncomingAction { node_id: NodeId },
    /// Exploration constant is negative or not finite.
    InvalidExplorationConstant { c: f64 },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::MissingNode { node_id } => {
                write!(f, "missing node with id {}", node_id.index())
            }
            TreeError::InvalidAction { node_id, action } => write!(
                f,
                "action {action} is not untried on node {}",
                node_id.index()
            ),
            TreeError::NotFullyExpanded {
                node_id,
                children,
                available,
            } => write!(
                f,
                "node {} is not fully expanded ({children} of {available} actions tried)",
                node_id.index()
            ),
            TreeError::NoChildren { node_id } => {
                write!(f, "node {} has no children", node_id.index())
            }
            TreeError::UnvisitedChild { node_id, child_id } => write!(
                f,
                "child {} of node {} has not been visited",
                child_id.index(),
                node_id.index()
            ),
            TreeError::UnvisitedNode { node_id } => {
                write!(f, "node {} has not been visited", node_id.index())
            }
            TreeError::NoUntriedActions { node_id } => write!(
                f,
                "node {} is not fully expanded but has no untried actions",
                node_id.index()
            ),
            TreeError::MissingIncomingAction { node_id } => {
                write!(f, "node {} has no incoming action", node_id.index())
            }
            TreeError::InvalidExplorationConstant { c } => {
                write!(f, "exploration constant must be finite and >= 0, got {c}")
            }
        }
    }
}

impl std::error::Error for TreeError {}
