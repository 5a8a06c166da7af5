use serde::Serialize;

use crate::{domain::DomainState, tree::search_tree::Tree};

const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot {
    pub schema_version: u32,
    pub root_node_id: usize,
    pub node_count: usize,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub node_id: usize,
    pub depth: u64,
    pub is_terminal: bool,
    pub parent_node_id: Option<usize>,
    pub incoming_action: Option<String>,
    pub visits: u64,
    pub total_reward: f64,
    pub mean_value: Option<f64>,
    pub children: Vec<usize>,
}

impl TreeSnapshot {
    /// Render the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<S: DomainState> Tree<S> {
    /// Capture every node's statistics; actions are rendered with `Debug`.
    pub fn snapshot(&self) -> TreeSnapshot {
        let nodes = self
            .nodes()
            .map(|(node_id, node)| NodeSnapshot {
                node_id: node_id.index(),
                depth: node.depth(),
                is_terminal: node.is_terminal(),
                parent_node_id: node.parent().map(|parent| parent.index()),
                incoming_action: node.incoming_action().map(|action| format!("{action:?}")),
                visits: node.stats().visits(),
                total_reward: node.stats().total_reward(),
                mean_value: node.stats().mean(),
                children: node.children().iter().map(|child| child.index()).collect(),
            })
            .collect();

        TreeSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            root_node_id: self.root_id().index(),
            node_count: self.node_count(),
            nodes,
        }
    }
}
