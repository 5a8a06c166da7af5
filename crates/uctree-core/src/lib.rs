mod clone;
mod domain;
mod engine;
mod policy;
mod tree;

pub use clone::CloneContext;
pub use domain::{DomainAgent, DomainState};
pub use engine::Mcts;
pub use policy::{AgentPlayout, DefaultPolicy, Playout};
pub use tree::error::TreeError;
pub use tree::ids::NodeId;
pub use tree::mcts::{IterationMetrics, RunMetrics, SearchConfig, SearchConfigError};
pub use tree::search_tree::{Tree, TreePolicyResult};
pub use tree::snapshot::{NodeSnapshot, TreeSnapshot};
