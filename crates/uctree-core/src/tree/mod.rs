mod arena;
pub mod error;
pub mod ids;
pub mod mcts;
mod node;
pub mod search_tree;
pub mod snapshot;
mod stats;

#[cfg(test)]
mod tests;
