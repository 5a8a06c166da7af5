use std::{fmt, fs, path::Path};

use rand::{RngCore, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    domain::{DomainAgent, DomainState},
    policy::{DefaultPolicy, Playout},
    tree::{
        error::TreeError,
        ids::NodeId,
        search_tree::{Tree, TreePolicyResult},
    },
};

const DEFAULT_SEARCH_CONFIG_YAML: &str = include_str!("../../config/search.default.yaml");

/// Search configuration for UCT runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub iterations: usize,
    pub exploration: f64,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            iterations: 700,
            exploration: 0.4,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parse a search config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SearchConfigError> {
        let config: SearchConfig = serde_yaml::from_str(yaml).map_err(SearchConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a search config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SearchConfigError> {
        let yaml = fs::read_to_string(path).map_err(SearchConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SEARCH_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SearchConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub(crate) fn validate(&self) -> Result<(), SearchConfigError> {
        validate_iterations(self.iterations)?;
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(SearchConfigError::Invalid(
                "exploration must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn validate_iterations(iterations: usize) -> Result<(), SearchConfigError> {
    if iterations == 0 {
        return Err(SearchConfigError::Invalid(
            "iterations must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn validate_exploration(c: f64) -> Result<(), TreeError> {
    if !c.is_finite() || c < 0.0 {
        return Err(TreeError::InvalidExplorationConstant { c });
    }
    Ok(())
}

/// Error type for loading and validating `SearchConfig`.
#[derive(Debug)]
pub enum SearchConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SearchConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SearchConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SearchConfigError::Invalid(err) => write!(f, "invalid search config: {err}"),
        }
    }
}

impl std::error::Error for SearchConfigError {}

/// Per-iteration metrics emitted by the search loop.
#[derive(Debug, Clone, Copy)]
pub struct IterationMetrics {
    pub leaf: NodeId,
    pub depth: u64,
    pub leaf_is_new: bool,
    pub root_reward: f64,
}

/// Aggregate metrics for a complete search run.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub iterations_requested: usize,
    pub iterations_completed: usize,
    pub node_count: usize,
    pub root_reward_sum: f64,
    pub average_root_reward: f64,
}

impl RunMetrics {
    fn new(iterations_requested: usize) -> Self {
        RunMetrics {
            iterations_requested,
            iterations_completed: 0,
            node_count: 1,
            root_reward_sum: 0.0,
            average_root_reward: 0.0,
        }
    }

    fn record(&mut self, metrics: IterationMetrics, node_count: usize) {
        self.iterations_completed += 1;
        self.node_count = node_count;
        self.root_reward_sum += metrics.root_reward;
        self.average_root_reward = self.root_reward_sum / self.iterations_completed as f64;
    }
}

impl<S: DomainState> Tree<S> {
    /// Descend from the root with UCT until a terminal node or a node with untried
    /// actions is reached; the latter is expanded with one uniformly random untried action.
    pub fn tree_policy<R>(&mut self, c: f64, rng: &mut R) -> Result<TreePolicyResult, TreeError>
    where
        R: RngCore + ?Sized,
    {
        let mut current = self.root_id();

        loop {
            if self.is_terminal(current)? {
                return Ok(TreePolicyResult {
                    leaf: current,
                    leaf_is_new: false,
                    depth: self.depth(current)?,
                });
            }

            if !self.is_fully_expanded(current)? {
                let child = self.expand(current, rng)?;
                return Ok(TreePolicyResult {
                    leaf: child,
                    leaf_is_new: true,
                    depth: self.depth(child)?,
                });
            }

            current = self.best_child(current, c)?;
        }
    }

    /// Add a child for one untried action chosen uniformly at random.
    pub fn expand<R>(&mut self, node_id: NodeId, rng: &mut R) -> Result<NodeId, TreeError>
    where
        R: RngCore + ?Sized,
    {
        let action = self
            .untried_actions(node_id)?
            .choose(rng)
            .cloned()
            .ok_or(TreeError::NoUntriedActions { node_id })?;
        self.add_child(node_id, action)
    }

    /// Credit a playout to `leaf` and each of its ancestors up to the root.
    /// Every node is scored from the perspective of the agent whose move it represents.
    /// Returns the reward credited to the root.
    pub fn backpropagate(&mut self, leaf: NodeId, playout: &Playout<S>) -> Result<f64, TreeError> {
        let mut current = Some(leaf);
        let mut credited = 0.0;

        while let Some(node_id) = current {
            let mover = self.state(node_id)?.previous_agent();
            let reward = match playout {
                Playout::Terminal(terminal_state) => mover.reward_from_terminal_state(terminal_state),
                Playout::Reward { agent, reward } => mover.reward_from_agent_reward(agent, *reward),
            };

            let node = self.node_mut(node_id)?;
            node.record(reward);
            credited = reward;
            current = node.parent();
        }

        Ok(credited)
    }

    /// Execute one complete iteration: selection/expansion, simulation, backpropagation.
    pub fn iterate<P, R>(
        &mut self,
        c: f64,
        policy: &mut P,
        rng: &mut R,
    ) -> Result<IterationMetrics, TreeError>
    where
        P: DefaultPolicy<S> + ?Sized,
        R: RngCore,
    {
        let selected = self.tree_policy(c, rng)?;
        let simulated_state = self.deep_clone_state(selected.leaf)?;
        let playout = policy.playout(simulated_state, rng);
        let root_reward = self.backpropagate(selected.leaf, &playout)?;

        Ok(IterationMetrics {
            leaf: selected.leaf,
            depth: selected.depth,
            leaf_is_new: selected.leaf_is_new,
            root_reward,
        })
    }

    /// Run `iterations` iterations with exploration constant `c`.
    pub fn run<P, R>(
        &mut self,
        iterations: usize,
        c: f64,
        policy: &mut P,
        rng: &mut R,
    ) -> Result<RunMetrics, TreeError>
    where
        P: DefaultPolicy<S> + ?Sized,
        R: RngCore,
    {
        self.run_with_hook(iterations, c, policy, rng, |_| {})
    }

    /// Run the search loop and invoke a callback after each completed iteration.
    pub fn run_with_hook<P, R, FHook>(
        &mut self,
        iterations: usize,
        c: f64,
        policy: &mut P,
        rng: &mut R,
        mut on_iteration: FHook,
    ) -> Result<RunMetrics, TreeError>
    where
        P: DefaultPolicy<S> + ?Sized,
        R: RngCore,
        FHook: FnMut(&IterationMetrics),
    {
        validate_exploration(c)?;
        let mut metrics = RunMetrics::new(iterations);

        for iteration in 0..iterations {
            let iteration_metrics = self.iterate(c, policy, rng)?;
            trace!(
                iteration,
                leaf = iteration_metrics.leaf.index(),
                depth = iteration_metrics.depth,
                leaf_is_new = iteration_metrics.leaf_is_new,
                root_reward = iteration_metrics.root_reward,
                "uct iteration"
            );

            on_iteration(&iteration_metrics);
            metrics.record(iteration_metrics, self.node_count());
        }

        Ok(metrics)
    }
}
