use std::marker::PhantomData;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{
    clone::CloneContext,
    domain::DomainState,
    policy::{AgentPlayout, DefaultPolicy},
    tree::{
        error::TreeError,
        mcts::{RunMetrics, SearchConfig, SearchConfigError, validate_exploration, validate_iterations},
        search_tree::Tree,
    },
};

/// UCT search driver.
///
/// The iteration budget is fixed at construction; the exploration constant is
/// chosen per call, so one engine can be reused with different settings. Every
/// call builds a fresh tree that is dropped once the recommendation is made.
#[derive(Debug, Clone)]
pub struct Mcts<S, R = ChaCha8Rng> {
    iterations: usize,
    clone_ctx: CloneContext,
    rng: R,
    _state: PhantomData<fn(&S)>,
}

impl<S: DomainState> Mcts<S, ChaCha8Rng> {
    /// Engine with an entropy-seeded random source.
    pub fn new(iterations: usize) -> Result<Self, SearchConfigError> {
        Self::with_rng(iterations, ChaCha8Rng::from_entropy())
    }

    /// Engine whose random choices are reproducible for a given seed.
    pub fn with_seed(iterations: usize, seed: u64) -> Result<Self, SearchConfigError> {
        Self::with_rng(iterations, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Engine built from a validated `SearchConfig`.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchConfigError> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::with_seed(config.iterations, seed),
            None => Self::new(config.iterations),
        }
    }
}

impl<S: DomainState, R: RngCore> Mcts<S, R> {
    /// Engine driven by a caller-supplied random source.
    pub fn with_rng(iterations: usize, rng: R) -> Result<Self, SearchConfigError> {
        validate_iterations(iterations)?;
        Ok(Mcts {
            iterations,
            clone_ctx: CloneContext::new(),
            rng,
            _state: PhantomData,
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Share values of type `T` between node states instead of deep-cloning them.
    pub fn dont_clone<T: 'static>(&mut self) -> &mut Self {
        self.clone_ctx.dont_clone::<T>();
        self
    }

    pub fn clone_context(&self) -> &CloneContext {
        &self.clone_ctx
    }

    /// Return the most promising action from `state`.
    /// The agent to move in `state` performs every simulation.
    pub fn uct_search(&mut self, state: &S, c: f64) -> Result<S::Action, TreeError> {
        let mut policy = AgentPlayout::new(state.current_agent());
        self.uct_search_with_policy(state, c, &mut policy)
    }

    /// Return the most promising action from `state`, simulating with `policy`.
    pub fn uct_search_with_policy<P>(
        &mut self,
        state: &S,
        c: f64,
        policy: &mut P,
    ) -> Result<S::Action, TreeError>
    where
        P: DefaultPolicy<S> + ?Sized,
    {
        let (tree, metrics) = self.build_tree(state, c, policy)?;
        let action = tree.most_promising_action()?;

        debug!(
            iterations = metrics.iterations_completed,
            nodes = metrics.node_count,
            average_root_reward = metrics.average_root_reward,
            action = ?action,
            "uct search finished"
        );
        Ok(action)
    }

    /// Run the full iteration budget and hand back the resulting tree.
    pub fn build_tree<P>(
        &mut self,
        state: &S,
        c: f64,
        policy: &mut P,
    ) -> Result<(Tree<S>, RunMetrics), TreeError>
    where
        P: DefaultPolicy<S> + ?Sized,
    {
        validate_exploration(c)?;
        debug!(
            iterations = self.iterations,
            exploration = c,
            shared_types = ?self.clone_ctx.shared_type_names(),
            "uct search started"
        );

        let mut tree = Tree::new(state, self.clone_ctx.clone());
        let metrics = tree.run(self.iterations, c, policy, &mut self.rng)?;
        Ok((tree, metrics))
    }
}
