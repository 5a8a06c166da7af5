use rand::RngCore;

use crate::domain::{DomainAgent, DomainState};

/// What a default policy hands back after simulating from a leaf.
#[derive(Debug, Clone)]
pub enum Playout<S: DomainState> {
    /// The terminal state reached; each node on the backpropagation path scores it
    /// from the point of view of the agent whose move the node represents.
    Terminal(S),
    /// A reward resolved for `agent`; each node on the path receives it translated through
    /// [`DomainAgent::reward_from_agent_reward`] for the agent whose move the node represents.
    Reward { agent: S::Agent, reward: f64 },
}

/// Simulation policy used in the rollout phase.
/// The state passed in is a private clone and can be mutated freely.
pub trait DefaultPolicy<S: DomainState> {
    fn playout(&mut self, state: S, rng: &mut dyn RngCore) -> Playout<S>;
}

impl<S, F> DefaultPolicy<S> for F
where
    S: DomainState,
    F: FnMut(S, &mut dyn RngCore) -> Playout<S>,
{
    fn playout(&mut self, state: S, rng: &mut dyn RngCore) -> Playout<S> {
        self(state, rng)
    }
}

/// Default policy that lets the invoking agent play the state to its end.
#[derive(Debug, Clone)]
pub struct AgentPlayout<A> {
    agent: A,
}

impl<A> AgentPlayout<A> {
    pub fn new(agent: A) -> Self {
        AgentPlayout { agent }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }
}

impl<S> DefaultPolicy<S> for AgentPlayout<S::Agent>
where
    S: DomainState,
{
    fn playout(&mut self, state: S, rng: &mut dyn RngCore) -> Playout<S> {
        Playout::Terminal(self.agent.terminal_state_by_simulation(state, rng))
    }
}
