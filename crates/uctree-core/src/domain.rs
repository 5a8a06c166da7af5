use std::{fmt::Debug, sync::Arc};

use rand::RngCore;

use crate::clone::CloneContext;

/// Generic interface a decision domain implements to become searchable.
///
/// The search only ever mutates private deep clones produced through
/// [`DomainState::deep_clone`]; the caller's state is left untouched.
pub trait DomainState: Clone {
    type Action: Clone + PartialEq + Debug;
    type Agent: DomainAgent<Self>;

    /// Return whether the state ends the decision process.
    fn is_terminal(&self) -> bool;

    /// Return the agent whose turn it is.
    fn current_agent(&self) -> Self::Agent;

    /// Return the agent whose move produced this state.
    fn previous_agent(&self) -> Self::Agent;

    /// Return the legal actions for the current agent.
    /// Content must be deterministic for a given state; order only matters for tie-breaking.
    fn available_actions(&self) -> Vec<Self::Action>;

    /// Return how many actions the current agent has.
    /// Must agree with `available_actions().len()`.
    fn action_count(&self) -> usize {
        self.available_actions().len()
    }

    /// Apply an action for the current agent in place.
    fn apply_action(&mut self, action: &Self::Action) -> &mut Self;

    /// Pass the turn to the next agent without acting, for domains where an agent can be
    /// left without a legal move.
    fn skip_current_agent(&mut self) -> &mut Self;

    /// Produce a fully independent copy of this state.
    /// Types registered in `ctx` may be shared instead of duplicated.
    fn deep_clone(&self, _ctx: &CloneContext) -> Self {
        self.clone()
    }
}

/// Behaviour of a player taking part in the domain.
pub trait DomainAgent<S> {
    /// Play `state` forward until it is terminal and return it.
    fn terminal_state_by_simulation(&self, state: S, rng: &mut dyn RngCore) -> S;

    /// Score a terminal state from this agent's point of view.
    fn reward_from_terminal_state(&self, terminal_state: &S) -> f64;

    /// Translate a reward resolved for `resolved_for` into this agent's point of view.
    /// The default treats the reward as shared by every agent.
    fn reward_from_agent_reward(&self, _resolved_for: &Self, reward: f64) -> f64 {
        reward
    }
}

impl<S, A> DomainAgent<S> for Arc<A>
where
    A: DomainAgent<S> + ?Sized,
{
    fn terminal_state_by_simulation(&self, state: S, rng: &mut dyn RngCore) -> S {
        (**self).terminal_state_by_simulation(state, rng)
    }

    fn reward_from_terminal_state(&self, terminal_state: &S) -> f64 {
        (**self).reward_from_terminal_state(terminal_state)
    }

    fn reward_from_agent_reward(&self, resolved_for: &Self, reward: f64) -> f64 {
        (**self).reward_from_agent_reward(&**resolved_for, reward)
    }
}
