mod node_tests;
mod property_tree_tests;

use rand::{RngCore, seq::SliceRandom};

use crate::domain::{DomainAgent, DomainState};

/// State whose action list never changes; applying an action only records it.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct StaticState {
    pub actions: Vec<String>,
    pub applied: Vec<String>,
    pub terminal: bool,
}

impl StaticState {
    pub fn new(actions: &[&str]) -> Self {
        StaticState {
            actions: actions.iter().map(|action| action.to_string()).collect(),
            applied: Vec::new(),
            terminal: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct FixedRewardAgent(pub f64);

impl DomainAgent<StaticState> for FixedRewardAgent {
    fn terminal_state_by_simulation(
        &self,
        mut state: StaticState,
        _rng: &mut dyn RngCore,
    ) -> StaticState {
        state.terminal = true;
        state
    }

    fn reward_from_terminal_state(&self, _terminal_state: &StaticState) -> f64 {
        self.0
    }
}

impl DomainState for StaticState {
    type Action = String;
    type Agent = FixedRewardAgent;

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn current_agent(&self) -> FixedRewardAgent {
        FixedRewardAgent(1.0)
    }

    fn previous_agent(&self) -> FixedRewardAgent {
        FixedRewardAgent(1.0)
    }

    fn available_actions(&self) -> Vec<String> {
        self.actions.clone()
    }

    fn apply_action(&mut self, action: &String) -> &mut Self {
        self.applied.push(action.clone());
        self
    }

    fn skip_current_agent(&mut self) -> &mut Self {
        self
    }
}

/// Two players alternately take one or two tokens; whoever takes the last token wins.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TakeAwayState {
    pub tokens: u32,
    pub to_move: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TakeAwayPlayer(pub u8);

impl DomainAgent<TakeAwayState> for TakeAwayPlayer {
    fn terminal_state_by_simulation(
        &self,
        mut state: TakeAwayState,
        rng: &mut dyn RngCore,
    ) -> TakeAwayState {
        while !state.is_terminal() {
            let actions = state.available_actions();
            if let Some(take) = actions.choose(rng) {
                state.apply_action(take);
            }
        }
        state
    }

    fn reward_from_terminal_state(&self, terminal_state: &TakeAwayState) -> f64 {
        // The player who moved last took the final token.
        if terminal_state.previous_agent() == *self {
            1.0
        } else {
            0.0
        }
    }

    fn reward_from_agent_reward(&self, resolved_for: &TakeAwayPlayer, reward: f64) -> f64 {
        if resolved_for == self { reward } else { 1.0 - reward }
    }
}

impl DomainState for TakeAwayState {
    type Action = u32;
    type Agent = TakeAwayPlayer;

    fn is_terminal(&self) -> bool {
        self.tokens == 0
    }

    fn current_agent(&self) -> TakeAwayPlayer {
        TakeAwayPlayer(self.to_move)
    }

    fn previous_agent(&self) -> TakeAwayPlayer {
        TakeAwayPlayer(1 - self.to_move)
    }

    fn available_actions(&self) -> Vec<u32> {
        (1..=self.tokens.min(2)).collect()
    }

    fn apply_action(&mut self, action: &u32) -> &mut Self {
        self.tokens -= action;
        self.to_move = 1 - self.to_move;
        self
    }

    fn skip_current_agent(&mut self) -> &mut Self {
        self.to_move = 1 - self.to_move;
        self
    }
}
