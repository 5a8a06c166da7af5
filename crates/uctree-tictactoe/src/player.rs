use rand::{RngCore, seq::SliceRandom};
use uctree_core::{DomainAgent, DomainState};

use crate::{board::Mark, state::TicTacToeState};

/// A Tic-Tac-Toe participant. Simulations take an immediately winning move when one
/// exists and otherwise play uniformly at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    mark: Mark,
}

impl Player {
    pub fn new(mark: Mark) -> Self {
        Player { mark }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

impl DomainAgent<TicTacToeState> for Player {
    fn terminal_state_by_simulation(
        &self,
        mut state: TicTacToeState,
        rng: &mut dyn RngCore,
    ) -> TicTacToeState {
        while !state.is_terminal() {
            let next = match state.winning_moves().first() {
                Some(&winning) => Some(winning),
                None => state.available_actions().choose(rng).copied(),
            };
            let Some(next) = next else {
                break;
            };
            state.apply_action(&next);
        }
        state
    }

    fn reward_from_terminal_state(&self, terminal_state: &TicTacToeState) -> f64 {
        if terminal_state.has_won(self.mark) {
            1.0
        } else if terminal_state.is_draw() {
            0.5
        } else {
            0.0
        }
    }

    fn reward_from_agent_reward(&self, resolved_for: &Player, reward: f64) -> f64 {
        if resolved_for.mark == self.mark {
            reward
        } else {
            1.0 - reward
        }
    }
}
