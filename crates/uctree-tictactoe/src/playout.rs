use std::sync::Arc;

use rand::{RngCore, seq::SliceRandom};
use uctree_core::{DefaultPolicy, DomainState, Playout};

use crate::{board::Mark, player::Player, state::TicTacToeState};

/// Plays uniformly random moves to the end of the game and scores the result for one
/// fixed mark: 1 for a win, 0.5 for a draw, 0 for a loss.
#[derive(Debug, Clone, Copy)]
pub struct RandomPlayout {
    perspective: Mark,
}

impl RandomPlayout {
    pub fn new(perspective: Mark) -> Self {
        RandomPlayout { perspective }
    }

    pub fn perspective(&self) -> Mark {
        self.perspective
    }
}

impl DefaultPolicy<TicTacToeState> for RandomPlayout {
    fn playout(
        &mut self,
        mut state: TicTacToeState,
        rng: &mut dyn RngCore,
    ) -> Playout<TicTacToeState> {
        while let Some(&next) = state.available_actions().choose(rng) {
            state.apply_action(&next);
        }

        let reward = if state.has_won(self.perspective) {
            1.0
        } else if state.is_draw() {
            0.5
        } else {
            0.0
        };
        Playout::Reward {
            agent: Arc::new(Player::new(self.perspective)),
            reward,
        }
    }
}
