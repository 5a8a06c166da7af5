mod board;
mod error;
mod player;
mod playout;
mod state;

pub use board::{Mark, Move};
pub use error::TicTacToeError;
pub use player::Player;
pub use playout::RandomPlayout;
pub use state::TicTacToeState;
