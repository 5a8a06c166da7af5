use thiserror::Error;

use crate::board::Move;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Error type for parsing and playing Tic-Tac-Toe moves.
pub enum TicTacToeError {
    #[error("invalid move notation '{notation}', expected a row digit followed by a column digit")]
    InvalidNotation { notation: String },

    #[error("cell ({row}, {column}) is outside the 3x3 board")]
    OutOfBounds { row: u8, column: u8 },

    #[error("cell {mv} is already occupied")]
    Occupied { mv: Move },

    #[error("the game is already over")]
    GameOver,
}
