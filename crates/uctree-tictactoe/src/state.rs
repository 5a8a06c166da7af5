use std::{fmt, sync::Arc};

use uctree_core::{CloneContext, DomainState};

use crate::{
    board::{self, Board, Mark, Move},
    error::TicTacToeError,
    player::Player,
};

#[derive(Debug, Clone)]
/// A position in a game of Tic-Tac-Toe, including whose turn it is.
pub struct TicTacToeState {
    board: Board,
    players: [Arc<Player>; 2],
    current: usize,
}

impl TicTacToeState {
    /// Empty board with `first` to move.
    pub fn new(first: Mark) -> Self {
        let players = [
            Arc::new(Player::new(Mark::Nought)),
            Arc::new(Player::new(Mark::Cross)),
        ];
        let current = match first {
            Mark::Nought => 0,
            Mark::Cross => 1,
        };
        TicTacToeState {
            board: [None; 9],
            players,
            current,
        }
    }

    /// Replay `moves` from an empty board, alternating turns starting with `first`.
    pub fn from_moves(first: Mark, moves: &[&str]) -> Result<Self, TicTacToeError> {
        let mut state = TicTacToeState::new(first);
        for notation in moves {
            state.play(notation.parse()?)?;
        }
        Ok(state)
    }

    /// Validated move for the player to act.
    pub fn play(&mut self, mv: Move) -> Result<(), TicTacToeError> {
        if self.is_terminal() {
            return Err(TicTacToeError::GameOver);
        }
        if self.board[mv.index()].is_some() {
            return Err(TicTacToeError::Occupied { mv });
        }
        self.apply_action(&mv);
        Ok(())
    }

    pub fn current_player(&self) -> &Arc<Player> {
        &self.players[self.current]
    }

    pub fn players(&self) -> &[Arc<Player>; 2] {
        &self.players
    }

    pub fn cell(&self, mv: Move) -> Option<Mark> {
        self.board[mv.index()]
    }

    pub fn moves_played(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn winner(&self) -> Option<Mark> {
        board::winner(&self.board)
    }

    pub fn has_won(&self, mark: Mark) -> bool {
        self.winner() == Some(mark)
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && board::is_full(&self.board)
    }

    /// Moves that immediately complete a line for the player to act.
    pub fn winning_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        let mark = self.current_player().mark();
        (0..self.board.len())
            .filter(|&idx| board::completes_line(&self.board, idx, mark))
            .map(Move::from_index)
            .collect()
    }

    fn opponent_index(&self) -> usize {
        1 - self.current
    }
}

impl DomainState for TicTacToeState {
    type Action = Move;
    type Agent = Arc<Player>;

    fn is_terminal(&self) -> bool {
        self.winner().is_some() || board::is_full(&self.board)
    }

    fn current_agent(&self) -> Arc<Player> {
        Arc::clone(&self.players[self.current])
    }

    fn previous_agent(&self) -> Arc<Player> {
        Arc::clone(&self.players[self.opponent_index()])
    }

    fn available_actions(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        (0..self.board.len())
            .filter(|&idx| self.board[idx].is_none())
            .map(Move::from_index)
            .collect()
    }

    fn action_count(&self) -> usize {
        if self.is_terminal() {
            0
        } else {
            9 - self.moves_played()
        }
    }

    fn apply_action(&mut self, action: &Move) -> &mut Self {
        debug_assert!(self.board[action.index()].is_none(), "cell {action} is occupied");
        self.board[action.index()] = Some(self.current_player().mark());
        self.current = self.opponent_index();
        self
    }

    fn skip_current_agent(&mut self) -> &mut Self {
        self.current = self.opponent_index();
        self
    }

    fn deep_clone(&self, ctx: &CloneContext) -> Self {
        TicTacToeState {
            board: self.board,
            players: [
                ctx.share_or_clone(&self.players[0]),
                ctx.share_or_clone(&self.players[1]),
            ],
            current: self.current,
        }
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", board::render(&self.board))
    }
}
