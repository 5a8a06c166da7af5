use std::{fmt, str::FromStr};

use crate::error::TicTacToeError;

pub(crate) const BOARD_SIZE: u8 = 3;

pub(crate) const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub(crate) type Board = [Option<Mark>; 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Nought,
    Cross,
}

impl Mark {
    pub fn symbol(self) -> char {
        match self {
            Mark::Nought => 'O',
            Mark::Cross => 'X',
        }
    }

    pub fn opponent(self) -> Mark {
        match self {
            Mark::Nought => Mark::Cross,
            Mark::Cross => Mark::Nought,
        }
    }
}

/// A board cell addressed by row and column, written as two digits (`"12"` is row 1, column 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    row: u8,
    column: u8,
}

impl Move {
    pub fn new(row: u8, column: u8) -> Result<Self, TicTacToeError> {
        if row >= BOARD_SIZE || column >= BOARD_SIZE {
            return Err(TicTacToeError::OutOfBounds { row, column });
        }
        Ok(Move { row, column })
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Move {
            row: index as u8 / BOARD_SIZE,
            column: index as u8 % BOARD_SIZE,
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.column
    }

    /// Row-major position on the board
    pub fn index(&self) -> usize {
        (self.row * BOARD_SIZE + self.column) as usize
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for Move {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TicTacToeError::InvalidNotation {
            notation: s.to_string(),
        };
        let mut digits = s.trim().chars().map(|ch| ch.to_digit(10));

        match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(row)), Some(Some(column)), None) => Move::new(row as u8, column as u8),
            _ => Err(invalid()),
        }
    }
}

pub(crate) fn winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|line| {
        let first = board[line[0]]?;
        (board[line[1]] == Some(first) && board[line[2]] == Some(first)).then_some(first)
    })
}

pub(crate) fn is_full(board: &Board) -> bool {
    board.iter().all(Option::is_some)
}

/// Whether putting `mark` on the empty cell `index` completes one of its lines.
pub(crate) fn completes_line(board: &Board, index: usize, mark: Mark) -> bool {
    board[index].is_none()
        && LINES
            .iter()
            .filter(|line| line.contains(&index))
            .any(|line| {
                line.iter()
                    .all(|&cell| cell == index || board[cell] == Some(mark))
            })
}

pub(crate) fn render(board: &Board) -> String {
    board
        .chunks(BOARD_SIZE as usize)
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or('-', Mark::symbol).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
