//! Connect four on a 7x6 board.
//!
//! Player one drops first. The board is stored column-major with the bottom
//! row at index 0, and the winner is computed incrementally from the last
//! piece dropped.

use gambit_core::{Game, GameState, GameStatus, Player};
use rand::Rng;
use std::fmt;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

/// Connect four position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct ConnectFourState {
    cells: [Option<Player>; COLUMNS * ROWS],
    heights: [u8; COLUMNS],
    current: Player,
    winner: Option<Player>,
}

impl ConnectFourState {
    /// Empty board, player one to move.
    pub fn new() -> Self {
        Self {
            cells: [None; COLUMNS * ROWS],
            heights: [0; COLUMNS],
            current: Player::One,
            winner: None,
        }
    }

    /// Piece at (col, row), row 0 being the bottom.
    pub fn get(&self, col: usize, row: usize) -> Option<Player> {
        if col < COLUMNS && row < ROWS {
            self.cells[col * ROWS + row]
        } else {
            None
        }
    }

    /// Number of pieces in a column.
    pub fn height(&self, col: usize) -> usize {
        self.heights[col] as usize
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize == ROWS)
    }

    /// Whether the piece at (col, row) completes a line of four.
    fn wins_through(&self, col: usize, row: usize) -> bool {
        const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

        let Some(player) = self.get(col, row) else {
            return false;
        };
        DIRECTIONS.iter().any(|&(dc, dr)| {
            let run = |sign: isize| {
                (1..4)
                    .take_while(|&step| {
                        let c = col as isize + sign * dc * step;
                        let r = row as isize + sign * dr * step;
                        c >= 0 && r >= 0 && self.get(c as usize, r as usize) == Some(player)
                    })
                    .count()
            };
            1 + run(1) + run(-1) >= 4
        })
    }
}

impl Default for ConnectFourState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ConnectFourState {
    fn active_player(&self) -> Player {
        self.current
    }
}

impl fmt::Display for ConnectFourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLUMNS {
                let symbol = match self.get(col, row) {
                    Some(Player::One) => '1',
                    Some(Player::Two) => '2',
                    None => '.',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "0123456")
    }
}

/// Drop a piece into a column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ConnectFourMove(pub u8);

/// Connect four game implementation.
#[derive(Clone, Debug)]
pub struct ConnectFour;

impl ConnectFour {
    /// Position evaluator for truncated rollouts.
    ///
    /// Weighs pieces by how many lines of four pass through their cell, so
    /// central pieces count more. Positive favours player one, range [-1, 1].
    pub fn heuristic(state: &ConnectFourState) -> f64 {
        const WEIGHTS: [[u8; ROWS]; COLUMNS] = [
            [3, 4, 5, 5, 4, 3],
            [4, 6, 8, 8, 6, 4],
            [5, 8, 11, 11, 8, 5],
            [7, 10, 13, 13, 10, 7],
            [5, 8, 11, 11, 8, 5],
            [4, 6, 8, 8, 6, 4],
            [3, 4, 5, 5, 4, 3],
        ];
        let total: f64 = WEIGHTS.iter().flatten().map(|&w| f64::from(w)).sum();

        let mut balance = 0.0;
        for (col, weights) in WEIGHTS.iter().enumerate() {
            for (row, &weight) in weights.iter().enumerate() {
                if let Some(player) = state.get(col, row) {
                    balance += player.sign() * f64::from(weight);
                }
            }
        }
        balance / total
    }
}

impl Game for ConnectFour {
    type State = ConnectFourState;
    type Move = ConnectFourMove;

    fn new_game(&self) -> Self::State {
        ConnectFourState::new()
    }

    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        if state.winner.is_some() {
            return Vec::new();
        }
        (0..COLUMNS)
            .filter(|&col| state.height(col) < ROWS)
            .map(|col| ConnectFourMove(col as u8))
            .collect()
    }

    fn sensible_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        self.valid_moves(state)
    }

    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let col = mv.0 as usize;
        let row = state.height(col);
        assert!(row < ROWS, "illegal connect four move: column {} is full", col);

        let mut next = state.clone();
        next.cells[col * ROWS + row] = Some(state.current);
        next.heights[col] += 1;
        next.current = state.current.opponent();
        if next.wins_through(col, row) {
            next.winner = Some(state.current);
        }
        next
    }

    fn status(&self, state: &Self::State) -> GameStatus {
        match state.winner {
            Some(player) => player.goal(),
            None if state.is_full() => GameStatus::Draw,
            None => GameStatus::InPlay,
        }
    }

    fn randomize_hidden_info<R: Rng + ?Sized>(&self, state: &Self::State, _rng: &mut R) -> Self::State {
        state.clone()
    }

    fn print(&self, state: &Self::State) {
        tracing::info!("\n{}", state);
    }
}
