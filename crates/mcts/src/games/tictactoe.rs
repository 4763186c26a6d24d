//! Tic-tac-toe implementation for strategy validation.
//!
//! Tic-tac-toe is a solved game where perfect play always results in a draw.
//! Its tiny tree makes it ideal for checking that the Monte Carlo strategy
//! exploits a random opponent and blocks immediate threats.
//!
//! X is player one, so an X win is `GameStatus::Win`.

use gambit_core::{Game, GameState, GameStatus, Player};
use rand::Rng;
use std::fmt;

/// Tic-tac-toe board state.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToeState {
    /// Board: 9 cells, indexed 0-8 (row-major).
    /// ```text
    /// 0 | 1 | 2
    /// ---------
    /// 3 | 4 | 5
    /// ---------
    /// 6 | 7 | 8
    /// ```
    board: [Option<Player>; 9],

    /// Current player to move.
    current: Player,

    /// Cached winner (if any).
    winner: Option<Player>,
}

impl TicTacToeState {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::One,
            winner: None,
        }
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    /// Number of pieces on the board.
    pub fn pieces(&self) -> usize {
        self.board.iter().filter(|c| c.is_some()).count()
    }

    /// Check for a winner on the current board.
    fn check_winner(&self) -> Option<Player> {
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];

        LINES.iter().find_map(|line| {
            let player = self.board[line[0]]?;
            (self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player))
                .then_some(player)
        })
    }

    /// Check if the board is full (draw if no winner).
    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToeState {
    fn active_player(&self) -> Player {
        self.current
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.board[row * 3 + col] {
                    Some(Player::One) => write!(f, " X ")?,
                    Some(Player::Two) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Tic-tac-toe move (cell index 0-8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeAction(pub u8);

impl TicTacToeAction {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }
}

impl fmt::Display for TicTacToeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe game implementation.
#[derive(Clone, Debug)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Move = TicTacToeAction;

    fn new_game(&self) -> Self::State {
        TicTacToeState::new()
    }

    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        if state.winner.is_some() {
            return Vec::new();
        }
        state
            .board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| TicTacToeAction(i as u8))
            .collect()
    }

    fn sensible_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        self.valid_moves(state)
    }

    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let cell = mv.0 as usize;
        assert!(
            state.board[cell].is_none(),
            "illegal tic-tac-toe move: cell {} is occupied",
            cell
        );
        let mut new_state = state.clone();
        new_state.board[cell] = Some(state.current);
        new_state.current = state.current.opponent();
        new_state.winner = new_state.check_winner();
        new_state
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
