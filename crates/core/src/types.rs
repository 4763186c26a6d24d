//! Player and status types with a fixed orientation.
//!
//! Statuses are always expressed from player one's side of the table:
//! `Win` means player one won, `Lose` means player two won.

use std::fmt;

/// Status of a game position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InPlay,
    /// Player one won.
    Win,
    /// Player two won.
    Lose,
    Draw,
}

impl GameStatus {
    /// True for every status other than `InPlay`.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InPlay
    }

    /// True for `Win` and `Lose`.
    pub fn is_decisive(self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Lose)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InPlay => write!(f, "IN_PLAY"),
            GameStatus::Win => write!(f, "WIN"),
            GameStatus::Lose => write!(f, "LOSE"),
            GameStatus::Draw => write!(f, "DRAW"),
        }
    }
}

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opposing player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The terminal status this player is trying to reach.
    pub fn goal(self) -> GameStatus {
        match self {
            Player::One => GameStatus::Win,
            Player::Two => GameStatus::Lose,
        }
    }

    /// Sign applied to heuristics that are positive in player one's favour.
    pub fn sign(self) -> f64 {
        match self {
            Player::One => 1.0,
            Player::Two => -1.0,
        }
    }

    /// Seat number, 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.number())
    }
}
