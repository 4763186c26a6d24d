//! Rock-paper-scissors as a sequential game with hidden information.
//!
//! Player one chooses first. When player two is to move, player one's
//! choice is on the table but face down, so determinization redraws it.

use gambit_core::{Game, GameState, GameStatus, Player};
use rand::seq::SliceRandom;
use rand::Rng;

/// A hand shape.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rps {
    Rock,
    Paper,
    Scissors,
}

impl Rps {
    pub const ALL: [Rps; 3] = [Rps::Rock, Rps::Paper, Rps::Scissors];

    /// True if `self` beats `other`.
    pub fn beats(self, other: Rps) -> bool {
        matches!(
            (self, other),
            (Rps::Rock, Rps::Scissors) | (Rps::Scissors, Rps::Paper) | (Rps::Paper, Rps::Rock)
        )
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RpsState {
    pub active: Player,
    pub first: Option<Rps>,
    pub second: Option<Rps>,
}

impl GameState for RpsState {
    fn active_player(&self) -> Player {
        self.active
    }
}

#[derive(Clone, Debug)]
pub struct RockPaperScissors;

impl Game for RockPaperScissors {
    type State = RpsState;
    type Move = Rps;

    fn new_game(&self) -> Self::State {
        RpsState {
            active: Player::One,
            first: None,
            second: None,
        }
    }

    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        if self.status(state).is_terminal() {
            Vec::new()
        } else {
            Rps::ALL.to_vec()
        }
    }

    fn sensible_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        self.valid_moves(state)
    }

    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let mut next = state.clone();
        match state.active {
            Player::One => next.first = Some(*mv),
            Player::Two => next.second = Some(*mv),
        }
        next.active = state.active.opponent();
        next
    }

    fn status(&self, state: &Self::State) -> GameStatus {
        match (state.first, state.second) {
            (Some(first), Some(second)) if first == second => GameStatus::Draw,
            (Some(first), Some(second)) if first.beats(second) => GameStatus::Win,
            (Some(_), Some(_)) => GameStatus::Lose,
            _ => GameStatus::InPlay,
        }
    }

    fn randomize_hidden_info<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R) -> Self::State {
        let mut next = state.clone();
        if state.active == Player::Two && state.first.is_some() {
            next.first = Rps::ALL.choose(rng).copied();
        }
        next
    }
}
