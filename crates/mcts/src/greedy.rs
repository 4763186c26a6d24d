//! One-ply lookahead: take an immediate win if there is one.

use crate::random::RandomStrategy;
use gambit_core::{Game, GameState, Result, Strategy};
use rand::Rng;

/// Plays the first valid move that wins on the spot, otherwise plays randomly.
///
/// Moves are scanned in `valid_moves` order and the first winner is taken.
pub struct GreedyStrategy<R: Rng> {
    fallback: RandomStrategy<R>,
    mood: String,
}

impl<R: Rng> GreedyStrategy<R> {
    /// Create a greedy strategy whose random fallback draws from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            fallback: RandomStrategy::new(rng),
            mood: "greedy".to_string(),
        }
    }
}

impl<G: Game, R: Rng> Strategy<G> for GreedyStrategy<R> {
    fn pick_move(&mut self, game: &G, state: &G::State) -> Result<G::Move> {
        let goal = state.active_player().goal();
        let winning = game
            .valid_moves(state)
            .into_iter()
            .find(|mv| game.status(&game.apply_move(state, mv)) == goal);

        if let Some(mv) = winning {
            self.mood = "greedy".to_string();
            return Ok(mv);
        }

        let mv = self.fallback.pick_move(game, state)?;
        self.mood = Strategy::<G>::mood(&self.fallback).to_string();
        Ok(mv)
    }

    fn mood(&self) -> &str {
        &self.mood
    }
}
