//! Uniform random move selection, the baseline rollout policy.

use gambit_core::{GambitError, Game, Result, Strategy};
use rand::seq::SliceRandom;
use rand::Rng;

pub(crate) const MOOD_SENSIBLE: &str = "Sensible";
pub(crate) const MOOD_NOT_SENSIBLE: &str = "Not Sensible";

/// Picks uniformly among sensible moves, falling back to all valid moves.
pub struct RandomStrategy<R: Rng> {
    rng: R,
    mood: String,
}

impl<R: Rng> RandomStrategy<R> {
    /// Create a new random strategy drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            mood: "none".to_string(),
        }
    }
}

impl<G: Game, R: Rng> Strategy<G> for RandomStrategy<R> {
    fn pick_move(&mut self, game: &G, state: &G::State) -> Result<G::Move> {
        if let Some(mv) = game.sensible_moves(state).choose(&mut self.rng) {
            self.mood = MOOD_SENSIBLE.to_string();
            return Ok(mv.clone());
        }

        self.mood = MOOD_NOT_SENSIBLE.to_string();
        game.valid_moves(state)
            .choose(&mut self.rng)
            .cloned()
            .ok_or(GambitError::NoValidMoves)
    }

    fn mood(&self) -> &str {
        &self.mood
    }
}
