use crate::error::Result;
use crate::game::Game;

/// A move-selection policy.
///
/// Strategies are object safe so that one strategy can hold another as a
/// boxed rollout policy (including another search strategy).
pub trait Strategy<G: Game> {
    /// Choose a move for the active player.
    ///
    /// # Errors
    /// Returns `GambitError::NoValidMoves` when there is nothing to choose from.
    fn pick_move(&mut self, game: &G, state: &G::State) -> Result<G::Move>;

    /// Diagnostic summary of the last decision. Never feeds back into play.
    fn mood(&self) -> &str;
}

impl<G: Game, S: Strategy<G> + ?Sized> Strategy<G> for Box<S> {
    fn pick_move(&mut self, game: &G, state: &G::State) -> Result<G::Move> {
        (**self).pick_move(game, state)
    }

    fn mood(&self) -> &str {
        (**self).mood()
    }
}
