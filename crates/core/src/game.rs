use crate::types::{GameStatus, Player};
use rand::Rng;
use std::fmt::Debug;
use std::hash::Hash;

/// Capability every game state must expose.
pub trait GameState {
    /// The player whose turn it is.
    fn active_player(&self) -> Player;
}

/// A game abstraction for move-selection strategies.
///
/// This trait defines the interface that any turn-based two-player game must
/// implement to be playable by the strategies in this workspace. States are
/// immutable values: `apply_move` and `randomize_hidden_info` always return a
/// new state and never mutate their input.
///
/// `apply_move` does not validate its move. Callers must only apply moves
/// drawn from `valid_moves` or `sensible_moves`; anything else is a logic
/// fault and implementations are free to panic.
pub trait Game: Send + Sync {
    /// The game state. `Eq + Hash` must be structural, it keys the evaluation cache.
    type State: GameState + Clone + Eq + Hash + Debug;

    /// A move, possibly composite (a chain of sub-moves).
    type Move: Clone + Eq + Hash + Debug;

    /// Returns the initial game state
    fn new_game(&self) -> Self::State;

    /// Returns every legal move from the given state
    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Returns a subset of legal moves that avoids degenerate play.
    ///
    /// An empty result means "no bias": use `valid_moves` instead.
    fn sensible_moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Applies a move, returning a new state (immutable operation)
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Returns the status of the position, oriented towards player one
    fn status(&self, state: &Self::State) -> GameStatus;

    /// Determinization.
    ///
    /// Returns a state consistent with everything the active player can
    /// observe, with the other player's hidden information redrawn uniformly
    /// from what is logically possible. The multiset of concealed items is
    /// conserved and the active player's own information is left untouched.
    /// Perfect-information games return a clone.
    fn randomize_hidden_info<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R)
        -> Self::State;

    /// Diagnostic dump of a state.
    fn print(&self, state: &Self::State) {
        tracing::info!(?state, "game state");
    }
}
