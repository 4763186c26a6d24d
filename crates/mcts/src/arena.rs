//! Head-to-head matches between two strategies.

use gambit_core::{GambitError, Game, GameState, GameStatus, Player, Result, Strategy};
use tracing::debug;

/// Why a match stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchEnd {
    /// The game reached a terminal status.
    Terminal,
    /// The player to move had no legal moves. Scored as a draw.
    Deadlock,
    /// The ply limit was hit first. Scored as a draw.
    MoveLimit,
}

/// Outcome of `play_match`.
#[derive(Clone, Debug)]
pub struct MatchResult<S> {
    pub state: S,
    pub status: GameStatus,
    pub plies: u32,
    pub end: MatchEnd,
}

impl<S> MatchResult<S> {
    /// The winning player, if the match was decisive.
    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Win => Some(Player::One),
            GameStatus::Lose => Some(Player::Two),
            _ => None,
        }
    }
}

/// Play `state` to the end with `first` moving for player one and `second`
/// for player two.
///
/// # Errors
/// Propagates strategy errors other than `GambitError::NoValidMoves`.
pub fn play_match<G, A, B>(
    game: &G,
    state: G::State,
    first: &mut A,
    second: &mut B,
    max_plies: u32,
) -> Result<MatchResult<G::State>>
where
    G: Game,
    A: Strategy<G> + ?Sized,
    B: Strategy<G> + ?Sized,
{
    let mut state = state;
    let mut plies = 0;

    let (status, end) = loop {
        let status = game.status(&state);
        if status.is_terminal() {
            break (status, MatchEnd::Terminal);
        }
        if plies >= max_plies {
            break (GameStatus::Draw, MatchEnd::MoveLimit);
        }

        let picked = match state.active_player() {
            Player::One => first.pick_move(game, &state),
            Player::Two => second.pick_move(game, &state),
        };
        let mv = match picked {
            Ok(mv) => mv,
            Err(GambitError::NoValidMoves) => break (GameStatus::Draw, MatchEnd::Deadlock),
            Err(err) => return Err(err),
        };

        state = game.apply_move(&state, &mv);
        plies += 1;
    };

    debug!(%status, plies, ?end, "match finished");

    Ok(MatchResult {
        state,
        status,
        plies,
        end,
    })
}
