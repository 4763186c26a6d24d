//! Rollout simulation.
//!
//! A rollout plays a game forward from a position using a pluggable
//! simulation strategy until the game ends or the depth limit is reached.

use gambit_core::{GambitError, Game, GameStatus, Result, Strategy};

/// Result of a single rollout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RolloutOutcome {
    /// Status at the end of the rollout. `InPlay` means truncated.
    pub status: GameStatus,

    /// Plies played before the rollout stopped.
    pub length: u32,

    /// Heuristic value of the final position, set only for truncated rollouts.
    /// Positive favours player one.
    pub heuristic: Option<f64>,
}

impl RolloutOutcome {
    fn finished(status: GameStatus, length: u32) -> Self {
        Self {
            status,
            length,
            heuristic: None,
        }
    }
}

/// Play out a game from `state` for at most `depth` plies.
///
/// The simulation strategy picks every move. If it runs out of moves the
/// rollout is a deadlock and counts as a draw at the current ply. A rollout
/// that is still in play after `depth` plies is scored with `heuristic`.
///
/// # Errors
/// Propagates any strategy error other than `GambitError::NoValidMoves`.
pub fn simulate_game<G, S, H>(
    game: &G,
    state: G::State,
    policy: &mut S,
    depth: u32,
    heuristic: H,
) -> Result<RolloutOutcome>
where
    G: Game,
    S: Strategy<G> + ?Sized,
    H: Fn(&G::State) -> f64,
{
    let mut current = state;

    for ply in 0..depth {
        let status = game.status(&current);
        if status.is_terminal() {
            return Ok(RolloutOutcome::finished(status, ply));
        }

        let mv = match policy.pick_move(game, &current) {
            Ok(mv) => mv,
            Err(GambitError::NoValidMoves) => {
                return Ok(RolloutOutcome::finished(GameStatus::Draw, ply));
            }
            Err(err) => return Err(err),
        };
        current = game.apply_move(&current, &mv);
    }

    // The last ply may have ended the game
    let status = game.status(&current);
    if status.is_terminal() {
        return Ok(RolloutOutcome::finished(status, depth));
    }

    Ok(RolloutOutcome {
        status: GameStatus::InPlay,
        length: depth,
        heuristic: Some(heuristic(&current)),
    })
}
