//! Flat Monte Carlo search with determinization.
//!
//! Every legal move at the root is a candidate. Each sampling round gives
//! every active candidate one rollout: the hidden information is redrawn,
//! the candidate is applied, and the simulation strategy plays the game out.
//! Scores are kept relative to the player making the decision. There is no
//! tree below the root; statistics live only on the candidates.

use crate::{
    cache::{CacheStats, EvaluationCache},
    config::MctsConfig,
    evaluation::MoveEvaluation,
    pruning::PruningController,
    rollout::simulate_game,
};
use gambit_core::{GambitError, Game, GameState, Result, Strategy};
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Candidates within this absolute distance of the best normalized score
/// are considered equally good.
pub const NEAR_BEST_TOLERANCE: f64 = 0.01;

/// Above this normalized score a line counts as won; prefer the shortest.
pub const WIN_THRESHOLD: f64 = 0.9;

/// Below this normalized score a line counts as lost; prefer the longest.
pub const LOSS_THRESHOLD: f64 = -0.9;

/// Position evaluator. Positive favours player one.
pub type Heuristic<S> = Box<dyn Fn(&S) -> f64>;

/// Which rule picked the final move among the near-best candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionRule {
    /// Effectively won: shortest average rollout.
    MinimizeLengthToVictory,
    /// Effectively lost: longest average rollout.
    DelayLoss,
    /// Highest raw score sum.
    HighestScore,
    /// Exact score tie broken by the secondary objective.
    SecondaryObjective,
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SelectionRule::MinimizeLengthToVictory => "Minimizing Length to Victory",
            SelectionRule::DelayLoss => "Delaying time till loss",
            SelectionRule::HighestScore => "Highest score",
            SelectionRule::SecondaryObjective => "Secondary objective",
        };
        f.write_str(text)
    }
}

/// Everything a single decision computed.
#[derive(Clone, Debug)]
pub struct Decision<M> {
    /// The selected move.
    pub chosen: M,

    /// Index of the selected move in `evaluations`.
    pub chosen_index: usize,

    /// Rule that made the final choice.
    pub rule: SelectionRule,

    /// One entry per legal move, in `valid_moves` order.
    /// Pruned and cached candidates are included.
    pub evaluations: Vec<MoveEvaluation<M>>,

    /// Rollouts actually run during this decision.
    pub rollouts: u64,

    /// Candidates served from the evaluation cache.
    pub cache_hits: usize,

    /// Candidates deactivated by pruning.
    pub pruned: usize,
}

impl<M> Decision<M> {
    /// Statistics of the selected move.
    pub fn chosen_evaluation(&self) -> &MoveEvaluation<M> {
        &self.evaluations[self.chosen_index]
    }

    /// Diagnostic JSON summary of the decision.
    pub fn mood(&self) -> String {
        let chosen = self.chosen_evaluation();
        serde_json::json!({
            "score": format!("{:.3}", chosen.normalized_score()),
            "goal": self.rule.to_string(),
            "depth": format!("{:.2}", chosen.average_length()),
            "unfinished": format!("{:.2}", chosen.unfinished_fraction()),
        })
        .to_string()
    }
}

/// Pick the final move from finished evaluations.
///
/// `tie_break` scores a candidate for the secondary objective; it is only
/// consulted when several near-best candidates share the exact highest score
/// sum. Ties that remain go to the earliest candidate. NaN scores rank below
/// every number.
///
/// # Panics
/// Panics if `evaluations` is empty.
pub fn select_move<M>(
    evaluations: &[MoveEvaluation<M>],
    tie_break: Option<&dyn Fn(&M) -> f64>,
) -> (usize, SelectionRule) {
    assert!(!evaluations.is_empty(), "select_move needs at least one candidate");

    let all: Vec<usize> = (0..evaluations.len()).collect();
    let score = |i: usize| ranked(evaluations[i].normalized_score());
    let leader = first_max_by(&all, score);
    let best = score(leader);
    // The leader is kept explicitly: at large magnitudes `best - tolerance == best`
    let near_best: Vec<usize> = all
        .into_iter()
        .filter(|&i| i == leader || score(i) > best - NEAR_BEST_TOLERANCE)
        .collect();

    if best > WIN_THRESHOLD {
        let index = first_max_by(&near_best, |i| -evaluations[i].average_length());
        return (index, SelectionRule::MinimizeLengthToVictory);
    }
    if best < LOSS_THRESHOLD {
        let index = first_max_by(&near_best, |i| evaluations[i].average_length());
        return (index, SelectionRule::DelayLoss);
    }

    let sum = |i: usize| ranked(evaluations[i].score_sum);
    let top = first_max_by(&near_best, sum);
    let tied: Vec<usize> = near_best
        .into_iter()
        .filter(|&i| i == top || sum(i) == sum(top))
        .collect();

    match tie_break {
        Some(objective) if tied.len() > 1 => {
            let index = first_max_by(&tied, |i| ranked(objective(&evaluations[i].mv)));
            (index, SelectionRule::SecondaryObjective)
        }
        _ => (top, SelectionRule::HighestScore),
    }
}

fn ranked(value: f64) -> f64 {
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}

/// Earliest index with the greatest key. `indices` must not be empty.
fn first_max_by(indices: &[usize], key: impl Fn(usize) -> f64) -> usize {
    let mut best = indices[0];
    let mut best_key = key(best);
    for &i in &indices[1..] {
        let k = key(i);
        if k > best_key {
            best = i;
            best_key = k;
        }
    }
    best
}

/// Monte Carlo strategy with determinization, pruning and caching.
///
/// Generic over:
/// - `G`: The game being played
/// - `R`: The random number generator used for determinization
///
/// The rollout policy is any boxed `Strategy`, including another
/// `MctsStrategy`. Nested strategies keep their own accumulators and cache.
pub struct MctsStrategy<G: Game, R: Rng> {
    config: MctsConfig,
    simulation: Box<dyn Strategy<G>>,
    rng: R,
    in_play_heuristic: Heuristic<G::State>,
    secondary_objective: Option<Heuristic<G::State>>,
    cache: EvaluationCache<G::State, G::Move>,
    mood: String,
}

impl<G, R> MctsStrategy<G, R>
where
    G: Game,
    R: Rng,
{
    /// Create a new strategy.
    ///
    /// # Errors
    /// Returns `GambitError::InvalidConfig` if the config does not validate.
    pub fn new<S>(config: MctsConfig, simulation: S, rng: R) -> Result<Self>
    where
        S: Strategy<G> + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            simulation: Box::new(simulation),
            rng,
            in_play_heuristic: Box::new(|_| 0.0),
            secondary_objective: None,
            cache: EvaluationCache::new(),
            mood: "waiting...".to_string(),
        })
    }

    /// Score truncated rollouts with `heuristic` instead of 0.
    pub fn with_heuristic(mut self, heuristic: impl Fn(&G::State) -> f64 + 'static) -> Self {
        self.in_play_heuristic = Box::new(heuristic);
        self
    }

    /// Break exact score ties by the position each move leads to.
    pub fn with_secondary_objective(
        mut self,
        objective: impl Fn(&G::State) -> f64 + 'static,
    ) -> Self {
        self.secondary_objective = Some(Box::new(objective));
        self
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Forget every cached evaluation.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Evaluate every legal move and pick one.
    ///
    /// # Errors
    /// Returns `GambitError::NoValidMoves` if the state has no legal moves.
    /// Errors raised by the simulation strategy, other than running out of
    /// moves inside a rollout, are propagated.
    pub fn decide(&mut self, game: &G, state: &G::State) -> Result<Decision<G::Move>> {
        let candidates = game.valid_moves(state);
        if candidates.is_empty() {
            return Err(GambitError::NoValidMoves);
        }

        let decider = state.active_player();
        let samples = self.config.samples;
        let mut evaluations: Vec<MoveEvaluation<G::Move>> =
            candidates.into_iter().map(MoveEvaluation::new).collect();
        let mut active = vec![true; evaluations.len()];

        let mut cache_hits = 0;
        if self.config.use_cache {
            for (evaluation, is_active) in evaluations.iter_mut().zip(active.iter_mut()) {
                if let Some(cached) = self.cache.lookup(state, &evaluation.mv, samples) {
                    *evaluation = cached;
                    *is_active = false;
                    cache_hits += 1;
                }
            }
            debug!(hits = cache_hits, candidates = evaluations.len(), "evaluation cache lookup");
        }
        let fresh = active.clone();

        let pruning = PruningController::new(self.config.z);
        let mut rollouts = 0u64;
        let mut pruned = 0;

        for round in 1..=samples {
            if !active.contains(&true) {
                break;
            }

            for (evaluation, _) in evaluations.iter_mut().zip(&active).filter(|(_, a)| **a) {
                let determinized = game.randomize_hidden_info(state, &mut self.rng);
                let next = game.apply_move(&determinized, &evaluation.mv);
                let outcome = simulate_game(
                    game,
                    next,
                    self.simulation.as_mut(),
                    self.config.depth,
                    &self.in_play_heuristic,
                )?;
                evaluation.record(&outcome, decider);
                rollouts += 1;
            }

            if self.config.prune_due(round) {
                pruned += pruning.prune(&evaluations, &mut active);
                // One survivor: the ranking among active candidates is settled
                if active.iter().filter(|&&a| a).count() == 1 {
                    break;
                }
            }
        }

        if self.config.use_cache {
            let finished = evaluations
                .iter()
                .zip(&fresh)
                .filter(|(_, f)| **f)
                .map(|(evaluation, _)| evaluation.clone());
            self.cache.store(state, finished, samples);
        }

        let (chosen_index, rule) = match &self.secondary_objective {
            Some(objective) => {
                let tie_break: &dyn Fn(&G::Move) -> f64 =
                    &|mv| objective(&game.apply_move(state, mv));
                select_move(&evaluations, Some(tie_break))
            }
            None => select_move(&evaluations, None),
        };

        let decision = Decision {
            chosen: evaluations[chosen_index].mv.clone(),
            chosen_index,
            rule,
            evaluations,
            rollouts,
            cache_hits,
            pruned,
        };
        self.mood = decision.mood();

        debug!(
            player = %decider,
            chosen = ?decision.chosen,
            rule = %decision.rule,
            score = decision.chosen_evaluation().normalized_score(),
            depth = decision.chosen_evaluation().average_length(),
            rollouts = decision.rollouts,
            cache_hits = decision.cache_hits,
            pruned = decision.pruned,
            "MCTS decision"
        );

        Ok(decision)
    }
}

impl<G, R> Strategy<G> for MctsStrategy<G, R>
where
    G: Game,
    R: Rng,
{
    fn pick_move(&mut self, game: &G, state: &G::State) -> Result<G::Move> {
        self.decide(game, state).map(|decision| decision.chosen)
    }

    fn mood(&self) -> &str {
        &self.mood
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{ConnectFour, ConnectFourMove, RockPaperScissors, Rps, TicTacToe};
    use crate::greedy::GreedyStrategy;
    use crate::random::RandomStrategy;
    use crate::rollout::RolloutOutcome;
    use gambit_core::{GameStatus, Player};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn synthetic(mv: u8, results: &[(GameStatus, u32)]) -> MoveEvaluation<u8> {
        let mut eval = MoveEvaluation::new(mv);
        for &(status, length) in results {
            let outcome = RolloutOutcome {
                status,
                length,
                heuristic: None,
            };
            eval.record(&outcome, Player::One);
        }
        eval
    }

    fn create_mcts<G: Game + 'static>(seed: u64, config: MctsConfig) -> MctsStrategy<G, ChaCha8Rng> {
        let simulation = RandomStrategy::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
        MctsStrategy::new(config, simulation, ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_select_shortest_win() {
        let evaluations = vec![
            synthetic(0, &[(GameStatus::Win, 9), (GameStatus::Win, 7)]),
            synthetic(1, &[(GameStatus::Win, 2), (GameStatus::Win, 4)]),
        ];

        let (index, rule) = select_move(&evaluations, None);

        assert_eq!(index, 1);
        assert_eq!(rule, SelectionRule::MinimizeLengthToVictory);
    }

    #[test]
    fn test_select_longest_loss() {
        let evaluations = vec![
            synthetic(0, &[(GameStatus::Lose, 1), (GameStatus::Lose, 1)]),
            synthetic(1, &[(GameStatus::Lose, 6), (GameStatus::Lose, 8)]),
        ];

        let (index, rule) = select_move(&evaluations, None);

        assert_eq!(index, 1);
        assert_eq!(rule, SelectionRule::DelayLoss);
    }

    #[test]
    fn test_select_highest_raw_score() {
        let evaluations = vec![
            synthetic(0, &[(GameStatus::Win, 1), (GameStatus::Draw, 1)]),
            synthetic(1, &[(GameStatus::Win, 1), (GameStatus::Lose, 1)]),
            synthetic(
                2,
                &[
                    (GameStatus::Win, 1),
                    (GameStatus::Win, 1),
                    (GameStatus::Draw, 1),
                    (GameStatus::Draw, 1),
                ],
            ),
        ];

        let (index, rule) = select_move(&evaluations, None);

        // Candidate 2 matches 0 on normalized score but has the larger raw sum
        assert_eq!(index, 2);
        assert_eq!(rule, SelectionRule::HighestScore);
        assert!((evaluations[0].normalized_score() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_select_secondary_objective() {
        let evaluations = vec![
            synthetic(3, &[(GameStatus::Win, 1), (GameStatus::Draw, 1)]),
            synthetic(8, &[(GameStatus::Win, 1), (GameStatus::Draw, 1)]),
        ];
        let prefer_larger: &dyn Fn(&u8) -> f64 = &|mv| f64::from(*mv);

        let (index, rule) = select_move(&evaluations, Some(prefer_larger));
        assert_eq!(index, 1);
        assert_eq!(rule, SelectionRule::SecondaryObjective);

        let (index, rule) = select_move(&evaluations, None);
        assert_eq!(index, 0);
        assert_eq!(rule, SelectionRule::HighestScore);
    }

    #[test]
    fn test_select_ignores_nan_scores() {
        let mut broken = synthetic(0, &[(GameStatus::Win, 1)]);
        broken.score_sum = f64::NAN;
        let evaluations = vec![broken, synthetic(1, &[(GameStatus::Win, 1), (GameStatus::Draw, 1)])];

        let (index, rule) = select_move(&evaluations, None);

        assert_eq!(index, 1);
        assert_eq!(rule, SelectionRule::HighestScore);
    }

    #[test]
    fn test_select_all_nan_falls_back_to_first() {
        let mut evaluations = vec![synthetic(0, &[(GameStatus::Win, 1)]), synthetic(1, &[(GameStatus::Win, 1)])];
        for evaluation in &mut evaluations {
            evaluation.score_sum = f64::NAN;
        }

        let (index, _) = select_move(&evaluations, None);

        assert_eq!(index, 0);
    }

    #[test]
    fn test_huge_heuristic_values_still_select() {
        let game = TicTacToe;
        let mut mcts = create_mcts::<TicTacToe>(2, MctsConfig::with_samples(2).with_depth(0))
            .with_heuristic(|_| 1.0e15);

        let decision = mcts.decide(&game, &game.new_game()).unwrap();

        assert_eq!(decision.chosen_index, 0);
        assert_eq!(decision.rule, SelectionRule::MinimizeLengthToVictory);
        assert!(game.valid_moves(&game.new_game()).contains(&decision.chosen));
    }

    #[test]
    fn test_connect_four_heuristic_prefers_center() {
        let game = ConnectFour;
        let mut mcts = create_mcts::<ConnectFour>(4, MctsConfig::with_samples(3).with_depth(0))
            .with_heuristic(ConnectFour::heuristic);

        let decision = mcts.decide(&game, &game.new_game()).unwrap();

        assert_eq!(decision.chosen, ConnectFourMove(3));
        assert_eq!(decision.rule, SelectionRule::HighestScore);
        assert!(decision.evaluations.iter().all(|e| e.unfinished == 3));
    }

    #[test]
    fn test_mcts_basic() {
        let game = TicTacToe;
        let mut mcts = create_mcts::<TicTacToe>(42, MctsConfig::with_samples(20));

        let decision = mcts.decide(&game, &game.new_game()).unwrap();

        assert_eq!(decision.evaluations.len(), 9);
        assert_eq!(decision.rollouts, 9 * 20);
        assert!(decision.evaluations.iter().all(|e| e.trials == 20));
        assert!(game.valid_moves(&game.new_game()).contains(&decision.chosen));
        assert!(Strategy::<TicTacToe>::mood(&mcts).contains("score"));
    }

    #[test]
    fn test_mcts_deterministic() {
        let game = ConnectFour;
        let run = |seed: u64| {
            let mut mcts = create_mcts::<ConnectFour>(seed, MctsConfig::with_samples(10).with_depth(12));
            mcts.decide(&game, &game.new_game()).unwrap().evaluations
        };

        assert_eq!(run(12345), run(12345));
    }

    #[test]
    fn test_mcts_finds_connect_four_win() {
        let game = ConnectFour;
        let mut state = game.new_game();
        for col in [3, 0, 3, 0, 3, 6] {
            state = game.apply_move(&state, &ConnectFourMove(col));
        }
        let mut mcts = create_mcts::<ConnectFour>(3, MctsConfig::with_samples(30).with_depth(20));

        let decision = mcts.decide(&game, &state).unwrap();

        assert_eq!(decision.chosen, ConnectFourMove(3));
        assert_eq!(decision.rule, SelectionRule::MinimizeLengthToVictory);
    }

    #[test]
    fn test_mcts_blocks_connect_four_threat() {
        let game = ConnectFour;
        let mut state = game.new_game();
        // Player one threatens column 3; player two to move must block
        for col in [3, 0, 3, 6, 3] {
            state = game.apply_move(&state, &ConnectFourMove(col));
        }
        let simulation = GreedyStrategy::new(ChaCha8Rng::seed_from_u64(9));
        let mut mcts = MctsStrategy::new(
            MctsConfig::with_samples(20).with_depth(20),
            simulation,
            ChaCha8Rng::seed_from_u64(8),
        )
        .unwrap();

        assert_eq!(mcts.pick_move(&game, &state).unwrap(), ConnectFourMove(3));
    }

    #[test]
    fn test_truncated_rollouts_use_heuristic() {
        let game = TicTacToe;
        let mut mcts = create_mcts::<TicTacToe>(1, MctsConfig::with_samples(5).with_depth(0))
            .with_heuristic(|_| 0.5);

        let decision = mcts.decide(&game, &game.new_game()).unwrap();

        for evaluation in &decision.evaluations {
            assert_eq!(evaluation.unfinished, 5);
            assert!((evaluation.normalized_score() - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_secondary_objective_breaks_flat_ties() {
        let game = TicTacToe;
        // Every rollout truncated at once with a flat heuristic: all candidates tie
        let mut mcts = create_mcts::<TicTacToe>(1, MctsConfig::with_samples(3).with_depth(0))
            .with_secondary_objective(|state| if state.get(4).is_some() { 1.0 } else { 0.0 });

        let decision = mcts.decide(&game, &game.new_game()).unwrap();

        assert_eq!(decision.chosen.0, 4);
        assert_eq!(decision.rule, SelectionRule::SecondaryObjective);
    }

    #[test]
    fn test_hidden_info_is_redrawn_per_rollout() {
        let game = RockPaperScissors;
        // Player one showed rock, but player two cannot see it
        let state = game.apply_move(&game.new_game(), &Rps::Rock);
        let mut mcts = create_mcts::<RockPaperScissors>(4, MctsConfig::with_samples(300));

        let decision = mcts.decide(&game, &state).unwrap();

        // Against a uniformly redrawn choice every reply is worth about zero
        for evaluation in &decision.evaluations {
            assert!(evaluation.normalized_score().abs() < 0.2);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let simulation = RandomStrategy::new(ChaCha8Rng::seed_from_u64(0));
        let result: Result<MctsStrategy<TicTacToe, _>> =
            MctsStrategy::new(MctsConfig::with_samples(0), simulation, ChaCha8Rng::seed_from_u64(0));
        assert!(matches!(result, Err(GambitError::InvalidConfig(_))));
    }

    #[test]
    fn test_nested_strategy() {
        let game = TicTacToe;
        let inner = create_mcts::<TicTacToe>(5, MctsConfig::with_samples(2));
        let mut outer =
            MctsStrategy::new(MctsConfig::with_samples(2), inner, ChaCha8Rng::seed_from_u64(6)).unwrap();

        let mut state = game.new_game();
        // X: 0, 1   O: 3, 4   -> X wins at 2
        for cell in [0, 3, 1, 4] {
            state = game.apply_move(&state, &crate::games::TicTacToeAction(cell));
        }

        let decision = outer.decide(&game, &state).unwrap();
        assert_eq!(decision.chosen.0, 2);
    }
}
