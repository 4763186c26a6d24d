//! Property-based tests for the strategies.
//!
//! These tests verify invariants that must hold on any reachable position:
//! - Every strategy returns a legal move
//! - Greedy never misses an immediate win
//! - Determinization conserves hidden cards and leaves the mover untouched
//! - Same seed, same decision
//! - Pruning only ever removes rollouts

use gambit_core::{Game, GameState, Strategy as _};
use gambit_mcts::{
    games::{ConnectFour, HighCard, HighCardState, TicTacToe},
    GreedyStrategy, MctsConfig, MctsStrategy, RandomStrategy,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =============================================================================
// Strategies for generating test inputs
// =============================================================================

/// Generate a random seed
fn arb_seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play up to `plies` random legal moves from the initial position.
fn random_position<G: Game>(game: &G, start: G::State, plies: usize, seed: u64) -> G::State {
    let mut state = start;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for _ in 0..plies {
        if game.status(&state).is_terminal() {
            break;
        }
        let moves = game.valid_moves(&state);
        if moves.is_empty() {
            break;
        }
        let idx = rng.gen_range(0..moves.len());
        state = game.apply_move(&state, &moves[idx]);
    }

    state
}

fn arb_tictactoe_position() -> impl Strategy<Value = <TicTacToe as Game>::State> {
    (0usize..9, arb_seed()).prop_map(|(plies, seed)| {
        let game = TicTacToe;
        random_position(&game, game.new_game(), plies, seed)
    })
}

fn arb_connect_four_position() -> impl Strategy<Value = <ConnectFour as Game>::State> {
    (0usize..30, arb_seed()).prop_map(|(plies, seed)| {
        let game = ConnectFour;
        random_position(&game, game.new_game(), plies, seed)
    })
}

fn arb_high_card_position() -> impl Strategy<Value = HighCardState> {
    (0usize..12, arb_seed()).prop_map(|(plies, seed)| {
        let game = HighCard::default();
        let dealt = game.deal(&mut ChaCha8Rng::seed_from_u64(seed ^ 0x5eed));
        random_position(&game, dealt, plies, seed)
    })
}

fn create_mcts<G: Game + 'static>(seed: u64, config: MctsConfig) -> MctsStrategy<G, ChaCha8Rng> {
    let simulation = RandomStrategy::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    MctsStrategy::new(config, simulation, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

fn immediate_wins<G: Game>(game: &G, state: &G::State) -> Vec<G::Move> {
    let goal = state.active_player().goal();
    game.valid_moves(state)
        .into_iter()
        .filter(|mv| game.status(&game.apply_move(state, mv)) == goal)
        .collect()
}

// =============================================================================
// Legal moves
// =============================================================================

proptest! {
    #[test]
    fn prop_all_strategies_pick_legal_moves(
        seed in arb_seed(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.status(&state).is_terminal() {
            return Ok(());
        }
        let legal = game.valid_moves(&state);

        let mut random = RandomStrategy::new(ChaCha8Rng::seed_from_u64(seed));
        let mut greedy = GreedyStrategy::new(ChaCha8Rng::seed_from_u64(seed));
        let mut mcts = create_mcts::<TicTacToe>(seed, MctsConfig::with_samples(5));

        prop_assert!(legal.contains(&random.pick_move(&game, &state).unwrap()));
        prop_assert!(legal.contains(&greedy.pick_move(&game, &state).unwrap()));
        prop_assert!(legal.contains(&mcts.pick_move(&game, &state).unwrap()));
    }

    #[test]
    fn prop_mcts_evaluates_every_candidate(
        seed in arb_seed(),
        samples in 1u32..20,
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.status(&state).is_terminal() {
            return Ok(());
        }

        let mut mcts = create_mcts::<TicTacToe>(seed, MctsConfig::with_samples(samples));
        let decision = mcts.decide(&game, &state).unwrap();

        let moves: Vec<_> = decision.evaluations.iter().map(|e| e.mv).collect();
        prop_assert_eq!(moves, game.valid_moves(&state));
        for evaluation in &decision.evaluations {
            prop_assert_eq!(evaluation.trials, samples);
            let score = evaluation.normalized_score();
            prop_assert!((-1.0..=1.0).contains(&score), "score {} out of range", score);
        }
    }
}

// =============================================================================
// Greedy correctness
// =============================================================================

proptest! {
    #[test]
    fn prop_greedy_takes_immediate_win_tictactoe(
        seed in arb_seed(),
        state in arb_tictactoe_position()
    ) {
        let game = TicTacToe;
        if game.status(&state).is_terminal() {
            return Ok(());
        }
        let wins = immediate_wins(&game, &state);
        let mut greedy = GreedyStrategy::new(ChaCha8Rng::seed_from_u64(seed));

        let picked = greedy.pick_move(&game, &state).unwrap();

        if let Some(first) = wins.first() {
            prop_assert_eq!(picked, *first);
            prop_assert_eq!(gambit_core::Strategy::<TicTacToe>::mood(&greedy), "greedy");
        }
    }

    #[test]
    fn prop_greedy_takes_immediate_win_connect_four(
        seed in arb_seed(),
        state in arb_connect_four_position()
    ) {
        let game = ConnectFour;
        if game.status(&state).is_terminal() {
            return Ok(());
        }
        let wins = immediate_wins(&game, &state);
        let mut greedy = GreedyStrategy::new(ChaCha8Rng::seed_from_u64(seed));

        let picked = greedy.pick_move(&game, &state).unwrap();

        if let Some(first) = wins.first() {
            prop_assert_eq!(picked, *first);
        }
    }
}

// =============================================================================
// Determinization
// =============================================================================

proptest! {
    #[test]
    fn prop_randomize_conserves_hidden_cards(
        seed in arb_seed(),
        state in arb_high_card_position()
    ) {
        let game = HighCard::default();
        let mover = state.active_player();
        let hidden = mover.opponent();

        let redrawn = game.randomize_hidden_info(&state, &mut ChaCha8Rng::seed_from_u64(seed));

        prop_assert_eq!(redrawn.active_player(), mover);
        prop_assert_eq!(redrawn.seat(mover), state.seat(mover));
        prop_assert_eq!(redrawn.points(mover), state.points(mover));
        prop_assert_eq!(redrawn.points(hidden), state.points(hidden));
        prop_assert_eq!(redrawn.lead(), state.lead());
        prop_assert_eq!(redrawn.seat(hidden).hand.len(), state.seat(hidden).hand.len());

        let mut before = state.seat(hidden).concealed();
        let mut after = redrawn.seat(hidden).concealed();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }
}

// =============================================================================
// Determinism and pruning
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_deterministic(
        seed in arb_seed(),
        state in arb_connect_four_position()
    ) {
        let game = ConnectFour;
        if game.status(&state).is_terminal() {
            return Ok(());
        }

        let run = || {
            let config = MctsConfig::with_samples(8).with_depth(15).pruned();
            let mut mcts = create_mcts::<ConnectFour>(seed, config);
            mcts.decide(&game, &state).unwrap()
        };

        let first = run();
        let second = run();

        prop_assert_eq!(first.chosen, second.chosen);
        prop_assert_eq!(first.rollouts, second.rollouts);
        prop_assert_eq!(first.evaluations, second.evaluations);
    }

    #[test]
    fn prop_pruning_only_removes_rollouts(
        seed in arb_seed(),
        state in arb_connect_four_position()
    ) {
        let game = ConnectFour;
        if game.status(&state).is_terminal() {
            return Ok(());
        }
        let candidates = game.valid_moves(&state).len() as u64;

        let mut config = MctsConfig::with_samples(20).with_depth(15).pruned();
        config.pruning_period = 5;
        let mut mcts = create_mcts::<ConnectFour>(seed, config);
        let decision = mcts.decide(&game, &state).unwrap();

        prop_assert!(decision.rollouts <= 20 * candidates);
        prop_assert!(decision.pruned < decision.evaluations.len());
        prop_assert!(decision.evaluations.iter().all(|e| e.trials >= 5 && e.trials <= 20));
    }
}
