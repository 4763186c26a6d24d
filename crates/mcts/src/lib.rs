//! Monte Carlo decision making for turn-based two-player games.
//!
//! This crate provides strategies that work with any game implementing the
//! `gambit_core::Game` trait, including games with hidden information.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **Determinization**: Hidden information is redrawn before every rollout
//! - **Pluggable Rollouts**: Any `Strategy` can drive the simulations,
//!   including another `MctsStrategy`
//! - **Pruning**: Optional confidence-bound pruning of hopeless candidates
//! - **Caching**: Optional reuse of evaluations across decisions
//! - **Baselines**: `RandomStrategy` and `GreedyStrategy`
//!
//! # Example
//!
//! ```
//! use gambit_core::{Game, Strategy};
//! use gambit_mcts::{games::TicTacToe, MctsConfig, MctsStrategy, RandomStrategy};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = TicTacToe;
//! let state = game.new_game();
//!
//! let config = MctsConfig::with_samples(50).pruned();
//! let simulation = RandomStrategy::new(ChaCha8Rng::seed_from_u64(7));
//! let mut mcts = MctsStrategy::new(config, simulation, ChaCha8Rng::seed_from_u64(42))?;
//!
//! let decision = mcts.decide(&game, &state)?;
//! println!("Best move: {:?} ({})", decision.chosen, decision.rule);
//! println!("Mood: {}", mcts.mood());
//! # Ok::<(), gambit_core::GambitError>(())
//! ```

pub mod arena;
pub mod cache;
pub mod config;
pub mod evaluation;
pub mod games;
pub mod greedy;
pub mod pruning;
pub mod random;
pub mod rollout;
pub mod search;

pub use arena::{play_match, MatchEnd, MatchResult};
pub use cache::{CacheStats, EvaluationCache};
pub use config::MctsConfig;
pub use evaluation::MoveEvaluation;
pub use greedy::GreedyStrategy;
pub use pruning::PruningController;
pub use random::RandomStrategy;
pub use rollout::{simulate_game, RolloutOutcome};
pub use search::{select_move, Decision, MctsStrategy, SelectionRule};
