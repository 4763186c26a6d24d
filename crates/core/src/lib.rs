//! Gambit Core - Game and strategy contracts
//!
//! This crate provides the abstract capability sets shared by every game and
//! every move-selection policy. It contains no search logic.
//!
//! # Types
//!
//! - [`Game`] - Trait for game rule implementations
//! - [`Strategy`] - Trait for move-selection policies
//! - [`GameStatus`] - Terminal status, oriented so that player one wins with `Win`
//! - [`Player`] - The two seats, with their goal status and score sign

mod error;
mod game;
mod strategy;
mod types;

pub use error::{GambitError, Result};
pub use game::{Game, GameState};
pub use strategy::Strategy;
pub use types::{GameStatus, Player};
