//! Reference games for strategy validation.
//!
//! These games exercise every part of the contract: perfect information
//! (tic-tac-toe, connect four), a single hidden choice (rock-paper-scissors)
//! and hidden hands with draw piles (high card).

pub mod connect_four;
pub mod high_card;
pub mod rock_paper_scissors;
pub mod tictactoe;

pub use connect_four::{ConnectFour, ConnectFourMove, ConnectFourState};
pub use high_card::{Card, HighCard, HighCardState, Seat};
pub use rock_paper_scissors::{RockPaperScissors, Rps, RpsState};
pub use tictactoe::{TicTacToe, TicTacToeAction, TicTacToeState};
