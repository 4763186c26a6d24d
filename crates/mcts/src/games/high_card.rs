//! High card: a small trick-taking game with hidden hands.
//!
//! Each player owns a hand and a face-down draw pile. Players take turns
//! playing one card into a two-card trick; the higher card scores a point
//! and its owner leads the next trick. After every trick both players draw
//! back up from their own pile. When every card is played the player with
//! more points wins.
//!
//! Hidden information: a player sees their own hand but not the opponent's
//! hand, and neither pile's order. The card led into the current trick is
//! face up.

use gambit_core::{Game, GameState, GameStatus, Player};
use rand::seq::SliceRandom;
use rand::Rng;

/// One player's cards.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Seat {
    /// Cards in hand, kept sorted so equal hands compare equal.
    pub hand: Vec<u8>,
    /// Draw pile, drawn from the back.
    pub pile: Vec<u8>,
}

impl Seat {
    fn draw(&mut self) {
        if let Some(card) = self.pile.pop() {
            self.hand.push(card);
            self.hand.sort_unstable();
        }
    }

    fn remove(&mut self, card: u8) {
        let index = self
            .hand
            .iter()
            .position(|&c| c == card)
            .unwrap_or_else(|| panic!("illegal high card move: {} is not in hand", card));
        self.hand.remove(index);
    }

    /// Every card this seat still holds, hand first.
    pub fn concealed(&self) -> Vec<u8> {
        self.hand.iter().chain(self.pile.iter()).copied().collect()
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct HighCardState {
    seats: [Seat; 2],
    points: [u8; 2],
    /// Card led into the current trick and who led it.
    lead: Option<(Player, u8)>,
    active: Player,
}

impl HighCardState {
    pub fn seat(&self, player: Player) -> &Seat {
        &self.seats[Self::index(player)]
    }

    pub fn points(&self, player: Player) -> u8 {
        self.points[Self::index(player)]
    }

    pub fn lead(&self) -> Option<(Player, u8)> {
        self.lead
    }

    fn seat_mut(&mut self, player: Player) -> &mut Seat {
        &mut self.seats[Self::index(player)]
    }

    fn index(player: Player) -> usize {
        match player {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    fn cards_left(&self) -> usize {
        self.seats
            .iter()
            .map(|s| s.hand.len() + s.pile.len())
            .sum()
    }
}

impl GameState for HighCardState {
    fn active_player(&self) -> Player {
        self.active
    }
}

/// Play a card from hand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card(pub u8);

/// High card game rules.
#[derive(Clone, Debug)]
pub struct HighCard {
    /// Card values run from 1 to `ranks`.
    pub ranks: u8,
    /// Copies of each value in the deck.
    pub copies: u8,
    /// Cards each player holds in hand.
    pub hand_size: usize,
}

impl Default for HighCard {
    fn default() -> Self {
        Self {
            ranks: 6,
            copies: 2,
            hand_size: 3,
        }
    }
}

impl HighCard {
    /// Full deck, sorted.
    pub fn deck(&self) -> Vec<u8> {
        (1..=self.ranks)
            .flat_map(|rank| std::iter::repeat(rank).take(self.copies as usize))
            .collect()
    }

    /// Shuffle the deck and deal it.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> HighCardState {
        let mut deck = self.deck();
        deck.shuffle(rng);
        self.deal_from(deck)
    }

    /// Deal alternately from the back of `deck`, then fill hands from the piles.
    fn deal_from(&self, mut deck: Vec<u8>) -> HighCardState {
        let mut seats = [Seat::default(), Seat::default()];
        let mut turn = 0;
        while let Some(card) = deck.pop() {
            seats[turn].pile.push(card);
            turn = 1 - turn;
        }
        for seat in seats.iter_mut() {
            for _ in 0..self.hand_size {
                seat.draw();
            }
        }
        HighCardState {
            seats,
            points: [0, 0],
            lead: None,
            active: Player::One,
        }
    }

    /// Point balance for truncated rollouts. Positive favours player one.
    pub fn heuristic(&self, state: &HighCardState) -> f64 {
        let tricks = f64::from(self.ranks) * f64::from(self.copies) / 2.0;
        (f64::from(state.points[0]) - f64::from(state.points[1])) / tricks
    }
}

impl Game for HighCard {
    type State = HighCardState;
    type Move = Card;

    /// Deterministic deal of the sorted deck. Use [`HighCard::deal`] for a shuffled one.
    fn new_game(&self) -> Self::State {
        self.deal_from(self.deck())
    }

    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Move> {
        let mut hand = state.seat(state.active).hand.clone();
        hand.dedup();
        hand.into_iter().map(Card).collect()
    }

    fn sensible_moves(&self, _state: &Self::State) -> Vec<Self::Move> {
        Vec::new()
    }

    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State {
        let mut next = state.clone();
        let player = state.active;
        next.seat_mut(player).remove(mv.0);

        match state.lead {
            None => {
                next.lead = Some((player, mv.0));
                next.active = player.opponent();
            }
            Some((leader, led)) => {
                next.lead = None;
                let trick_winner = if mv.0 > led {
                    Some(player)
                } else if led > mv.0 {
                    Some(leader)
                } else {
                    None
                };
                if let Some(winner) = trick_winner {
                    next.points[HighCardState::index(winner)] += 1;
                }
                next.active = trick_winner.unwrap_or(player);
                next.seat_mut(Player::One).draw();
                next.seat_mut(Player::Two).draw();
            }
        }
        next
    }

    fn status(&self, state: &Self::State) -> GameStatus {
        if state.cards_left() > 0 {
            return GameStatus::InPlay;
        }
        match state.points[0].cmp(&state.points[1]) {
            std::cmp::Ordering::Greater => GameStatus::Win,
            std::cmp::Ordering::Less => GameStatus::Lose,
            std::cmp::Ordering::Equal => GameStatus::Draw,
        }
    }

    /// Return the opponent's hand to their pile, shuffle, and redraw a hand
    /// of the same size. The active player's seat is untouched.
    fn randomize_hidden_info<R: Rng + ?Sized>(&self, state: &Self::State, rng: &mut R) -> Self::State {
        let mut next = state.clone();
        let seat = next.seat_mut(state.active.opponent());

        let hand_len = seat.hand.len();
        let mut pool = seat.concealed();
        pool.shuffle(rng);
        let mut hand = pool.split_off(pool.len() - hand_len);
        hand.sort_unstable();

        seat.hand = hand;
        seat.pile = pool;
        next
    }
}
