use rand::seq::SliceRandom;
use rand::Rng;

use crate::{full_deck, Card};

/// Cards dealt to each side at the start of a game.
pub const HAND_SIZE: usize = 3;

/// The draw pile. Cards are taken from the back.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build all 40 cards and shuffle them uniformly (Fisher-Yates).
    pub fn build_and_shuffle<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards }
    }

    /// A deck with a fixed order, the last card being drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Remove the next card, or `None` once the pile is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal three cards to each side, alternating and starting with the player.
    pub fn deal_initial(&mut self) -> (Vec<Card>, Vec<Card>) {
        let mut player = Vec::with_capacity(HAND_SIZE);
        let mut ai = Vec::with_capacity(HAND_SIZE);
        for _ in 0..HAND_SIZE {
            player.extend(self.draw());
            ai.extend(self.draw());
        }
        (player, ai)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
