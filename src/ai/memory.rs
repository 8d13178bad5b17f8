//! Card counting for the hard AI.
//!
//! Everything not in the AI's hand, not yet played and not face up on the
//! table is "unseen": the opponent's hand and the draw pile.

use std::collections::HashSet;

use super::PlayContext;
use crate::{full_deck, Card, Suit, Value};

/// Cards per suit.
pub const SUIT_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Early,
    Mid,
    Late,
}

impl GamePhase {
    pub fn from_deck(remaining: usize) -> Self {
        match remaining {
            r if r > 15 => GamePhase::Early,
            r if r > 6 => GamePhase::Mid,
            _ => GamePhase::Late,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSituation {
    WinningBig,
    Winning,
    Close,
    Losing,
    LosingBig,
}

impl ScoreSituation {
    /// `diff` is own points minus opponent points.
    pub fn from_diff(diff: i64) -> Self {
        match diff {
            d if d > 15 => ScoreSituation::WinningBig,
            d if d > 5 => ScoreSituation::Winning,
            d if d < -15 => ScoreSituation::LosingBig,
            d if d < -5 => ScoreSituation::Losing,
            _ => ScoreSituation::Close,
        }
    }

    pub fn is_losing(self) -> bool {
        matches!(self, ScoreSituation::Losing | ScoreSituation::LosingBig)
    }
}

/// What the AI can infer about the cards still in play.
#[derive(Debug, Clone)]
pub struct Knowledge {
    pub trump: Suit,
    pub phase: GamePhase,
    pub score: ScoreSituation,
    unseen: HashSet<Card>,
    played: [usize; 4],
    unseen_by_suit: [usize; 4],
    held: [usize; 4],
}

impl Knowledge {
    /// `lead` is the opponent's card in the current trick, if any.
    pub fn new(hand: &[Card], lead: Option<Card>, ctx: &PlayContext<'_>) -> Self {
        let mut unseen: HashSet<Card> = full_deck().into_iter().collect();
        let mut played = [0usize; 4];
        let mut held = [0usize; 4];
        for card in hand {
            unseen.remove(card);
            held[card.suit.index()] += 1;
        }
        for card in ctx.played {
            unseen.remove(card);
            played[card.suit.index()] += 1;
        }
        for card in lead.iter().chain(ctx.trump_card.iter()) {
            unseen.remove(card);
        }
        let mut unseen_by_suit = [0usize; 4];
        for card in &unseen {
            unseen_by_suit[card.suit.index()] += 1;
        }
        let diff = i64::from(ctx.own_points) - i64::from(ctx.opponent_points);
        Self {
            trump: ctx.trump_suit,
            phase: GamePhase::from_deck(ctx.deck_remaining),
            score: ScoreSituation::from_diff(diff),
            unseen,
            played,
            unseen_by_suit,
            held,
        }
    }

    pub fn is_unseen(&self, card: Card) -> bool {
        self.unseen.contains(&card)
    }

    pub fn unseen_in(&self, suit: Suit) -> usize {
        self.unseen_by_suit[suit.index()]
    }

    pub fn played_in(&self, suit: Suit) -> usize {
        self.played[suit.index()]
    }

    pub fn held_in(&self, suit: Suit) -> usize {
        self.held[suit.index()]
    }

    pub fn unseen_trumps(&self) -> usize {
        self.unseen_in(self.trump)
    }

    pub fn held_trumps(&self) -> usize {
        self.held_in(self.trump)
    }

    /// Trumps unseen or in hand. The face-up trump is not counted.
    pub fn live_trumps(&self) -> usize {
        self.unseen_trumps() + self.held_trumps()
    }

    /// Strongest unseen card of `suit`.
    pub fn top_unseen(&self, suit: Suit) -> Option<Card> {
        Value::ALL
            .iter()
            .map(|&v| Card::new(suit, v))
            .filter(|&c| self.is_unseen(c))
            .max_by_key(Card::rank)
    }
}
