//! Computer opponent.
//!
//! Three strategies share the [`Strategy`] capability:
//! - [`RandomPlayer`] (easy): any card, uniformly.
//! - [`Heuristic`] (normal): random lead, cheapest winning response.
//! - [`Counter`] (hard): tracks played cards and adapts to game phase and score.
//!
//! Strategies only look at what they are handed and return an index into the
//! hand; the session applies the play.

use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{AiError, ConfigError};
use crate::{Card, Suit};

mod counter;
mod heuristic;
pub mod memory;
mod random;

pub use counter::Counter;
pub use heuristic::Heuristic;
pub use memory::{GamePhase, Knowledge, ScoreSituation};
pub use random::RandomPlayer;

/// What the AI can see when it is asked for a card.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub trump_suit: Suit,
    /// The face-up trump card, until it is picked up with the last draw.
    pub trump_card: Option<Card>,
    pub deck_remaining: usize,
    pub own_points: u32,
    pub opponent_points: u32,
    /// Cards from every completed trick, both sides.
    pub played: &'a [Card],
}

/// Picks which card to play.
pub trait Strategy {
    /// Return an index into `hand`. `lead` is the opponent's card when
    /// responding and `None` when leading.
    fn choose_card_index(
        &self,
        hand: &[Card],
        lead: Option<Card>,
        ctx: &PlayContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    /// Lenient parse used for user-facing settings: unknown names become
    /// `Normal` with a warning.
    pub fn from_name(name: &str) -> Self {
        match name.parse() {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "falling back to normal difficulty");
                Difficulty::Normal
            }
        }
    }

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Difficulty::Easy => &RandomPlayer,
            Difficulty::Normal => &Heuristic,
            Difficulty::Hard => &Counter,
        }
    }

    pub fn choose_card_index(
        self,
        hand: &[Card],
        lead: Option<Card>,
        ctx: &PlayContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AiError> {
        if hand.is_empty() {
            error!(difficulty = self.name(), "AI asked to play from an empty hand");
            return Err(AiError::EmptyHand);
        }
        let idx = self.strategy().choose_card_index(hand, lead, ctx, rng)?;
        debug!(
            difficulty = self.name(),
            card = %hand[idx],
            leading = lead.is_none(),
            "AI chose card"
        );
        Ok(idx)
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn ensure_cards(hand: &[Card]) -> Result<(), AiError> {
    if hand.is_empty() {
        Err(AiError::EmptyHand)
    } else {
        Ok(())
    }
}

/// Index of the first card matching `pred` with the smallest key.
fn pick_min<K: Ord>(
    hand: &[Card],
    pred: impl Fn(&Card) -> bool,
    key: impl Fn(&Card) -> K,
) -> Option<usize> {
    hand.iter()
        .enumerate()
        .filter(|(_, c)| pred(*c))
        .min_by_key(|(_, c)| key(*c))
        .map(|(i, _)| i)
}

/// Index of the first card matching `pred` with the largest key.
fn pick_max<K: Ord>(
    hand: &[Card],
    pred: impl Fn(&Card) -> bool,
    key: impl Fn(&Card) -> K,
) -> Option<usize> {
    pick_min(hand, pred, |c| std::cmp::Reverse(key(c)))
}

fn any_card(_: &Card) -> bool {
    true
}
