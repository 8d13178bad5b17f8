//! Normal difficulty.
//!
//! Leads at random. When responding it wins as cheaply as it can and
//! otherwise throws its least valuable card. It keeps no history.

use rand::{Rng, RngCore};

use super::{any_card, ensure_cards, pick_min, PlayContext, Strategy};
use crate::error::AiError;
use crate::Card;

#[derive(Debug, Clone, Copy, Default)]
pub struct Heuristic;

impl Heuristic {
    fn respond(hand: &[Card], lead: Card, ctx: &PlayContext<'_>) -> Option<usize> {
        let trump = ctx.trump_suit;
        let has_trump = hand.iter().any(|c| c.is_trump(trump));
        let has_suit = hand.iter().any(|c| c.suit == lead.suit);
        let outranks = |c: &Card| c.suit == lead.suit && c.rank() > lead.rank();

        if lead.is_trump(trump) {
            if has_trump {
                return pick_min(hand, outranks, Card::rank).or_else(|| {
                    pick_min(
                        hand,
                        |c| c.is_trump(trump) || c.suit == lead.suit,
                        Card::points,
                    )
                });
            }
            return pick_min(hand, any_card, Card::points);
        }

        // Beating the lead in its own suit keeps trumps for later.
        if let Some(i) = pick_min(hand, outranks, Card::rank) {
            return Some(i);
        }
        if has_trump {
            return pick_min(hand, |c| c.is_trump(trump), Card::rank);
        }
        if has_suit {
            return pick_min(hand, |c| c.suit == lead.suit, Card::points);
        }
        pick_min(hand, any_card, Card::points)
    }
}

impl Strategy for Heuristic {
    fn choose_card_index(
        &self,
        hand: &[Card],
        lead: Option<Card>,
        ctx: &PlayContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AiError> {
        ensure_cards(hand)?;
        let Some(lead) = lead else {
            return Ok(rng.gen_range(0..hand.len()));
        };
        Self::respond(hand, lead, ctx).ok_or(AiError::EmptyHand)
    }
}
