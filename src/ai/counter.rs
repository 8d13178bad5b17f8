//! Hard difficulty.
//!
//! Counts every card played so far and weighs each decision by how much of
//! the deck is left and how the score stands. Fully deterministic.

use rand::RngCore;

use super::memory::{GamePhase, Knowledge, ScoreSituation, SUIT_SIZE};
use super::{any_card, ensure_cards, pick_max, pick_min, PlayContext, Strategy};
use crate::error::AiError;
use crate::{Card, Suit, Value};

/// Winning a trick worth at least this much is played with a margin.
const BIG_TRICK: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Counter;

/// Points first, then rank: the card's overall worth to its holder.
fn worth(c: &Card) -> (u32, u8) {
    (c.points(), c.rank())
}

fn is_ace_or_three(c: &Card) -> bool {
    matches!(c.value, Value::Ace | Value::Three)
}

impl Counter {
    fn lead(hand: &[Card], k: &Knowledge, ctx: &PlayContext<'_>) -> Option<usize> {
        let trump = k.trump;
        let side_suits = || {
            Suit::ALL
                .into_iter()
                .filter(move |&s| s != trump && k.held_in(s) > 0)
        };

        match k.phase {
            GamePhase::Early => {
                // Holding every outstanding card of a suit.
                if let Some(suit) = side_suits().find(|&s| k.unseen_in(s) == 0) {
                    return pick_max(hand, |c| c.suit == suit, worth);
                }
                // Mostly played out: the opponent is probably void.
                if let Some(suit) = side_suits().find(|&s| k.played_in(s) > SUIT_SIZE - 3) {
                    return pick_min(hand, |c| c.suit == suit, Card::rank);
                }
            }
            GamePhase::Mid => {
                if k.unseen_trumps() == 0 {
                    if let Some(i) = pick_max(hand, |c| c.points() >= 10, worth) {
                        return Some(i);
                    }
                }
                if k.score.is_losing() {
                    if let Some(i) = pick_max(hand, |c| (3..=9).contains(&c.points()), worth) {
                        return Some(i);
                    }
                }
            }
            GamePhase::Late => {
                if k.held_trumps() > k.unseen_trumps() {
                    if let Some(i) = pick_max(hand, |c| !c.is_trump(trump), worth) {
                        return Some(i);
                    }
                }
                if k.score == ScoreSituation::LosingBig && ctx.deck_remaining <= 2 {
                    return pick_max(hand, any_card, worth);
                }
            }
        }

        if let Some(i) = pick_max(
            hand,
            |c| !c.is_trump(trump) && is_ace_or_three(c) && k.unseen_in(c.suit) <= 2,
            worth,
        ) {
            return Some(i);
        }

        // Long, cheap side suits are the safest to lead from.
        let dominant = side_suits()
            .filter(|&s| k.held_in(s) >= 2)
            .max_by_key(|&s| {
                let points: u32 = hand.iter().filter(|c| c.suit == s).map(Card::points).sum();
                (k.held_in(s) as i64 * 10 - i64::from(points), std::cmp::Reverse(s))
            });
        if let Some(suit) = dominant {
            return pick_min(hand, |c| c.suit == suit, Card::rank);
        }

        pick_min(hand, any_card, |c| (c.points(), c.is_trump(trump), c.rank()))
    }

    fn follow(hand: &[Card], lead: Card, k: &Knowledge, ctx: &PlayContext<'_>) -> Option<usize> {
        let trump = k.trump;

        let mut value = f64::from(lead.points());
        if k.phase == GamePhase::Late {
            value *= 1.5;
        }
        if k.score.is_losing() {
            value *= 1.3;
        }
        if k.live_trumps() <= 3 && !lead.is_trump(trump) {
            value *= 0.7;
        }
        let threshold = match k.phase {
            GamePhase::Early => 3.0,
            GamePhase::Mid => 2.0,
            GamePhase::Late => 1.0,
        };
        let must_catch_up = ctx.deck_remaining <= 4 && ctx.own_points < ctx.opponent_points;

        if value >= threshold || must_catch_up {
            Self::take(hand, lead, value, k)
        } else {
            Self::concede(hand, lead, k, ctx)
        }
    }

    fn take(hand: &[Card], lead: Card, value: f64, k: &Knowledge) -> Option<usize> {
        let trump = k.trump;
        let mut winners: Vec<usize> = (0..hand.len())
            .filter(|&i| hand[i].suit == lead.suit && hand[i].rank() > lead.rank())
            .collect();
        winners.sort_by_key(|&i| hand[i].rank());
        match winners.as_slice() {
            [_, second, ..] if value >= BIG_TRICK => return Some(*second),
            [first, ..] => return Some(*first),
            [] => {}
        }
        if !lead.is_trump(trump) {
            if let Some(i) = pick_min(hand, |c| c.is_trump(trump), Card::rank) {
                return Some(i);
            }
        }
        Self::dump(hand, k)
    }

    /// Cheapest side card, choosing the suit by phase.
    fn dump(hand: &[Card], k: &Knowledge) -> Option<usize> {
        let trump = k.trump;
        let has_side = hand.iter().any(|c| !c.is_trump(trump));
        let suit_cost = |s: Suit| match k.phase {
            // Shed from long suits and keep short ones guarded.
            GamePhase::Early | GamePhase::Mid => SUIT_SIZE - k.held_in(s),
            // Shed from suits the opponent can still contest.
            GamePhase::Late => SUIT_SIZE - k.unseen_in(s),
        };
        pick_min(
            hand,
            |c| !has_side || !c.is_trump(trump),
            |c| (c.points(), suit_cost(c.suit), c.rank()),
        )
    }

    fn concede(hand: &[Card], lead: Card, k: &Knowledge, ctx: &PlayContext<'_>) -> Option<usize> {
        let trump = k.trump;

        if !lead.is_trump(trump) {
            if lead.points() > 0 {
                let free = pick_min(
                    hand,
                    |c| c.suit == lead.suit && c.rank() > lead.rank() && c.points() == 0,
                    Card::rank,
                );
                if free.is_some() {
                    return free;
                }
            }
            if let Some(i) = pick_min(hand, |c| c.suit == lead.suit && c.points() == 0, Card::rank) {
                return Some(i);
            }
        }

        // With the pile empty every unseen card is in the opponent's hand.
        if ctx.deck_remaining == 0 && ctx.trump_card.is_none() {
            let doomed = |s: Suit| {
                let ours = hand.iter().filter(|c| c.suit == s).map(Card::rank).max();
                match (ours, k.top_unseen(s)) {
                    (Some(ours), Some(theirs)) => theirs.rank() > ours,
                    _ => false,
                }
            };
            if let Some(i) = pick_min(
                hand,
                |c| !c.is_trump(trump) && doomed(c.suit),
                |c| (c.points(), c.rank()),
            ) {
                return Some(i);
            }
        }

        pick_min(
            hand,
            |c| !(c.is_trump(trump) && is_ace_or_three(c)),
            |c| (c.points(), c.is_trump(trump), c.rank()),
        )
        .or_else(|| pick_min(hand, any_card, |c| (c.points(), c.rank())))
    }
}

impl Strategy for Counter {
    fn choose_card_index(
        &self,
        hand: &[Card],
        lead: Option<Card>,
        ctx: &PlayContext<'_>,
        _rng: &mut dyn RngCore,
    ) -> Result<usize, AiError> {
        ensure_cards(hand)?;
        let k = Knowledge::new(hand, lead, ctx);
        let idx = match lead {
            None => Self::lead(hand, &k, ctx),
            Some(card) => Self::follow(hand, card, &k, ctx),
        };
        idx.ok_or(AiError::EmptyHand)
    }
}
