use rand::{Rng, RngCore};

use super::{ensure_cards, PlayContext, Strategy};
use crate::error::AiError;
use crate::Card;

/// Plays a uniformly random card, leading or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlayer;

impl Strategy for RandomPlayer {
    fn choose_card_index(
        &self,
        hand: &[Card],
        _lead: Option<Card>,
        _ctx: &PlayContext<'_>,
        rng: &mut dyn RngCore,
    ) -> Result<usize, AiError> {
        ensure_cards(hand)?;
        Ok(rng.gen_range(0..hand.len()))
    }
}
