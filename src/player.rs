use crate::error::GameError;
use crate::Card;

/// One side of the table: its hand and the cards it has captured.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub hand: Vec<Card>,
    pub won: Vec<Card>,
    pub points: u32,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.hand.clear();
        self.won.clear();
        self.points = 0;
    }

    /// Remove and return the card at `idx`. The hand is untouched on error.
    pub fn play_card(&mut self, idx: usize) -> Result<Card, GameError> {
        if idx >= self.hand.len() {
            return Err(GameError::IndexOutOfRange {
                index: idx,
                len: self.hand.len(),
            });
        }
        Ok(self.hand.remove(idx))
    }

    pub fn take_trick(&mut self, cards: [Card; 2], points: u32) {
        self.won.extend(cards);
        self.points += points;
    }
}
