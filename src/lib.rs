use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Oros,
    Copas,
    Espadas,
    Bastos,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Oros, Suit::Copas, Suit::Espadas, Suit::Bastos];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Suit::Oros => "Oros",
            Suit::Copas => "Copas",
            Suit::Espadas => "Espadas",
            Suit::Bastos => "Bastos",
        };
        write!(f, "{}", s)
    }
}

/// Face value of a Spanish deck card. There are no 8s or 9s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    /// Sota, 10
    Jack,
    /// Caballo, 11
    Knight,
    /// Rey, 12
    King,
}

impl Value {
    pub const ALL: [Value; 10] = [
        Value::Ace,
        Value::Two,
        Value::Three,
        Value::Four,
        Value::Five,
        Value::Six,
        Value::Seven,
        Value::Jack,
        Value::Knight,
        Value::King,
    ];

    /// The number printed on the card.
    pub fn number(self) -> u8 {
        match self {
            Value::Ace => 1,
            Value::Two => 2,
            Value::Three => 3,
            Value::Four => 4,
            Value::Five => 5,
            Value::Six => 6,
            Value::Seven => 7,
            Value::Jack => 10,
            Value::Knight => 11,
            Value::King => 12,
        }
    }

    pub fn from_number(n: u8) -> Option<Value> {
        Value::ALL.into_iter().find(|v| v.number() == n)
    }

    /// Points scored when the card is captured in a trick.
    pub fn points(self) -> u32 {
        match self {
            Value::Ace => 11,
            Value::Three => 10,
            Value::King => 4,
            Value::Knight => 3,
            Value::Jack => 2,
            _ => 0,
        }
    }

    /// Trick-taking strength within a suit, 0 (Two) to 9 (Ace).
    pub fn rank(self) -> u8 {
        match self {
            Value::Ace => 9,
            Value::Three => 8,
            Value::King => 7,
            Value::Knight => 6,
            Value::Jack => 5,
            Value::Seven => 4,
            Value::Six => 3,
            Value::Five => 2,
            Value::Four => 1,
            Value::Two => 0,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub value: Value,
}

impl Card {
    pub fn new(suit: Suit, value: Value) -> Self {
        Self { suit, value }
    }

    pub fn points(&self) -> u32 {
        self.value.points()
    }

    pub fn rank(&self) -> u8 {
        self.value.rank()
    }

    pub fn is_trump(&self, trump: Suit) -> bool {
        self.suit == trump
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.value, self.suit)
    }
}

/// Number of cards in a Spanish deck without 8s and 9s.
pub const DECK_SIZE: usize = 40;

/// Total points available in one game.
pub const TOTAL_POINTS: u32 = 120;

/// Return the 40 Brisca cards in suit-major order
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for &suit in &Suit::ALL {
        for &value in &Value::ALL {
            cards.push(Card::new(suit, value));
        }
    }
    cards
}

pub mod ai;
pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod player;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use ai::Difficulty;
pub use config::GameConfig;
pub use deck::Deck;
pub use error::{AiError, ConfigError, GameError};
pub use game::{resolve_trick, GameEvent, GameResult, Phase, Session, Side, TrickOutcome};
