//! Error types for the rules engine, the AI and configuration.

use thiserror::Error;

/// Failures raised by an AI strategy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// The caller asked for a card from an empty hand.
    #[error("AI asked to choose a card from an empty hand")]
    EmptyHand,
}

/// Rejected session inputs. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a trick is already being resolved")]
    Busy,
    #[error("card index {index} out of range for a hand of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no game in progress")]
    NotStarted,
    #[error("the game is over")]
    GameOver,
    #[error(transparent)]
    Ai(#[from] AiError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown difficulty {0:?}, expected easy, normal or hard")]
    UnknownDifficulty(String),
}
