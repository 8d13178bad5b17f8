use serde::Deserialize;
use tracing::warn;

use crate::ai::Difficulty;

pub const DIFFICULTY_VAR: &str = "BRISCA_DIFFICULTY";
pub const SEED_VAR: &str = "BRISCA_SEED";

/// Settings chosen when a game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    /// Fixes the shuffle and the AI's random choices.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read `BRISCA_DIFFICULTY` and `BRISCA_SEED`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let difficulty = lookup(DIFFICULTY_VAR)
            .map(|v| Difficulty::from_name(&v))
            .unwrap_or_default();
        let seed = lookup(SEED_VAR).and_then(|v| match v.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                warn!(value = %v, error = %e, "ignoring unparsable {}", SEED_VAR);
                None
            }
        });
        Self { difficulty, seed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_normal_without_seed() {
        let cfg = GameConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.difficulty, Difficulty::Normal);
    }

    #[test]
    fn reads_difficulty_and_seed() {
        let cfg = GameConfig::from_lookup(lookup(&[(DIFFICULTY_VAR, "hard"), (SEED_VAR, "42")]));
        assert_eq!(cfg.difficulty, Difficulty::Hard);
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = GameConfig::from_lookup(lookup(&[(DIFFICULTY_VAR, "nightmare"), (SEED_VAR, "x")]));
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn deserializes_with_missing_fields_defaulted() {
        use serde::de::value::{Error, MapDeserializer};

        let fields = vec![("difficulty", "hard")];
        let de: MapDeserializer<_, Error> = MapDeserializer::new(fields.into_iter());
        let cfg = GameConfig::deserialize(de).unwrap();
        assert_eq!(cfg, GameConfig::new(Difficulty::Hard));

        let de: MapDeserializer<_, Error> = MapDeserializer::new(Vec::<(&str, &str)>::new().into_iter());
        assert_eq!(GameConfig::deserialize(de).unwrap(), GameConfig::default());
    }
}
