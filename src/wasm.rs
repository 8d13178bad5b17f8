use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use crate::ai::Difficulty;
use crate::config::GameConfig;
use crate::game::{GameEvent, Session, Side};

#[wasm_bindgen]
pub struct WasmGame {
    inner: Session,
}

#[derive(Serialize)]
struct JsCard {
    suit: String,
    value: u8,
    points: u32,
    label: String,
}

impl From<crate::Card> for JsCard {
    fn from(c: crate::Card) -> Self {
        JsCard {
            suit: c.suit.to_string(),
            value: c.value.number(),
            points: c.points(),
            label: c.to_string(),
        }
    }
}

/// An event plus the status line the page shows for it.
#[derive(Serialize)]
struct JsEvent {
    text: String,
    #[serde(flatten)]
    event: GameEvent,
}

fn events_to_js(events: Vec<GameEvent>) -> Result<JsValue, JsValue> {
    let events: Vec<JsEvent> = events
        .into_iter()
        .map(|event| JsEvent {
            text: event.to_string(),
            event,
        })
        .collect();
    to_js(&events)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    swb::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
impl WasmGame {
    /// Unknown difficulty names fall back to normal.
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str) -> WasmGame {
        WasmGame {
            inner: Session::new(GameConfig::new(Difficulty::from_name(difficulty))),
        }
    }

    /// Build from a `{ difficulty, seed }` object; missing fields take defaults.
    pub fn with_config(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = swb::from_value(config)?;
        Ok(WasmGame {
            inner: Session::new(config),
        })
    }

    /// Deal a fresh game. Returns the event list.
    pub fn new_game(&mut self) -> Result<JsValue, JsValue> {
        events_to_js(self.inner.new_game())
    }

    pub fn submit_player_card(&mut self, index: usize) -> Result<JsValue, JsValue> {
        let events = self
            .inner
            .submit_player_card(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        events_to_js(events)
    }

    pub fn hand(&self) -> Result<JsValue, JsValue> {
        let cards: Vec<JsCard> = self
            .inner
            .hand(Side::Player)
            .iter()
            .copied()
            .map(JsCard::from)
            .collect();
        to_js(&cards)
    }

    pub fn ai_hand_size(&self) -> usize {
        self.inner.hand(Side::Ai).len()
    }

    pub fn trump_card(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.trump_card.map(JsCard::from))
    }

    pub fn trump_suit(&self) -> Option<String> {
        self.inner.trump_suit.map(|s| s.to_string())
    }

    pub fn pending_lead(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.pending_lead().map(JsCard::from))
    }

    pub fn scores(&self) -> Vec<u32> {
        let (player, ai) = self.inner.scores();
        vec![player, ai]
    }

    pub fn deck_remaining(&self) -> usize {
        self.inner.deck_remaining()
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.inner.phase())
    }

    pub fn is_processing(&self) -> bool {
        self.inner.is_processing()
    }

    pub fn player_leads(&self) -> bool {
        self.inner.player_leads()
    }

    pub fn difficulty(&self) -> String {
        self.inner.difficulty().to_string()
    }
}
