use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::ai::{Difficulty, PlayContext};
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::{AiError, GameError};
use crate::player::Player;
use crate::{Card, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Ai => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "You"),
            Side::Ai => write!(f, "GPT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrickOutcome {
    pub winner: Side,
    /// Both cards' points, all awarded to the winner.
    pub points: u32,
}

/// Decide a two-card trick.
///
/// Trump beats everything else; between two trumps the higher rank wins. With
/// no trump on the table the follower only wins by playing a higher card of
/// the led suit.
pub fn resolve_trick(lead: Card, follow: Card, lead_side: Side, trump: Suit) -> TrickOutcome {
    let follower_wins = match (lead.is_trump(trump), follow.is_trump(trump)) {
        (true, true) => follow.rank() > lead.rank(),
        (true, false) => false,
        (false, true) => true,
        (false, false) => follow.suit == lead.suit && follow.rank() > lead.rank(),
    };
    TrickOutcome {
        winner: if follower_wins {
            lead_side.other()
        } else {
            lead_side
        },
        points: lead.points() + follow.points(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Dealing,
    AwaitingLead,
    AwaitingResponse,
    ResolvingTrick,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    PlayerWins,
    AiWins,
    Tie,
}

impl GameResult {
    pub fn from_points(player: u32, ai: u32) -> Self {
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => GameResult::PlayerWins,
            std::cmp::Ordering::Less => GameResult::AiWins,
            std::cmp::Ordering::Equal => GameResult::Tie,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameResult::PlayerWins => "You win!",
            GameResult::AiWins => "GPT wins",
            GameResult::Tie => "It's a tie!",
        };
        write!(f, "{}", s)
    }
}

/// What happened during one input, in order, for the UI to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted {
        trump: Card,
        difficulty: Difficulty,
    },
    CardPlayed {
        side: Side,
        card: Card,
    },
    TrickResolved {
        winner: Side,
        points: u32,
        cards: [Card; 2],
    },
    /// The trump card left the table and joined `side`'s hand.
    TrumpTaken {
        side: Side,
        card: Card,
    },
    /// `cards` is only filled in for the human's hand.
    HandUpdated {
        side: Side,
        count: usize,
        cards: Option<Vec<Card>>,
    },
    GameOver {
        player_points: u32,
        ai_points: u32,
        result: GameResult,
    },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { trump, difficulty } => {
                write!(f, "New {} game, trump card is {}", difficulty, trump)
            }
            GameEvent::CardPlayed { side, card } => write!(f, "{} played {}", side, card),
            GameEvent::TrickResolved {
                winner: Side::Player,
                points,
                ..
            } => write!(f, "You win the trick and gain {} points!", points),
            GameEvent::TrickResolved { points, .. } => {
                write!(f, "GPT wins the trick and gains {} points.", points)
            }
            GameEvent::TrumpTaken { side, card } => write!(f, "{} picked up the trump {}", side, card),
            GameEvent::HandUpdated { side, count, .. } => {
                write!(f, "{} now holding {} cards", side, count)
            }
            GameEvent::GameOver {
                player_points,
                ai_points,
                result,
            } => write!(
                f,
                "Game over. You: {}, GPT: {}. {}",
                player_points, ai_points, result
            ),
        }
    }
}

/// One game against the computer.
///
/// Lifecycle: `Dealing` until [`Session::new_game`], then alternating
/// `AwaitingLead`/`AwaitingResponse` per trick, `GameOver` once both hands are
/// empty. The AI plays as part of the same call that hands it the turn, so
/// between calls the session only ever waits on the human.
pub struct Session {
    pub config: GameConfig,
    pub deck: Deck,
    pub players: [Player; 2],
    pub trump_suit: Option<Suit>,
    /// Face-up trump, until the last draw hands it to the trick loser.
    pub trump_card: Option<Card>,
    pub leader: Side,
    phase: Phase,
    pending_lead: Option<Card>,
    processing: bool,
    tricks_played: usize,
    rng: StdRng,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            deck: Deck::default(),
            players: [Player::new(), Player::new()],
            trump_suit: None,
            trump_card: None,
            leader: Side::Player,
            phase: Phase::Dealing,
            pending_lead: None,
            processing: false,
            tricks_played: 0,
            rng,
        }
    }

    /// Shuffle, deal three cards each and turn up the trump. Valid from any
    /// phase; a game in progress is abandoned.
    pub fn new_game(&mut self) -> Vec<GameEvent> {
        self.phase = Phase::Dealing;
        self.processing = false;
        self.pending_lead = None;
        self.tricks_played = 0;
        self.leader = Side::Player;
        for p in self.players.iter_mut() {
            p.reset();
        }

        self.deck = Deck::build_and_shuffle(&mut self.rng);
        let (player, ai) = self.deck.deal_initial();
        self.players[Side::Player.index()].hand = player;
        self.players[Side::Ai.index()].hand = ai;
        self.trump_card = self.deck.draw();
        self.trump_suit = self.trump_card.map(|c| c.suit);
        self.phase = Phase::AwaitingLead;

        let mut events = Vec::new();
        if let Some(trump) = self.trump_card {
            info!(
                trump = %trump,
                difficulty = %self.config.difficulty,
                deck = self.deck.len(),
                "game started"
            );
            events.push(GameEvent::GameStarted {
                trump,
                difficulty: self.config.difficulty,
            });
        }
        self.push_hands(&mut events);
        events
    }

    /// Play the card at `index` of the human's hand, leading or responding.
    ///
    /// Resolves the trick, refills the hands and, if the AI won and the game
    /// goes on, lets the AI lead the next trick. A rejected input changes
    /// nothing.
    pub fn submit_player_card(&mut self, index: usize) -> Result<Vec<GameEvent>, GameError> {
        if self.processing {
            warn!(index, "card submitted while a trick is being resolved");
            return Err(GameError::Busy);
        }
        match self.phase {
            Phase::Dealing => return Err(GameError::NotStarted),
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::ResolvingTrick => return Err(GameError::Busy),
            Phase::AwaitingLead | Phase::AwaitingResponse => {}
        }
        let len = self.players[Side::Player.index()].hand.len();
        if index >= len {
            warn!(index, len, "card index out of range");
            return Err(GameError::IndexOutOfRange { index, len });
        }
        let trump = self.trump_suit.ok_or(GameError::NotStarted)?;

        self.processing = true;
        let result = self.play_trick(index, trump);
        self.processing = false;
        result
    }

    fn play_trick(&mut self, index: usize, trump: Suit) -> Result<Vec<GameEvent>, GameError> {
        let hand = &self.players[Side::Player.index()].hand;
        let card = hand.get(index).copied().ok_or(GameError::IndexOutOfRange {
            index,
            len: hand.len(),
        })?;

        // The AI answers before anything is taken from the human's hand.
        let (lead, follow, reply) = match self.pending_lead {
            Some(ai_lead) => (ai_lead, card, None),
            None => {
                let reply = self.ai_play(Some(card), trump)?;
                (card, reply, Some(reply))
            }
        };
        self.players[Side::Player.index()].play_card(index)?;
        self.pending_lead = None;

        let mut events = vec![GameEvent::CardPlayed {
            side: Side::Player,
            card,
        }];
        if let Some(reply) = reply {
            events.push(GameEvent::CardPlayed {
                side: Side::Ai,
                card: reply,
            });
        }

        self.phase = Phase::ResolvingTrick;
        self.finish_trick(lead, follow, trump, &mut events);

        if self.phase == Phase::AwaitingLead && self.leader == Side::Ai {
            let lead = self.ai_play(None, trump)?;
            self.pending_lead = Some(lead);
            self.phase = Phase::AwaitingResponse;
            events.push(GameEvent::CardPlayed {
                side: Side::Ai,
                card: lead,
            });
        }
        Ok(events)
    }

    /// Ask the configured strategy for a card and take it out of the AI's hand.
    fn ai_play(&mut self, lead: Option<Card>, trump_suit: Suit) -> Result<Card, AiError> {
        let played: Vec<Card> = self
            .players
            .iter()
            .flat_map(|p| p.won.iter().copied())
            .collect();
        let ctx = PlayContext {
            trump_suit,
            trump_card: self.trump_card,
            deck_remaining: self.deck.len(),
            own_points: self.players[Side::Ai.index()].points,
            opponent_points: self.players[Side::Player.index()].points,
            played: &played,
        };
        let hand = &self.players[Side::Ai.index()].hand;
        let idx = self
            .config
            .difficulty
            .choose_card_index(hand, lead, &ctx, &mut self.rng)?;
        Ok(self.players[Side::Ai.index()].hand.remove(idx))
    }

    fn finish_trick(&mut self, lead: Card, follow: Card, trump: Suit, events: &mut Vec<GameEvent>) {
        let outcome = resolve_trick(lead, follow, self.leader, trump);
        let winner = outcome.winner;
        self.players[winner.index()].take_trick([lead, follow], outcome.points);
        self.leader = winner;
        self.tricks_played += 1;
        debug!(
            trick = self.tricks_played,
            lead = %lead,
            follow = %follow,
            winner = ?winner,
            points = outcome.points,
            "trick resolved"
        );
        events.push(GameEvent::TrickResolved {
            winner,
            points: outcome.points,
            cards: [lead, follow],
        });

        self.replenish(winner, events);
        self.push_hands(events);

        if self.players.iter().all(|p| p.hand.is_empty()) {
            self.phase = Phase::GameOver;
            let (player_points, ai_points) = self.scores();
            let result = GameResult::from_points(player_points, ai_points);
            info!(player_points, ai_points, ?result, "game over");
            events.push(GameEvent::GameOver {
                player_points,
                ai_points,
                result,
            });
        } else {
            self.phase = Phase::AwaitingLead;
        }
    }

    /// Winner draws first. On the last card the loser takes the face-up trump.
    fn replenish(&mut self, winner: Side, events: &mut Vec<GameEvent>) {
        if self.deck.is_empty() {
            return;
        }
        let loser = winner.other();
        self.players[winner.index()].hand.extend(self.deck.draw());
        if !self.deck.is_empty() {
            self.players[loser.index()].hand.extend(self.deck.draw());
        } else if let Some(trump) = self.trump_card.take() {
            self.players[loser.index()].hand.push(trump);
            events.push(GameEvent::TrumpTaken {
                side: loser,
                card: trump,
            });
        }
    }

    fn push_hands(&self, events: &mut Vec<GameEvent>) {
        for side in [Side::Player, Side::Ai] {
            let hand = &self.players[side.index()].hand;
            events.push(GameEvent::HandUpdated {
                side,
                count: hand.len(),
                cards: (side == Side::Player).then(|| hand.clone()),
            });
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// The AI's lead card while it waits for the human's response.
    pub fn pending_lead(&self) -> Option<Card> {
        self.pending_lead
    }

    pub fn player_leads(&self) -> bool {
        self.leader == Side::Player
    }

    pub fn hand(&self, side: Side) -> &[Card] {
        &self.players[side.index()].hand
    }

    pub fn points(&self, side: Side) -> u32 {
        self.players[side.index()].points
    }

    /// (player, ai)
    pub fn scores(&self) -> (u32, u32) {
        (self.points(Side::Player), self.points(Side::Ai))
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn tricks_played(&self) -> usize {
        self.tricks_played
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn result(&self) -> Option<GameResult> {
        (self.phase == Phase::GameOver).then(|| {
            let (player, ai) = self.scores();
            GameResult::from_points(player, ai)
        })
    }

    /// Every card the session knows about: pile, hands, captured cards,
    /// the face-up trump and a pending lead.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self.deck.cards().to_vec();
        for p in &self.players {
            cards.extend(p.hand.iter().copied());
            cards.extend(p.won.iter().copied());
        }
        cards.extend(self.trump_card);
        cards.extend(self.pending_lead);
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Value, DECK_SIZE};
    use crate::Suit::*;

    fn c(suit: Suit, n: u8) -> Card {
        Card::new(suit, Value::from_number(n).unwrap())
    }

    fn seeded(difficulty: Difficulty, seed: u64) -> Session {
        let mut s = Session::new(GameConfig::new(difficulty).with_seed(seed));
        s.new_game();
        s
    }

    #[test]
    fn both_trumps_higher_rank_wins() {
        let out = resolve_trick(c(Oros, 12), c(Oros, 3), Side::Player, Oros);
        assert_eq!(out.winner, Side::Ai);
        assert_eq!(out.points, 14);
        let out = resolve_trick(c(Oros, 1), c(Oros, 3), Side::Ai, Oros);
        assert_eq!(out.winner, Side::Ai);
    }

    #[test]
    fn single_trump_wins_outright() {
        let out = resolve_trick(c(Copas, 1), c(Espadas, 2), Side::Player, Espadas);
        assert_eq!(out, TrickOutcome { winner: Side::Ai, points: 11 });
        let out = resolve_trick(c(Espadas, 2), c(Copas, 1), Side::Player, Espadas);
        assert_eq!(out.winner, Side::Player);
    }

    #[test]
    fn off_suit_follow_loses() {
        let out = resolve_trick(c(Copas, 2), c(Oros, 1), Side::Ai, Bastos);
        assert_eq!(out.winner, Side::Ai);
        assert_eq!(out.points, 11);
    }

    #[test]
    fn same_suit_rank_not_face_value() {
        // Three outranks King even though 12 > 3.
        let out = resolve_trick(c(Copas, 12), c(Copas, 3), Side::Player, Bastos);
        assert_eq!(out.winner, Side::Ai);
        let out = resolve_trick(c(Copas, 7), c(Copas, 6), Side::Player, Bastos);
        assert_eq!(out.winner, Side::Player);
    }

    #[test]
    fn new_session_waits_for_deal() {
        let mut s = Session::new(GameConfig::default());
        assert_eq!(s.phase(), Phase::Dealing);
        assert_eq!(s.submit_player_card(0), Err(GameError::NotStarted));
    }

    #[test]
    fn deal_accounts_for_every_card() {
        let s = seeded(Difficulty::Normal, 1);
        assert_eq!(s.phase(), Phase::AwaitingLead);
        assert!(s.player_leads());
        assert_eq!(s.hand(Side::Player).len(), 3);
        assert_eq!(s.hand(Side::Ai).len(), 3);
        assert_eq!(s.deck_remaining(), DECK_SIZE - 7);
        assert_eq!(s.trump_suit, s.trump_card.map(|c| c.suit));
        let mut all = s.all_cards();
        all.sort_by_key(|c| (c.suit, c.value));
        all.dedup();
        assert_eq!(all.len(), DECK_SIZE);
    }

    #[test]
    fn failed_ai_reply_keeps_the_players_card() {
        let mut s = seeded(Difficulty::Hard, 12);
        let hand = s.hand(Side::Player).to_vec();
        let deck = s.deck_remaining();
        s.players[1].hand.clear();
        assert_eq!(
            s.submit_player_card(1),
            Err(GameError::Ai(AiError::EmptyHand))
        );
        assert_eq!(s.hand(Side::Player), hand.as_slice());
        assert_eq!(s.deck_remaining(), deck);
        assert_eq!(s.phase(), Phase::AwaitingLead);
        assert_eq!(s.tricks_played(), 0);
        assert!(s.player_leads());
        assert!(!s.is_processing());
    }

    #[test]
    fn busy_session_rejects_input() {
        let mut s = seeded(Difficulty::Easy, 2);
        s.processing = true;
        let before = s.hand(Side::Player).to_vec();
        assert_eq!(s.submit_player_card(0), Err(GameError::Busy));
        assert_eq!(s.hand(Side::Player), before.as_slice());
    }

    #[test]
    fn out_of_range_index_is_a_no_op() {
        let mut s = seeded(Difficulty::Easy, 3);
        assert_eq!(
            s.submit_player_card(3),
            Err(GameError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(s.hand(Side::Player).len(), 3);
        assert_eq!(s.tricks_played(), 0);
        assert!(!s.is_processing());
    }

    #[test]
    fn trick_refills_winner_first() {
        let mut s = seeded(Difficulty::Normal, 4);
        s.trump_suit = Some(Bastos);
        s.players[0].hand = vec![c(Copas, 1), c(Oros, 2), c(Oros, 4)];
        s.players[1].hand = vec![c(Espadas, 2), c(Espadas, 4), c(Espadas, 5)];
        let top = *s.deck.cards().last().unwrap();
        let events = s.submit_player_card(0).unwrap();
        // Normal AI cannot win: it throws a blank and the player takes 11.
        assert_eq!(s.points(Side::Player), 11);
        assert!(s.player_leads());
        assert_eq!(s.hand(Side::Player).last(), Some(&top));
        assert_eq!(s.hand(Side::Player).len(), 3);
        assert_eq!(s.hand(Side::Ai).len(), 3);
        assert!(events.contains(&GameEvent::TrickResolved {
            winner: Side::Player,
            points: 11,
            cards: [c(Copas, 1), s.players[0].won[1]],
        }));
    }

    #[test]
    fn ai_leads_after_winning() {
        let mut s = seeded(Difficulty::Normal, 5);
        s.trump_suit = Some(Bastos);
        s.players[0].hand = vec![c(Copas, 2), c(Oros, 2), c(Oros, 4)];
        s.players[1].hand = vec![c(Copas, 1), c(Espadas, 4), c(Espadas, 5)];
        let events = s.submit_player_card(0).unwrap();
        assert!(!s.player_leads());
        assert_eq!(s.phase(), Phase::AwaitingResponse);
        let lead = s.pending_lead().unwrap();
        assert_eq!(
            events.last(),
            Some(&GameEvent::CardPlayed {
                side: Side::Ai,
                card: lead
            })
        );
        // The AI led one of its three refilled cards.
        assert_eq!(s.hand(Side::Ai).len(), 2);
        s.submit_player_card(0).unwrap();
        assert_eq!(s.tricks_played(), 2);
    }

    #[test]
    fn game_over_rejects_further_cards() {
        let mut s = seeded(Difficulty::Easy, 6);
        while s.phase() != Phase::GameOver {
            s.submit_player_card(0).unwrap();
        }
        assert_eq!(s.submit_player_card(0), Err(GameError::GameOver));
        assert!(s.result().is_some());
        s.new_game();
        assert_eq!(s.phase(), Phase::AwaitingLead);
        assert_eq!(s.scores(), (0, 0));
    }

    #[test]
    fn result_from_points() {
        assert_eq!(GameResult::from_points(61, 59), GameResult::PlayerWins);
        assert_eq!(GameResult::from_points(59, 61), GameResult::AiWins);
        assert_eq!(GameResult::from_points(60, 60), GameResult::Tie);
    }

    #[test]
    fn event_text() {
        let e = GameEvent::TrickResolved {
            winner: Side::Player,
            points: 13,
            cards: [c(Oros, 1), c(Oros, 10)],
        };
        assert_eq!(e.to_string(), "You win the trick and gain 13 points!");
    }
}
