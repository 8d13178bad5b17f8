use std::collections::HashSet;

use brisca::{
    Difficulty, GameConfig, GameError, GameEvent, GameResult, Phase, Session, Side, DECK_SIZE,
    TOTAL_POINTS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_all_cards_accounted(game: &Session) {
    let cards = game.all_cards();
    assert_eq!(cards.len(), DECK_SIZE);
    let unique: HashSet<_> = cards.into_iter().collect();
    assert_eq!(unique.len(), DECK_SIZE);
}

/// Play a whole game, the human choosing cards with `picker`. Returns the
/// number of tricks and every event emitted.
fn play_out(game: &mut Session, picker: &mut StdRng) -> (usize, Vec<GameEvent>) {
    let mut log = game.new_game();
    let mut tricks = 0;
    assert_all_cards_accounted(game);
    while game.phase() != Phase::GameOver {
        let hand = game.hand(Side::Player).len();
        assert!(hand > 0);
        let events = game
            .submit_player_card(picker.gen_range(0..hand))
            .expect("valid card index");
        tricks += events
            .iter()
            .filter(|e| matches!(e, GameEvent::TrickResolved { .. }))
            .count();
        assert!(!game.is_processing());
        assert_all_cards_accounted(game);
        log.extend(events);
        assert!(tricks <= 20, "game ran past twenty tricks");
    }
    (tricks, log)
}

#[test]
fn every_difficulty_finishes_in_twenty_tricks() {
    for difficulty in Difficulty::ALL {
        for seed in 0..15u64 {
            let mut game = Session::new(GameConfig::new(difficulty).with_seed(seed));
            let mut picker = StdRng::seed_from_u64(seed + 1000);
            let (tricks, log) = play_out(&mut game, &mut picker);

            assert_eq!(tricks, 20, "{} seed {}", difficulty, seed);
            assert_eq!(game.tricks_played(), 20);
            assert!(game.hand(Side::Player).is_empty());
            assert!(game.hand(Side::Ai).is_empty());
            assert_eq!(game.deck_remaining(), 0);
            assert_eq!(game.trump_card, None);

            let (player, ai) = game.scores();
            assert_eq!(player + ai, TOTAL_POINTS);
            assert_eq!(game.result(), Some(GameResult::from_points(player, ai)));
            assert_eq!(
                log.last(),
                Some(&GameEvent::GameOver {
                    player_points: player,
                    ai_points: ai,
                    result: GameResult::from_points(player, ai),
                })
            );
            let trump_taken = log
                .iter()
                .filter(|e| matches!(e, GameEvent::TrumpTaken { .. }))
                .count();
            assert_eq!(trump_taken, 1);
        }
    }
}

#[test]
fn same_seed_same_game() {
    let run = || {
        let mut game = Session::new(GameConfig::new(Difficulty::Hard).with_seed(77));
        let mut picker = StdRng::seed_from_u64(5);
        play_out(&mut game, &mut picker).1
    };
    assert_eq!(run(), run());
}

#[test]
fn points_only_change_on_resolution() {
    let mut game = Session::new(GameConfig::new(Difficulty::Normal).with_seed(3));
    game.new_game();
    let mut total = 0;
    while game.phase() != Phase::GameOver {
        let events = game.submit_player_card(0).unwrap();
        for e in &events {
            if let GameEvent::TrickResolved { points, cards, .. } = e {
                assert_eq!(*points, cards[0].points() + cards[1].points());
                total += points;
            }
        }
        let (player, ai) = game.scores();
        assert_eq!(player + ai, total);
    }
}

#[test]
fn rejected_inputs_leave_the_game_alone() {
    let mut game = Session::new(GameConfig::new(Difficulty::Easy).with_seed(9));
    assert_eq!(game.submit_player_card(0), Err(GameError::NotStarted));

    game.new_game();
    let hand = game.hand(Side::Player).to_vec();
    let deck = game.deck_remaining();
    assert!(matches!(
        game.submit_player_card(7),
        Err(GameError::IndexOutOfRange { index: 7, len: 3 })
    ));
    assert_eq!(game.hand(Side::Player), hand.as_slice());
    assert_eq!(game.deck_remaining(), deck);
    assert_eq!(game.phase(), Phase::AwaitingLead);
    assert_eq!(game.scores(), (0, 0));

    while game.phase() != Phase::GameOver {
        game.submit_player_card(0).unwrap();
    }
    assert_eq!(game.submit_player_card(0), Err(GameError::GameOver));
}

#[test]
fn new_game_mid_play_starts_over() {
    let mut game = Session::new(GameConfig::new(Difficulty::Hard).with_seed(21));
    game.new_game();
    for _ in 0..4 {
        game.submit_player_card(0).unwrap();
    }
    game.new_game();
    assert_eq!(game.phase(), Phase::AwaitingLead);
    assert!(game.player_leads());
    assert_eq!(game.pending_lead(), None);
    assert_eq!(game.tricks_played(), 0);
    assert_eq!(game.scores(), (0, 0));
    assert_eq!(game.deck_remaining(), 33);
    assert_all_cards_accounted(&game);
}
