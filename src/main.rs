use std::io::{self, BufRead, Write};

use brisca::{Difficulty, GameConfig, GameEvent, Phase, Session, Side};
use tracing_subscriber::EnvFilter;

fn print_events(events: &[GameEvent]) {
    for event in events {
        match event {
            // The hand is shown with the prompt instead.
            GameEvent::HandUpdated { .. } => {}
            _ => println!("{}", event),
        }
    }
}

fn print_table(game: &Session) {
    let (player, ai) = game.scores();
    println!();
    println!(
        "Trump: {} | Deck: {} | You: {} GPT: {}",
        game.trump_card
            .map(|c| c.to_string())
            .or_else(|| game.trump_suit.map(|s| s.to_string()))
            .unwrap_or_default(),
        game.deck_remaining(),
        player,
        ai
    );
    if let Some(lead) = game.pending_lead() {
        println!("GPT leads with {}", lead);
    }
    for (i, card) in game.hand(Side::Player).iter().enumerate() {
        println!("  [{}] {}", i + 1, card);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut config = GameConfig::from_env();
    if let Some(arg) = std::env::args().nth(1) {
        config.difficulty = Difficulty::from_name(&arg);
    }

    let mut game = Session::new(config);
    print_events(&game.new_game());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if game.phase() == Phase::GameOver {
            print!("Play again? [y/N] ");
            io::stdout().flush()?;
            match lines.next().transpose()? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                    print_events(&game.new_game());
                    continue;
                }
                _ => break,
            }
        }

        print_table(&game);
        print!("Card to play (1-{}, q to quit): ", game.hand(Side::Player).len());
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            break;
        }
        let index = match line.parse::<usize>() {
            Ok(n) if n > 0 => n - 1,
            _ => {
                println!("Enter a card number.");
                continue;
            }
        };
        match game.submit_player_card(index) {
            Ok(events) => print_events(&events),
            Err(e) => println!("{}", e),
        }
    }
    Ok(())
}
