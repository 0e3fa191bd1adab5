//! CLI blackjack example.
//!
//! Run with `RUST_LOG=debug` to watch the engine's decisions.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    AllowedActions, Card, DealerHand, DealerId, Effect, Game, GameState, Hand, HandOutcome,
    RuleProfile, Suit,
};

const STARTING_BANKROLL: usize = 500;

fn main() {
    env_logger::init();
    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(dealer) = prompt_dealer() else {
        return;
    };
    let game = Game::new(dealer, STARTING_BANKROLL, seed);
    print_rules(&game);

    loop {
        if game.state() == GameState::GameOver {
            println!("You are below the table minimum. Game over.");
            match prompt_line("Start again with a fresh bankroll? (y/n): ").as_str() {
                "y" | "yes" => {
                    if let Err(err) = game.reset_bankroll(STARTING_BANKROLL) {
                        println!("Reset error: {err}");
                        break;
                    }
                }
                _ => break,
            }
        }

        let bankroll = game.bankroll();
        let minimum = game.profile().minimum_bet;
        let input = prompt_line(&format!(
            "Bet ({minimum}-{bankroll}), 'c' to change dealer, 0 to quit: "
        ));

        match input.as_str() {
            "q" | "quit" | "0" => {
                println!("Goodbye.");
                break;
            }
            "c" | "change" => {
                if let Some(dealer) = prompt_dealer() {
                    match game.switch_dealer(RuleProfile::for_dealer(dealer)) {
                        Ok(()) => print_rules(&game),
                        Err(err) => println!("Switch error: {err}"),
                    }
                }
                continue;
            }
            _ => {}
        }

        let Ok(bet) = input.parse::<usize>() else {
            println!("Please enter a number.");
            continue;
        };

        if let Err(err) = game.place_bet(bet) {
            println!("Bet error: {err}");
            continue;
        }
        report_effects(&game);

        while game.state() == GameState::PlayerTurn {
            print_table(&game);

            println!("{}", format_actions(game.allowed_actions()));
            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => game.hit(),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down(),
                "p" | "split" => game.split(),
                "u" | "surrender" => game.surrender(),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
            report_effects(&game);
        }

        print_result(&game);
    }

    let stats = game.stats();
    if stats.hands > 0 {
        println!(
            "Session: {} hands, {} won, {} lost, {} pushed, net {}",
            stats.hands,
            stats.wins + stats.blackjacks,
            stats.losses + stats.busts + stats.surrenders,
            stats.pushes,
            stats.net
        );
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_dealer() -> Option<DealerId> {
    for (index, dealer) in DealerId::ALL.iter().enumerate() {
        println!("  {}) {dealer}", index + 1);
    }

    loop {
        let input = prompt_line("Choose a dealer: ");
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(choice) if (1..=DealerId::ALL.len()).contains(&choice) => {
                return Some(DealerId::ALL[choice - 1]);
            }
            _ => println!("Please enter 1-{}.", DealerId::ALL.len()),
        }
    }
}

fn print_rules(game: &Game) {
    let profile = game.profile();
    println!(
        "\n{} deals {} decks. Blackjack pays {}. Minimum bet {}.",
        profile.dealer, profile.decks, profile.blackjack_payout, profile.minimum_bet
    );
    println!(
        "Dealer {} soft 17. Surrender {}.",
        if profile.dealer_hits_soft_17 {
            "hits"
        } else {
            "stands on"
        },
        if profile.surrender {
            "offered"
        } else {
            "not offered"
        }
    );
    if let Some(variant) = game.maverick_variant() {
        println!("House rules this shoe: {}", variant.description());
    }
    if let Some(seconds) = profile.decision_seconds {
        println!("{seconds} seconds per decision.");
    }
    println!();
}

fn report_effects(game: &Game) {
    for effect in game.drain_effects() {
        if effect == Effect::Shuffle {
            println!("Shoe reshuffled.");
            if let Some(variant) = game.maverick_variant() {
                println!("New house rules: {}", variant.description());
            }
        }
    }
}

fn print_table(game: &Game) {
    let remaining = game.cards_remaining();
    println!("\nShoe: {remaining} cards remaining");

    let dealer = game.dealer_hand();
    let dealer_value = if dealer.is_hole_revealed() {
        dealer.value()
    } else {
        dealer.visible_value()
    };
    println!("\nDealer: {} (value {dealer_value})", format_dealer(&dealer));

    let active = game.active_hand();
    for (index, hand) in game.hands().iter().enumerate() {
        let marker = if Some(index) == active { "*" } else { " " };
        print_hand(marker, index, hand);
    }
    println!();
}

fn print_result(game: &Game) {
    let Some(result) = game.last_result() else {
        return;
    };

    let dealer = game.dealer_hand();
    println!(
        "\nDealer: {} (value {})",
        format_dealer(&dealer),
        dealer.value()
    );

    for record in &result.hands {
        let outcome = match record.outcome {
            HandOutcome::Win => "win",
            HandOutcome::Loss => "loss",
            HandOutcome::Push => "push",
            HandOutcome::Blackjack => "blackjack",
            HandOutcome::Bust => "bust",
            HandOutcome::Surrender => "surrender",
            HandOutcome::DealerBust => "dealer bust",
        };
        let cards = record
            .player_cards
            .iter()
            .map(format_card)
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "Hand {}: {cards} | value {} | {outcome} | net {}",
            record.hand_index,
            record.player_total,
            record.net()
        );
    }
    println!(
        "Round complete: net {}, bankroll {}\n",
        result.net, result.bankroll
    );
    report_effects(game);
}

fn print_hand(marker: &str, index: usize, hand: &Hand) {
    let free = if hand.free_bet() > 0 {
        format!(" (+{} free)", hand.free_bet())
    } else {
        String::new()
    };
    println!(
        "{marker} Hand {index}: {} | value {} | bet {}{free} | {:?}",
        format_hand(hand),
        hand.value(),
        hand.bet(),
        hand.status()
    );
}

fn format_actions(allowed: AllowedActions) -> String {
    let parts = [
        format_action("hit", "h", allowed.hit),
        format_action("stand", "s", allowed.stand),
        format_action("double", "d", allowed.double_down),
        format_action("split", "p", allowed.split),
        format_action("surrender", "u", allowed.surrender),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    let mut parts: Vec<String> = dealer.visible_cards().iter().map(format_card).collect();
    if !dealer.is_hole_revealed() {
        parts.push("??".to_string());
    }
    parts.join(" ")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
