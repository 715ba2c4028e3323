//! Property tests: card conservation and turn sanity over random play.
//!
//! A random walk over the public surface must never create or destroy a
//! card, never leave the seat on an eliminated player, and never panic.

use proptest::prelude::*;

use kitten_engine::{Game, Prompt};

fn expected_total(player_count: usize) -> usize {
    39 + 6 + (player_count - 1)
}

fn cards_in_circulation(game: &Game) -> usize {
    let mut total = game.deck().len() + game.discard().len();
    for player in game.players() {
        total += player.hand().len();
    }
    if matches!(game.prompt(), Some(Prompt::CardDrawn { .. })) {
        total += 1;
    }
    total
}

/// Apply one pseudo-random operation. Rejections are expected and
/// ignored; panics are not.
fn step(game: &mut Game, op: u8) {
    if game.is_over() {
        return;
    }

    if game.prompt().is_some() {
        let target = match game.prompt() {
            Some(Prompt::TargetChoice { candidates, .. }) => {
                Some(candidates[op as usize % candidates.len()])
            }
            _ => None,
        };
        match target {
            Some(target) => game.choose_target(target).unwrap(),
            None => game.acknowledge().unwrap(),
        }
        return;
    }

    let seat = game.current_player();
    let hand_len = game.player(seat).hand().len();
    match op % 5 {
        0 | 1 => {
            let _ = game.draw_card();
        }
        2 => {
            if hand_len > 0 {
                let _ = game.play_card(op as usize % hand_len);
            }
        }
        3 => {
            let _ = game.toggle_combination_mode();
            if hand_len > 0 {
                let _ = game.toggle_cat_selection(op as usize % hand_len);
            }
        }
        4 => {
            let _ = game.confirm_combination();
            let _ = game.cancel_combination();
        }
        _ => unreachable!(),
    }
}

proptest! {
    #[test]
    fn cards_are_conserved_over_random_play(
        seed in 0u64..10_000,
        player_count in 2usize..=4,
        ops in prop::collection::vec(0u8..=255, 1..200),
    ) {
        let names = ["Ana", "Bo", "Cy", "Di"];
        let mut game = Game::new(seed);
        game.init(&names[..player_count]);

        for op in ops {
            step(&mut game, op);

            prop_assert_eq!(
                cards_in_circulation(&game),
                expected_total(player_count)
            );
            prop_assert!(game.turns_remaining() >= 1);

            // Outside of suspension, the seat is on a live player.
            if game.prompt().is_none() && !game.is_over() {
                prop_assert!(game.player(game.current_player()).is_active());
            }

            // A winner, once declared, sticks.
            if let Some(winner) = game.winner() {
                prop_assert!(game.player(winner).is_active());
            }
        }
    }

    #[test]
    fn eliminations_are_permanent(
        seed in 0u64..10_000,
        ops in prop::collection::vec(0u8..=255, 1..200),
    ) {
        let mut game = Game::new(seed);
        game.init(&["Ana", "Bo", "Cy"]);
        let mut eliminated = [false; 3];

        for op in ops {
            step(&mut game, op);

            for (i, player) in game.players().iter().enumerate() {
                if eliminated[i] {
                    prop_assert!(!player.is_active(), "player revived");
                }
                if !player.is_active() {
                    eliminated[i] = true;
                }
            }
        }
    }
}
