//! Property tests for the structural invariants of the tile graph and the
//! deck lifecycle.

use mansion::{standard_catalog, Card, Deck, Direction, GameRng, Level, MoveOutcome, Side};
use proptest::prelude::*;

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::North),
        Just(Direction::East),
        Just(Direction::South),
        Just(Direction::West),
    ]
}

/// Order-insensitive pile comparison.
fn multiset_eq(a: &[Card], b: &[Card]) -> bool {
    a.len() == b.len()
        && a.iter().all(|card| {
            a.iter().filter(|c| *c == card).count() == b.iter().filter(|c| *c == card).count()
        })
}

proptest! {
    /// For any walk, no two tiles share a coordinate, every link is open
    /// on both ends, and every tile is reachable from the Foyer.
    #[test]
    fn walks_keep_the_level_consistent(
        seed in any::<u64>(),
        walk in prop::collection::vec(direction_strategy(), 1..80),
    ) {
        let mut level = Level::new();
        let mut rng = GameRng::new(seed);

        for direction in walk {
            let outcome = level.move_player(direction, &mut rng).unwrap();
            prop_assert!(level.is_consistent());

            if let MoveOutcome::Moved { to, .. } = outcome {
                prop_assert_eq!(level.player_tile(), to);
            }

            // Every open side that faces a placed neighbor links both
            // ways or not at all: linkage must be symmetric.
            for tile in level.tiles() {
                for d in Direction::ALL {
                    if let Some(neighbor) = level.neighbor_of(tile.id, d) {
                        let forward = tile.is_open(d) && neighbor.is_open(d.opposite());
                        prop_assert_eq!(forward, level.linked(tile.id, d));
                        prop_assert_eq!(forward, level.linked(neighbor.id, d.opposite()));
                    }
                }
            }
        }

        // Reachability from the Foyer over open-side links.
        let mut reachable = vec![false; level.len()];
        let mut stack = vec![level.tiles()[0].id];
        reachable[0] = true;
        while let Some(id) = stack.pop() {
            for d in Direction::ALL {
                if level.linked(id, d) {
                    let neighbor = level.neighbor_of(id, d).unwrap().id;
                    if !reachable[neighbor.0 as usize] {
                        reachable[neighbor.0 as usize] = true;
                        stack.push(neighbor);
                    }
                }
            }
        }
        prop_assert!(reachable.iter().all(|r| *r), "unreachable tile placed");
    }

    /// Every rolled tile keeps at least the side it was entered through
    /// open, so the player can always walk back out.
    #[test]
    fn fresh_tiles_never_trap_the_player(
        seed in any::<u64>(),
        walk in prop::collection::vec(direction_strategy(), 1..40),
    ) {
        let mut level = Level::new();
        let mut rng = GameRng::new(seed);

        for direction in walk {
            let before = level.player_tile();
            if let MoveOutcome::Moved { newly_placed: true, to } =
                level.move_player(direction, &mut rng).unwrap()
            {
                prop_assert!(level.linked(to, direction.opposite()));
                prop_assert_eq!(
                    level.neighbor_of(to, direction.opposite()).unwrap().id,
                    before
                );
                prop_assert_eq!(
                    level.tile(to).unwrap().side(direction.opposite()),
                    Side::Open
                );
            }
        }
    }

    /// The union of the draw and discard piles (plus any cards held out
    /// mid-resolution) is the catalog multiset, no matter how draws,
    /// holds, and discards interleave.
    #[test]
    fn deck_multiset_is_invariant(
        seed in any::<u64>(),
        ops in prop::collection::vec(0u8..3, 1..120),
    ) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard(&mut rng);
        let catalog = standard_catalog();
        let mut held: Vec<Card> = Vec::new();

        for op in ops {
            match op {
                // Draw and resolve immediately.
                0 => {
                    if let Ok(card) = deck.draw(&mut rng) {
                        deck.discard(card);
                    } else {
                        // Only legal when every card is held out.
                        prop_assert_eq!(held.len(), catalog.len());
                    }
                }
                // Draw and hold, as if mid-resolution.
                1 => {
                    if let Ok(card) = deck.draw(&mut rng) {
                        held.push(card);
                    }
                }
                // Finish resolving a held card.
                _ => {
                    if let Some(card) = held.pop() {
                        deck.discard(card);
                    }
                }
            }

            let mut union: Vec<Card> = deck.draw_pile().to_vec();
            union.extend_from_slice(deck.discard_pile());
            union.extend_from_slice(&held);
            prop_assert!(multiset_eq(&union, &catalog));
        }
    }

    /// Without discards, a full pass over the draw pile yields each card
    /// exactly as often as the catalog contains it.
    #[test]
    fn draws_are_without_replacement(seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut deck = Deck::standard(&mut rng);
        let catalog = standard_catalog();

        let mut seen = Vec::new();
        for _ in 0..catalog.len() {
            seen.push(deck.draw(&mut rng).unwrap());
        }
        prop_assert!(multiset_eq(&seen, &catalog));
        prop_assert!(deck.is_empty());
    }
}
