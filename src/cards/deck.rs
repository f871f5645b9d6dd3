//! Deck lifecycle: draw pile, discard pile, reshuffle on exhaustion.

use crate::{standard_catalog, Card, GameRng, MansionError, MansionResult};
use log::debug;
use serde::{Deserialize, Serialize};

/// Two disjoint ordered piles of cards.
///
/// The top of the draw pile is the end of its `Vec`. Every card is in
/// exactly one pile (a card being resolved has been removed from both and
/// is pushed onto the discard pile when resolution finishes), and the
/// multiset union of the piles is constant for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Assembles and shuffles the standard catalog into a fresh deck.
    pub fn standard(rng: &mut GameRng) -> Self {
        let mut draw_pile = standard_catalog();
        rng.shuffle(&mut draw_pile);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    /// Rebuilds a deck from snapshot piles, order preserved.
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    /// Removes and returns the top card of the draw pile.
    ///
    /// When the draw pile is empty the discard pile is shuffled and becomes
    /// the new draw pile first. Fails with [`MansionError::EmptyDeck`] only
    /// when both piles are empty, which means the card pool was never
    /// populated.
    pub fn draw(&mut self, rng: &mut GameRng) -> MansionResult<Card> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return Err(MansionError::EmptyDeck);
            }
            debug!(
                "draw pile exhausted; reshuffling {} discards",
                self.discard_pile.len()
            );
            std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
            rng.shuffle(&mut self.draw_pile);
        }
        let card = self.draw_pile.pop().ok_or(MansionError::EmptyDeck)?;
        debug!("drew {}", card);
        Ok(card)
    }

    /// Moves a resolved card to the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// Cards remaining in the draw pile.
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Cards already resolved this cycle.
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    /// Total cards across both piles.
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    /// Whether both piles are empty.
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty() && self.discard_pile.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Order-insensitive pile comparison.
    fn multiset_eq(a: &[Card], b: &[Card]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        a.iter().all(|card| {
            let count = |pile: &[Card]| pile.iter().filter(|c| *c == card).count();
            count(a) == count(b)
        })
    }

    #[test]
    fn test_draw_without_replacement() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::standard(&mut rng);
        let total = deck.len();

        // Draw everything without discarding: no card may be seen twice
        // more often than the catalog contains it.
        let mut seen = Vec::new();
        for _ in 0..total {
            seen.push(deck.draw(&mut rng).unwrap());
        }
        assert!(multiset_eq(&seen, &standard_catalog()));
        assert!(deck.is_empty());
    }

    #[test]
    fn test_reshuffle_on_exhaustion() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::standard(&mut rng);
        let total = deck.len();

        // Cycle the whole deck into the discard pile.
        for _ in 0..total {
            let card = deck.draw(&mut rng).unwrap();
            deck.discard(card);
        }
        assert_eq!(deck.draw_pile().len(), 0);
        assert_eq!(deck.discard_pile().len(), total);

        // The next draw reshuffles and the full pool is available again.
        let card = deck.draw(&mut rng).unwrap();
        assert_eq!(deck.len(), total - 1);
        deck.discard(card);
        assert_eq!(deck.len(), total);
    }

    #[test]
    fn test_multiset_invariant_across_operations() {
        let mut rng = GameRng::new(7);
        let mut deck = Deck::standard(&mut rng);

        for i in 0..100 {
            let card = deck.draw(&mut rng).unwrap();
            if i % 3 != 0 {
                deck.discard(card.clone());
            } else {
                // Simulate a card held in resolution, then discarded.
                deck.discard(card);
            }
            let mut combined: Vec<Card> = deck.draw_pile().to_vec();
            combined.extend_from_slice(deck.discard_pile());
            assert!(multiset_eq(&combined, &standard_catalog()));
        }
    }

    #[test]
    fn test_empty_both_piles_is_fatal() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::from_piles(Vec::new(), Vec::new());
        assert!(matches!(
            deck.draw(&mut rng),
            Err(MansionError::EmptyDeck)
        ));
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let mut rng1 = GameRng::new(5);
        let mut rng2 = GameRng::new(5);
        let deck1 = Deck::standard(&mut rng1);
        let deck2 = Deck::standard(&mut rng2);
        assert_eq!(deck1, deck2);
    }
}
