//! Card definitions: static, immutable card data.
//!
//! A [`Card`] is a discriminated variant over the three drawable effects.
//! Resolution sites match on it exhaustively, so adding a variant forces a
//! review of every resolution site at compile time. The standard catalog
//! is a pure construction-time function; there is no mutable global card
//! pool to guard.

use serde::{Deserialize, Serialize};

/// A drawable unit of game effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Card {
    /// A one-off environmental event applied to shared state and discarded
    Event { name: String, effect: EventEffect },
    /// An item the player keeps; adjusts the attack score while held
    Item { name: String, attack_bonus: i32 },
    /// Spawns zombies on the tile the player occupies
    Zombie { count: u32 },
}

/// The state change an event card applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventEffect {
    /// Adjust player health by the given amount (clamped at zero and at
    /// the starting maximum)
    HealthDelta(i32),
    /// Something drags the player back to the tile they came from
    ForcedRetreat,
}

impl Card {
    /// Short human-readable label, used by the shell and in logs.
    pub fn label(&self) -> String {
        match self {
            Card::Event { name, .. } => name.clone(),
            Card::Item { name, .. } => name.clone(),
            Card::Zombie { count } => format!("{} zombies", count),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The full card pool for a standard game.
///
/// Pure function of nothing: calling it twice yields two equal catalogs,
/// and a [`crate::Deck`] is built from it exactly once per game.
///
/// # Examples
///
/// ```
/// use mansion::standard_catalog;
///
/// let catalog = standard_catalog();
/// assert_eq!(catalog, standard_catalog());
/// assert!(catalog.len() > 10);
/// ```
pub fn standard_catalog() -> Vec<Card> {
    fn item(name: &str, attack_bonus: i32) -> Card {
        Card::Item {
            name: name.to_string(),
            attack_bonus,
        }
    }
    fn event(name: &str, effect: EventEffect) -> Card {
        Card::Event {
            name: name.to_string(),
            effect,
        }
    }

    vec![
        Card::Zombie { count: 2 },
        Card::Zombie { count: 3 },
        Card::Zombie { count: 4 },
        Card::Zombie { count: 5 },
        Card::Zombie { count: 6 },
        Card::Zombie { count: 3 },
        item("Golf Club", 1),
        item("Board with Nails", 1),
        item("Fire Axe", 2),
        item("Chainsaw", 3),
        item(crate::config::REQUIRED_RELIC, 0),
        event("Candlelight Respite", EventEffect::HealthDelta(2)),
        event("Second Wind", EventEffect::HealthDelta(1)),
        event("Musty Air", EventEffect::HealthDelta(-1)),
        event("Rotten Meat", EventEffect::HealthDelta(-2)),
        event("Grasping Hands", EventEffect::ForcedRetreat),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_stable() {
        assert_eq!(standard_catalog(), standard_catalog());
    }

    #[test]
    fn test_catalog_contains_the_relic() {
        let catalog = standard_catalog();
        assert!(catalog.iter().any(|card| matches!(
            card,
            Card::Item { name, .. } if name == crate::config::REQUIRED_RELIC
        )));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Card::Zombie { count: 2 }.label(), "2 zombies");
        let axe = Card::Item {
            name: "Fire Axe".to_string(),
            attack_bonus: 2,
        };
        assert_eq!(axe.label(), "Fire Axe");
    }
}
