//! Player state: health, attack score, inventory, and position cache.

use crate::{Card, TileId};
use serde::{Deserialize, Serialize};

/// The single actor in the simulation.
///
/// Created once at game start from configuration and mutated by combat and
/// item pickup. A health-reaches-zero transition ends the game; the player
/// value itself is never destroyed mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    health: i32,
    max_health: i32,
    attack_score: i32,
    inventory: Vec<HeldItem>,
    tile: TileId,
}

/// An item card the player holds, as it sits in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldItem {
    pub name: String,
    pub attack_bonus: i32,
}

impl Player {
    /// Creates a player with the given starting stats, standing on `tile`.
    pub fn new(health: i32, attack_score: i32, tile: TileId) -> Self {
        Self {
            health,
            max_health: health,
            attack_score,
            inventory: Vec::new(),
            tile,
        }
    }

    /// Current health.
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Current attack score, including item bonuses.
    pub fn attack_score(&self) -> i32 {
        self.attack_score
    }

    /// Items currently held.
    pub fn inventory(&self) -> &[HeldItem] {
        &self.inventory
    }

    /// Whether the player holds an item with the given name.
    pub fn holds(&self, name: &str) -> bool {
        self.inventory.iter().any(|item| item.name == name)
    }

    /// The tile the player stands on. Kept in sync with the level by the
    /// game; the game is the only writer of both.
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// Whether the player is still alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage, clamping health at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use mansion::{Player, TileId};
    ///
    /// let mut player = Player::new(10, 2, TileId(0));
    /// player.apply_damage(4);
    /// assert_eq!(player.health(), 6);
    /// player.apply_damage(100);
    /// assert_eq!(player.health(), 0);
    /// ```
    pub fn apply_damage(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "damage is non-negative");
        self.health = (self.health - amount).max(0);
    }

    /// Restores health, clamping at the starting maximum.
    pub fn heal(&mut self, amount: i32) {
        debug_assert!(amount >= 0, "healing is non-negative");
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Adds an item card to the inventory and applies its attack bonus.
    ///
    /// Panics in debug builds if handed a non-item card; the resolution
    /// dispatch in the game is the only caller and matches exhaustively.
    pub fn add_item(&mut self, card: &Card) {
        match card {
            Card::Item { name, attack_bonus } => {
                self.attack_score += attack_bonus;
                self.inventory.push(HeldItem {
                    name: name.clone(),
                    attack_bonus: *attack_bonus,
                });
            }
            other => debug_assert!(false, "add_item called with {:?}", other),
        }
    }

    /// Moves the player's cached position to `tile`.
    pub fn move_to(&mut self, tile: TileId) {
        self.tile = tile;
    }

    /// Rebuilds a player from snapshot fields.
    pub(crate) fn from_parts(
        health: i32,
        max_health: i32,
        attack_score: i32,
        inventory: Vec<HeldItem>,
        tile: TileId,
    ) -> Self {
        Self {
            health,
            max_health,
            attack_score,
            inventory,
            tile,
        }
    }

    /// Starting (maximum) health, needed by the snapshot schema.
    pub fn max_health(&self) -> i32 {
        self.max_health
    }
}
