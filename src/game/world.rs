//! # World Module
//!
//! The explorable tile graph and the map-building state machine.
//!
//! The mansion is not pre-generated. It starts as a single Foyer tile and
//! grows one tile at a time as the player walks into unexplored space. The
//! level guarantees, by construction:
//!
//! - no two tiles ever occupy the same coordinate,
//! - a connection between two adjacent tiles exists exactly when the facing
//!   sides of *both* tiles are open (no dangling one-way links),
//! - every tile is reachable from the Foyer, because tiles are only ever
//!   placed through an open side of the tile the player stands on.
//!
//! Adjacency is derived from coordinates plus the both-sides-open check
//! rather than stored, so it can never go stale.

use crate::{Direction, GameRng, MansionError, MansionResult, Position};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable identifier of a placed tile.
///
/// Ids are dense and assigned in placement order, which keeps replays and
/// snapshots deterministic: the id doubles as the index into the level's
/// placement-ordered tile list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// One of a tile's four side slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Connects to a neighboring tile, or is connectable if none exists yet
    Open,
    /// Blocked
    Wall,
}

/// The kind of room a tile represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    /// The distinguished start tile at the origin; all sides open
    Foyer,
    /// An ordinary room
    Room,
    /// A corridor; always a pass-through with exactly two open sides
    Hallway,
    /// A small chamber, possibly a dead end
    Chamber,
    /// The exit from the mansion; reaching it (with the relic) wins
    Exit,
}

/// A single room descriptor: identity, type, position, side slots, and the
/// zombies currently lurking on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Stable id, assigned in placement order
    pub id: TileId,
    /// Kind of room
    pub tile_type: TileType,
    /// Coordinate in the mansion grid; unique within a level
    pub position: Position,
    /// Side slots in North, East, South, West order
    pub sides: [Side; 4],
    /// Zombies accumulated on this tile and not yet cleared
    pub zombies: u32,
}

impl Tile {
    /// Creates a new tile with no zombies on it.
    pub fn new(id: TileId, tile_type: TileType, position: Position, sides: [Side; 4]) -> Self {
        Self {
            id,
            tile_type,
            position,
            sides,
            zombies: 0,
        }
    }

    /// The side slot facing the given direction.
    pub fn side(&self, direction: Direction) -> Side {
        self.sides[direction.side_index()]
    }

    /// Whether the side facing the given direction is open.
    ///
    /// # Examples
    ///
    /// ```
    /// use mansion::{Direction, Position, Side, Tile, TileId, TileType};
    ///
    /// let tile = Tile::new(
    ///     TileId(0),
    ///     TileType::Hallway,
    ///     Position::origin(),
    ///     [Side::Open, Side::Wall, Side::Open, Side::Wall],
    /// );
    /// assert!(tile.is_open(Direction::North));
    /// assert!(!tile.is_open(Direction::East));
    /// ```
    pub fn is_open(&self, direction: Direction) -> bool {
        self.side(direction) == Side::Open
    }

    /// Number of open sides.
    pub fn open_side_count(&self) -> usize {
        self.sides.iter().filter(|s| **s == Side::Open).count()
    }
}

/// Outcome of a movement request. Blocked moves change nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player moved to `to`; `newly_placed` is true when the step
    /// materialized a fresh tile (which triggers a card draw upstream)
    Moved { to: TileId, newly_placed: bool },
    /// The player bumped into a wall; position unchanged
    Blocked,
}

/// The growing set of placed tiles plus the player's position within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// Placed tiles in placement order; `TileId` indexes into this list
    tiles: Vec<Tile>,
    /// Coordinate index of every placed tile
    index: HashMap<Position, TileId>,
    /// The tile the player currently stands on
    player_tile: TileId,
}

impl Level {
    /// Creates a level containing only the Foyer at the origin, with the
    /// player standing on it.
    ///
    /// # Examples
    ///
    /// ```
    /// use mansion::{Level, Position, TileType};
    ///
    /// let level = Level::new();
    /// assert_eq!(level.len(), 1);
    /// assert_eq!(level.tile_player_is_on().tile_type, TileType::Foyer);
    /// assert_eq!(level.tile_player_is_on().position, Position::origin());
    /// ```
    pub fn new() -> Self {
        let foyer = Tile::new(
            TileId(0),
            TileType::Foyer,
            Position::origin(),
            [Side::Open; 4],
        );
        let mut index = HashMap::new();
        index.insert(foyer.position, foyer.id);
        Self {
            tiles: vec![foyer],
            index,
            player_tile: TileId(0),
        }
    }

    /// Rebuilds a level from a placement-ordered tile list and the player's
    /// tile. Used when restoring a snapshot; the coordinate index is
    /// re-derived rather than trusted from disk.
    pub fn from_tiles(tiles: Vec<Tile>, player_tile: TileId) -> MansionResult<Self> {
        let mut index = HashMap::new();
        for (i, tile) in tiles.iter().enumerate() {
            if tile.id.0 as usize != i {
                return Err(MansionError::InvalidState(format!(
                    "tile id {:?} out of placement order",
                    tile.id
                )));
            }
            if index.insert(tile.position, tile.id).is_some() {
                return Err(MansionError::InvalidState(format!(
                    "two tiles share coordinate {:?}",
                    tile.position
                )));
            }
        }
        if player_tile.0 as usize >= tiles.len() {
            return Err(MansionError::InvalidState(format!(
                "player tile {:?} does not exist",
                player_tile
            )));
        }
        Ok(Self {
            tiles,
            index,
            player_tile,
        })
    }

    /// Number of placed tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the level has no tiles. Never true for a constructed level.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All placed tiles in placement order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Looks up a tile by id.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize)
    }

    /// Looks up a tile by coordinate.
    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.index.get(&position).and_then(|id| self.tile(*id))
    }

    /// Returns the tile the player is on.
    pub fn tile_player_is_on(&self) -> &Tile {
        &self.tiles[self.player_tile.0 as usize]
    }

    /// Mutable access to the tile the player is on (zombie bookkeeping).
    pub(crate) fn tile_player_is_on_mut(&mut self) -> &mut Tile {
        &mut self.tiles[self.player_tile.0 as usize]
    }

    /// The id of the tile the player is on.
    pub fn player_tile(&self) -> TileId {
        self.player_tile
    }

    /// Moves the player directly to an already-placed tile. Used for forced
    /// retreats; ordinary movement goes through [`Level::move_player`].
    pub(crate) fn set_player_tile(&mut self, id: TileId) -> MansionResult<()> {
        if self.tile(id).is_none() {
            return Err(MansionError::InvalidState(format!(
                "cannot move player to unplaced tile {:?}",
                id
            )));
        }
        self.player_tile = id;
        Ok(())
    }

    /// The tile adjacent to `id` in `direction`, regardless of connectivity.
    pub fn neighbor_of(&self, id: TileId, direction: Direction) -> Option<&Tile> {
        let tile = self.tile(id)?;
        self.tile_at(tile.position.step(direction))
    }

    /// Whether the tile `id` is linked to a neighbor in `direction`: a
    /// neighbor exists and the facing sides of both tiles are open.
    pub fn linked(&self, id: TileId, direction: Direction) -> bool {
        let Some(tile) = self.tile(id) else {
            return false;
        };
        match self.neighbor_of(id, direction) {
            Some(neighbor) => {
                tile.is_open(direction) && neighbor.is_open(direction.opposite())
            }
            None => false,
        }
    }

    /// Places a new tile one step from `from` in `direction` and links it
    /// back to its source.
    ///
    /// Fails with [`MansionError::PlacementConflict`] when the source side
    /// is a wall or the target coordinate is already occupied. Callers
    /// treat a conflict as bumping into a wall: nothing changes and the
    /// failure is reported, not fatal.
    ///
    /// The new tile's side facing `from` is forced open so the link is
    /// open on both ends.
    pub fn place_adjacent(
        &mut self,
        from: TileId,
        direction: Direction,
        tile_type: TileType,
        mut sides: [Side; 4],
    ) -> MansionResult<TileId> {
        let source = self
            .tile(from)
            .ok_or_else(|| MansionError::InvalidState(format!("no tile {:?}", from)))?;

        if !source.is_open(direction) {
            return Err(MansionError::PlacementConflict(format!(
                "side {:?} of tile {:?} is a wall",
                direction, from
            )));
        }

        let position = source.position.step(direction);
        if self.index.contains_key(&position) {
            return Err(MansionError::PlacementConflict(format!(
                "coordinate {:?} is already occupied",
                position
            )));
        }

        // The back-link must be open on both ends.
        sides[direction.opposite().side_index()] = Side::Open;

        let id = TileId(self.tiles.len() as u32);
        let tile = Tile::new(id, tile_type, position, sides);
        debug!(
            "placed {:?} {:?} at {:?} ({} open sides)",
            id,
            tile_type,
            position,
            tile.open_side_count()
        );
        self.index.insert(position, id);
        self.tiles.push(tile);
        Ok(id)
    }

    /// Attempts to move the player one step in `direction`.
    ///
    /// Movement through a wall, or into an existing tile whose facing side
    /// is a wall, is reported as [`MoveOutcome::Blocked`] and changes
    /// nothing. Movement into unexplored space materializes a fresh tile
    /// first: its type and open sides are drawn from the injected random
    /// source, with the side facing back always open.
    pub fn move_player(
        &mut self,
        direction: Direction,
        rng: &mut GameRng,
    ) -> MansionResult<MoveOutcome> {
        let here = self.tile_player_is_on();
        let here_id = here.id;

        if !here.is_open(direction) {
            debug!("move {:?} blocked: wall on current tile", direction);
            return Ok(MoveOutcome::Blocked);
        }

        let target = here.position.step(direction);
        if let Some(&existing) = self.index.get(&target) {
            // Entering explored territory needs the far side open too.
            if !self.tiles[existing.0 as usize].is_open(direction.opposite()) {
                debug!("move {:?} blocked: wall on {:?}", direction, existing);
                return Ok(MoveOutcome::Blocked);
            }
            self.player_tile = existing;
            return Ok(MoveOutcome::Moved {
                to: existing,
                newly_placed: false,
            });
        }

        // Unexplored space: materialize a tile, then step onto it.
        let (tile_type, sides) = roll_tile(rng, direction.opposite());
        let id = self.place_adjacent(here_id, direction, tile_type, sides)?;
        self.player_tile = id;
        Ok(MoveOutcome::Moved {
            to: id,
            newly_placed: true,
        })
    }

    /// Checks the structural invariants: unique coordinates, ids in
    /// placement order, and the player on a placed tile. Exposed for
    /// property tests.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashMap::new();
        for (i, tile) in self.tiles.iter().enumerate() {
            if tile.id.0 as usize != i {
                return false;
            }
            if seen.insert(tile.position, tile.id).is_some() {
                return false;
            }
            if self.index.get(&tile.position) != Some(&tile.id) {
                return false;
            }
        }
        self.index.len() == self.tiles.len() && (self.player_tile.0 as usize) < self.tiles.len()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws a tile type and side layout for a freshly explored coordinate.
///
/// The side facing `back` (toward the tile the player came from) is always
/// open. Type weights and per-type openness are the map's tuning knobs:
/// hallways are strict pass-throughs, chambers may dead-end, and the exit
/// is rare enough that it takes some exploring to find.
fn roll_tile(rng: &mut GameRng, back: Direction) -> (TileType, [Side; 4]) {
    const TYPES: [TileType; 4] = [
        TileType::Room,
        TileType::Hallway,
        TileType::Chamber,
        TileType::Exit,
    ];
    const WEIGHTS: [u32; 4] = [4, 3, 2, 1];

    let choice = rng
        .choose_weighted(&WEIGHTS)
        .expect("tile type weights are non-zero");
    let tile_type = TYPES[choice];

    let extra_open = match tile_type {
        TileType::Foyer => 3,
        TileType::Room => 1 + rng.gen_below(3),   // 1..=3
        TileType::Hallway => 1,                   // strict corridor
        TileType::Chamber => rng.gen_below(2),    // 0..=1, may dead-end
        TileType::Exit => rng.gen_below(4),       // 0..=3
    };

    let mut sides = [Side::Wall; 4];
    sides[back.side_index()] = Side::Open;

    let mut candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| *d != back)
        .collect();
    rng.shuffle(&mut candidates);
    for direction in candidates.into_iter().take(extra_open as usize) {
        sides[direction.side_index()] = Side::Open;
    }

    (tile_type, sides)
}
